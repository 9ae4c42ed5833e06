use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::{DragBounds, Movable};
use crate::config::{self, LabConfig};

/// Dispenses solid grains while it is being shaken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shaker {
    pub movable: Movable,
    dispensing: bool,
    pub max_dispensing_rate: f64,
    /// Direction grains leave the opening (rad)
    pub orientation: f32,
    /// Fractional grains carried over between steps
    emission_accumulator: f64,
}

impl Shaker {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            movable: Movable::new(
                config::SHAKER_POSITION,
                DragBounds::new(config::SHAKER_DRAG_MIN, config::SHAKER_DRAG_MAX),
            ),
            dispensing: false,
            max_dispensing_rate: config.shaker_max_dispensing_rate,
            orientation: config.shaker_orientation,
            emission_accumulator: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.movable.position()
    }

    pub fn is_dispensing(&self) -> bool {
        self.dispensing
    }

    pub fn set_dispensing(&mut self, dispensing: bool) {
        self.dispensing = dispensing;
        if !dispensing {
            self.emission_accumulator = 0.0;
        }
    }

    /// Solute dispensed per second (mol/s).
    pub fn dispensing_rate(&self) -> f64 {
        if self.dispensing {
            self.max_dispensing_rate
        } else {
            0.0
        }
    }

    /// Number of whole grains due after `dt` seconds, limited to `budget`.
    /// Over time the emitted moles match `dispensing_rate * t`.
    pub fn grains_due(&mut self, dt: f64, particles_per_mole: f64, budget: usize) -> usize {
        if !self.dispensing {
            return 0;
        }
        self.emission_accumulator += self.dispensing_rate() * particles_per_mole * dt;
        let whole = self.emission_accumulator.floor();
        self.emission_accumulator -= whole;
        (whole as usize).min(budget)
    }
}
