use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::{DragBounds, FluidStream, Movable};
use crate::config::{self, LabConfig};

/// Squirts stock solution of the active solute into the beaker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dropper {
    pub movable: Movable,
    dispensing: bool,
    /// Cleared while the beaker is full
    pub enabled: bool,
    /// Flow while dispensing (L/s)
    pub flow_rate: f64,
}

impl Dropper {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            movable: Movable::new(
                config::DROPPER_POSITION,
                DragBounds::new(config::DROPPER_DRAG_MIN, config::DROPPER_DRAG_MAX),
            ),
            dispensing: false,
            enabled: true,
            flow_rate: config.dropper_flow_rate,
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
    }

    /// Current outflow (L/s).
    pub fn current_flow_rate(&self) -> f64 {
        if self.dispensing && self.enabled {
            self.flow_rate
        } else {
            0.0
        }
    }

    /// Stream from the tip down to `surface_y`, if flowing.
    pub fn stream(&self, surface_y: f32) -> Option<FluidStream> {
        (self.current_flow_rate() > 0.0).then(|| FluidStream {
            x: self.position().x,
            half_width: config::DROPPER_STREAM_WIDTH / 2.0,
            top: self.position().y,
            bottom: surface_y,
        })
    }
}
