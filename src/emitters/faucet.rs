use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::FluidStream;
use crate::config;
use crate::error::{LabError, Result};

/// A fixed tap. Used both for solvent inflow and for the drain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Faucet {
    pub position: Vec2,
    pub max_flow_rate: f64,
    open: bool,
    flow_rate: f64,
    /// Cleared while the beaker is full (inflow) or empty (drain)
    pub enabled: bool,
}

impl Faucet {
    pub fn new(position: [f32; 2], max_flow_rate: f64) -> Self {
        Self {
            position: Vec2::new(position[0], position[1]),
            max_flow_rate,
            open: false,
            flow_rate: 0.0,
            enabled: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Set the valve. `flow_rate` must lie in `[0, max_flow_rate]`.
    pub fn set(&mut self, open: bool, flow_rate: f64) -> Result<()> {
        let flow_rate = LabError::check_range("flow_rate", flow_rate, 0.0, self.max_flow_rate)?;
        self.open = open;
        self.flow_rate = flow_rate;
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Current flow (L/s).
    pub fn current_flow_rate(&self) -> f64 {
        if self.open && self.enabled {
            self.flow_rate
        } else {
            0.0
        }
    }

    /// Stream from the outlet down to `bottom`, if flowing.
    pub fn stream(&self, bottom: f32) -> Option<FluidStream> {
        (self.current_flow_rate() > 0.0).then(|| FluidStream {
            x: self.position.x,
            half_width: config::FAUCET_STREAM_WIDTH / 2.0,
            top: self.position.y,
            bottom,
        })
    }
}
