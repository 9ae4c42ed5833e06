use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Removes solvent at a user-selected rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaporator {
    pub max_rate: f64,
    rate: f64,
    /// Cleared while the beaker is empty
    pub enabled: bool,
}

impl Evaporator {
    pub fn new(max_rate: f64) -> Self {
        Self { max_rate, rate: 0.0, enabled: true }
    }

    /// Evaporation rate (L/s).
    pub fn rate(&self) -> f64 {
        if self.enabled {
            self.rate
        } else {
            0.0
        }
    }

    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.rate = LabError::check_range("evaporation_rate", rate, 0.0, self.max_rate)?;
        Ok(())
    }

    /// Stop evaporating. The rate is reset to zero.
    pub fn disable(&mut self) {
        self.rate = 0.0;
        self.enabled = false;
    }
}
