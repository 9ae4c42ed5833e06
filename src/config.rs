// Centralized configuration for lab parameters
//
// Geometry is in view units with y pointing up and the origin at the
// centre of the beaker floor. Chemistry is in liters, moles and seconds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LabError, Result};
use crate::solute::SoluteId;

// ====================
// Beaker
// ====================
pub const BEAKER_POSITION: [f32; 2] = [0.0, 0.0];
pub const BEAKER_WIDTH: f32 = 600.0;
pub const BEAKER_HEIGHT: f32 = 300.0;
/// Fluid capacity in liters
pub const BEAKER_CAPACITY: f64 = 1.0;
/// Interior width of the beaker (cm), the Beer's-law path length
pub const BEAKER_PATH_LENGTH_CM: f64 = 1.0;

// ====================
// Solution
// ====================
pub const INITIAL_VOLUME: f64 = 0.5;
pub const MAX_SOLUTE_AMOUNT: f64 = 5.0;
/// Precipitate below this amount (mol) is not drawn as a grain
pub const PRECIPITATE_EPSILON: f64 = 1e-9;

// ====================
// Flow rates (per second)
// ====================
pub const SHAKER_MAX_DISPENSING_RATE: f64 = 0.2; // mol/s
pub const DROPPER_FLOW_RATE: f64 = 0.05; // L/s
pub const MAX_INFLOW_RATE: f64 = 0.25; // L/s
pub const MAX_OUTFLOW_RATE: f64 = 0.25; // L/s
pub const MAX_EVAPORATION_RATE: f64 = 0.25; // L/s

// ====================
// Shaker kinematics
// ====================
pub const GRAVITY: f32 = 150.0;
pub const SHAKER_INITIAL_SPEED: f32 = 100.0;
pub const SHAKER_ORIENTATION: f32 = -0.75 * std::f32::consts::PI;
/// Max random horizontal offset of a grain from the shaker opening
pub const SHAKER_MAX_X_OFFSET: f32 = 5.0;
/// Max tumbling rate of a falling grain (rad/s)
pub const SHAKER_MAX_SPIN: f32 = 6.0;

// ====================
// Emitter placement
// ====================
pub const SHAKER_POSITION: [f32; 2] = [-10.0, 380.0];
pub const SHAKER_DRAG_MIN: [f32; 2] = [-100.0, 340.0];
pub const SHAKER_DRAG_MAX: [f32; 2] = [225.0, 500.0];
pub const DROPPER_POSITION: [f32; 2] = [25.0, 325.0];
pub const DROPPER_DRAG_MIN: [f32; 2] = [-120.0, 325.0];
pub const DROPPER_DRAG_MAX: [f32; 2] = [295.0, 325.0];
pub const SOLVENT_FAUCET_POSITION: [f32; 2] = [-200.0, 360.0];
pub const DRAIN_FAUCET_POSITION: [f32; 2] = [330.0, -20.0];
pub const PROBE_POSITION: [f32; 2] = [400.0, 180.0];
pub const PROBE_DRAG_MIN: [f32; 2] = [-320.0, -130.0];
pub const PROBE_DRAG_MAX: [f32; 2] = [585.0, 400.0];
pub const DROPPER_STREAM_WIDTH: f32 = 10.0;
pub const FAUCET_STREAM_WIDTH: f32 = 40.0;
/// How far below the drain outlet its stream is drawn
pub const DRAIN_STREAM_LENGTH: f32 = 200.0;

// ====================
// Beer's law
// ====================
pub const WAVELENGTH_MIN: f64 = 380.0;
pub const WAVELENGTH_MAX: f64 = 780.0;
pub const DEFAULT_VARIABLE_WAVELENGTH: f64 = 500.0;

// ====================
// Time stepping
// ====================
/// Largest time step accepted by a single `step` call (s)
pub const MAX_DT: f64 = 0.1;
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_BEE5;

// ====================
// Notifications
// ====================
/// Undrained events kept by the model; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

fn vec_ok(v: [f32; 2]) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Runtime configuration of a lab model. Every field falls back to the
/// constants above when omitted from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub beaker_position: [f32; 2],
    pub beaker_width: f32,
    pub beaker_height: f32,
    pub beaker_capacity: f64,
    pub path_length_cm: f64,

    /// Catalog name of the solute selected at start and after reset
    pub initial_solute: String,
    pub initial_volume: f64,
    pub max_solute_amount: f64,

    pub shaker_max_dispensing_rate: f64,
    pub dropper_flow_rate: f64,
    pub max_inflow_rate: f64,
    pub max_outflow_rate: f64,
    pub max_evaporation_rate: f64,

    pub gravity: f32,
    pub shaker_initial_speed: f32,
    pub shaker_orientation: f32,

    pub max_dt: f64,
    pub rng_seed: u64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            beaker_position: BEAKER_POSITION,
            beaker_width: BEAKER_WIDTH,
            beaker_height: BEAKER_HEIGHT,
            beaker_capacity: BEAKER_CAPACITY,
            path_length_cm: BEAKER_PATH_LENGTH_CM,
            initial_solute: SoluteId::DrinkMix.name().to_string(),
            initial_volume: INITIAL_VOLUME,
            max_solute_amount: MAX_SOLUTE_AMOUNT,
            shaker_max_dispensing_rate: SHAKER_MAX_DISPENSING_RATE,
            dropper_flow_rate: DROPPER_FLOW_RATE,
            max_inflow_rate: MAX_INFLOW_RATE,
            max_outflow_rate: MAX_OUTFLOW_RATE,
            max_evaporation_rate: MAX_EVAPORATION_RATE,
            gravity: GRAVITY,
            shaker_initial_speed: SHAKER_INITIAL_SPEED,
            shaker_orientation: SHAKER_ORIENTATION,
            max_dt: MAX_DT,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl LabConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LabConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Resolve the configured initial solute against the catalog.
    pub fn initial_solute_id(&self) -> Result<SoluteId> {
        self.initial_solute.parse()
    }

    pub fn validate(&self) -> Result<()> {
        if !vec_ok(self.beaker_position) {
            return Err(LabError::config("beaker_position must be finite"));
        }
        if !(self.beaker_width > 0.0 && self.beaker_height > 0.0) {
            return Err(LabError::config("beaker dimensions must be positive"));
        }
        if !(self.beaker_capacity > 0.0 && self.beaker_capacity.is_finite()) {
            return Err(LabError::config("beaker_capacity must be positive"));
        }
        if !(self.path_length_cm > 0.0 && self.path_length_cm.is_finite()) {
            return Err(LabError::config("path_length_cm must be positive"));
        }
        LabError::check_range("initial_volume", self.initial_volume, 0.0, self.beaker_capacity)
            .map_err(|e| LabError::config(e.to_string()))?;
        for (name, value) in [
            ("max_solute_amount", self.max_solute_amount),
            ("shaker_max_dispensing_rate", self.shaker_max_dispensing_rate),
            ("dropper_flow_rate", self.dropper_flow_rate),
            ("max_inflow_rate", self.max_inflow_rate),
            ("max_outflow_rate", self.max_outflow_rate),
            ("max_evaporation_rate", self.max_evaporation_rate),
            ("max_dt", self.max_dt),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(LabError::config(format!("{name} must be positive")));
            }
        }
        if !(self.gravity.is_finite() && self.shaker_initial_speed.is_finite()) {
            return Err(LabError::config("shaker kinematics must be finite"));
        }
        self.initial_solute_id()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LabConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            initial_solute = "copper sulfate"
            initial_volume = 0.25
            rng_seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_solute_id().unwrap(), SoluteId::CopperSulfate);
        assert_eq!(config.initial_volume, 0.25);
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.beaker_width, BEAKER_WIDTH);
        assert_eq!(config.max_evaporation_rate, MAX_EVAPORATION_RATE);
    }

    #[test]
    fn unknown_solute_is_rejected() {
        let err = LabConfig::from_toml_str(r#"initial_solute = "unobtainium""#).unwrap_err();
        assert!(matches!(err, LabError::UnknownSolute(_)));
    }

    #[test]
    fn volume_above_capacity_is_rejected() {
        let err = LabConfig::from_toml_str("initial_volume = 2.0").unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
    }
}
