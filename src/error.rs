//! Error types for the lab model.
//!
//! Only the command boundary, configuration loading and state persistence
//! can fail. The stepping loop clamps instead of returning errors.

use thiserror::Error;

/// Unified error type for all fallible lab operations.
#[derive(Error, Debug)]
pub enum LabError {
    /// A command that makes no sense in the current model state
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A numeric command argument outside its allowed range
    #[error("{parameter} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A solute name that is not in the catalog
    #[error("Unknown solute: {0}")]
    UnknownSolute(String),

    /// The addressed emitter is currently disabled (beaker full or empty)
    #[error("{0} is disabled")]
    Disabled(&'static str),

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LabError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LabError::InvalidCommand(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        LabError::Config(message.into())
    }

    /// Check that `value` is finite and inside `[min, max]`.
    pub fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
        if value.is_finite() && value >= min && value <= max {
            Ok(value)
        } else {
            Err(LabError::OutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_accepts_bounds_and_rejects_nan() {
        assert!(LabError::check_range("rate", 0.0, 0.0, 1.0).is_ok());
        assert!(LabError::check_range("rate", 1.0, 0.0, 1.0).is_ok());
        assert!(LabError::check_range("rate", -0.1, 0.0, 1.0).is_err());
        assert!(LabError::check_range("rate", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn out_of_range_message_names_parameter() {
        let err = LabError::check_range("evaporation_rate", 2.0, 0.0, 0.25).unwrap_err();
        assert!(err.to_string().starts_with("evaporation_rate = 2"));
    }
}
