//! Beer-Lambert absorbance and transmittance.
//!
//! `A = ε(λ) · b · C` and `T = 10^-A`, where ε is the solute's molar
//! absorptivity at the selected wavelength, `b` the path length through
//! the beaker and `C` the dissolved concentration.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{LabError, Result};
use crate::solute::SoluteId;

/// Where the wavelength comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightMode {
    /// The solute's peak absorption wavelength
    Preset,
    /// A user-selected wavelength
    Variable,
}

/// Which derived quantity the detector reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorMode {
    Absorbance,
    Transmittance,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectorReading {
    pub wavelength: f64,
    pub absorbance: f64,
    /// Fraction of light transmitted, in `[0, 1]`
    pub transmittance: f64,
    pub mode: DetectorMode,
}

impl DetectorReading {
    /// The value shown by the detector in its current mode.
    pub fn value(&self) -> f64 {
        match self.mode {
            DetectorMode::Absorbance => self.absorbance,
            DetectorMode::Transmittance => self.transmittance,
        }
    }
}

pub fn absorbance(molar_absorptivity: f64, path_length: f64, concentration: f64) -> f64 {
    molar_absorptivity * path_length * concentration
}

pub fn transmittance(absorbance: f64) -> f64 {
    10f64.powf(-absorbance)
}

/// Light and detector selections. Holds no solution state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeersLawModel {
    pub light_on: bool,
    pub light_mode: LightMode,
    variable_wavelength: f64,
    pub detector_mode: DetectorMode,
    /// Optical path through the beaker (cm)
    pub path_length: f64,
}

impl BeersLawModel {
    pub fn new(path_length: f64) -> Self {
        Self {
            light_on: true,
            light_mode: LightMode::Preset,
            variable_wavelength: config::DEFAULT_VARIABLE_WAVELENGTH,
            detector_mode: DetectorMode::Transmittance,
            path_length,
        }
    }

    pub fn variable_wavelength(&self) -> f64 {
        self.variable_wavelength
    }

    pub fn set_variable_wavelength(&mut self, nm: f64) -> Result<()> {
        self.variable_wavelength =
            LabError::check_range("wavelength", nm, config::WAVELENGTH_MIN, config::WAVELENGTH_MAX)?;
        Ok(())
    }

    /// Wavelength in use for `solute` (nm).
    pub fn wavelength(&self, solute: SoluteId) -> f64 {
        match self.light_mode {
            LightMode::Preset => solute.props().absorption.lambda_max,
            LightMode::Variable => self.variable_wavelength,
        }
    }

    pub fn molar_absorptivity(&self, solute: SoluteId) -> f64 {
        solute.props().absorption.molar_absorptivity(self.wavelength(solute))
    }

    /// Detector reading for a solution of `solute` at `concentration`
    /// (mol/L). `None` while the light is off.
    pub fn measure(&self, solute: SoluteId, concentration: f64) -> Option<DetectorReading> {
        if !self.light_on {
            return None;
        }
        let a = absorbance(self.molar_absorptivity(solute), self.path_length, concentration.max(0.0));
        Some(DetectorReading {
            wavelength: self.wavelength(solute),
            absorbance: a,
            transmittance: transmittance(a),
            mode: self.detector_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn absorbance_is_linear_in_concentration_and_path() {
        assert_relative_eq!(absorbance(100.0, 1.0, 0.01), 1.0);
        assert_relative_eq!(absorbance(100.0, 2.0, 0.01), 2.0);
        assert_relative_eq!(transmittance(1.0), 0.1);
        assert_relative_eq!(transmittance(0.0), 1.0);
    }

    #[test]
    fn preset_mode_uses_peak_wavelength() {
        let model = BeersLawModel::new(1.0);
        let reading = model.measure(SoluteId::PotassiumPermanganate, 0.001).unwrap();
        assert_relative_eq!(reading.wavelength, 525.0);
        assert_relative_eq!(reading.absorbance, 2.4, epsilon = 1e-12);
        assert_relative_eq!(reading.value(), 10f64.powf(-2.4), epsilon = 1e-12);
    }

    #[test]
    fn variable_mode_samples_band_off_peak() {
        let mut model = BeersLawModel::new(1.0);
        model.light_mode = LightMode::Variable;
        model.detector_mode = DetectorMode::Absorbance;
        model.set_variable_wavelength(700.0).unwrap();
        let off_peak = model.measure(SoluteId::PotassiumPermanganate, 0.001).unwrap();
        assert!(off_peak.absorbance < 2.4);
        assert_eq!(off_peak.value(), off_peak.absorbance);
    }

    #[test]
    fn wavelength_outside_visible_range_is_rejected() {
        let mut model = BeersLawModel::new(1.0);
        assert!(model.set_variable_wavelength(200.0).is_err());
        assert_eq!(model.variable_wavelength(), config::DEFAULT_VARIABLE_WAVELENGTH);
    }

    #[test]
    fn light_off_gives_no_reading() {
        let mut model = BeersLawModel::new(1.0);
        model.light_on = false;
        assert!(model.measure(SoluteId::DrinkMix, 1.0).is_none());
    }

    #[test]
    fn zero_concentration_transmits_everything() {
        let model = BeersLawModel::new(1.0);
        let reading = model.measure(SoluteId::CopperSulfate, 0.0).unwrap();
        assert_eq!(reading.absorbance, 0.0);
        assert_eq!(reading.transmittance, 1.0);
    }
}
