use crate::beers_law::{DetectorMode, LightMode};
use crate::error::Result;
use crate::simulation::ConcentrationModel;

pub fn handle_light_on(model: &mut ConcentrationModel, on: bool) -> Result<()> {
    model.beers_law.light_on = on;
    Ok(())
}

pub fn handle_light_mode(model: &mut ConcentrationModel, mode: LightMode) -> Result<()> {
    model.beers_law.light_mode = mode;
    Ok(())
}

pub fn handle_wavelength(model: &mut ConcentrationModel, nm: f64) -> Result<()> {
    model.beers_law.set_variable_wavelength(nm)
}

pub fn handle_detector_mode(model: &mut ConcentrationModel, mode: DetectorMode) -> Result<()> {
    model.beers_law.detector_mode = mode;
    Ok(())
}
