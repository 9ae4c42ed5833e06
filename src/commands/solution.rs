use crate::error::Result;
use crate::simulation::{ConcentrationModel, SoluteForm};
use crate::solute::SoluteId;

pub fn handle_select_solute(model: &mut ConcentrationModel, solute: SoluteId) -> Result<()> {
    model.select_solute(solute);
    Ok(())
}

pub fn handle_set_solute_form(model: &mut ConcentrationModel, form: SoluteForm) -> Result<()> {
    model.set_solute_form(form);
    Ok(())
}

pub fn handle_remove_solute(model: &mut ConcentrationModel) -> Result<()> {
    model.remove_solute();
    Ok(())
}

pub fn handle_reset(model: &mut ConcentrationModel) -> Result<()> {
    model.reset();
    Ok(())
}
