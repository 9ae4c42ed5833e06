use log::{debug, warn};

use super::{emitters, light, solution, LabCommand};
use crate::error::Result;
use crate::simulation::ConcentrationModel;

/// Validate and apply a single `LabCommand`. A rejected command leaves
/// the model untouched.
pub fn process_command(cmd: LabCommand, model: &mut ConcentrationModel) -> Result<()> {
    let description = format!("{cmd:?}");
    let result = match cmd {
        LabCommand::SelectSolute(solute) => solution::handle_select_solute(model, solute),
        LabCommand::SetSoluteForm(form) => solution::handle_set_solute_form(model, form),
        LabCommand::RemoveSolute => solution::handle_remove_solute(model),
        LabCommand::Reset => solution::handle_reset(model),
        LabCommand::SetShakerDispensing(on) => emitters::handle_shaker_dispensing(model, on),
        LabCommand::SetDropperDispensing(on) => emitters::handle_dropper_dispensing(model, on),
        LabCommand::SetEvaporationRate(rate) => emitters::handle_evaporation_rate(model, rate),
        LabCommand::SetSolventFaucet { open, flow_rate } => {
            emitters::handle_solvent_faucet(model, open, flow_rate)
        }
        LabCommand::SetDrainFaucet { open, flow_rate } => {
            emitters::handle_drain_faucet(model, open, flow_rate)
        }
        LabCommand::MoveShaker(to) => emitters::handle_move_shaker(model, to),
        LabCommand::MoveDropper(to) => emitters::handle_move_dropper(model, to),
        LabCommand::MoveProbe(to) => emitters::handle_move_probe(model, to),
        LabCommand::SetLightOn(on) => light::handle_light_on(model, on),
        LabCommand::SetLightMode(mode) => light::handle_light_mode(model, mode),
        LabCommand::SetWavelength(nm) => light::handle_wavelength(model, nm),
        LabCommand::SetDetectorMode(mode) => light::handle_detector_mode(model, mode),
    };
    match &result {
        Ok(()) => {
            model.refresh_meter();
            debug!("applied {description}");
        }
        Err(e) => warn!("rejected {description}: {e}"),
    }
    result
}

impl ConcentrationModel {
    /// Apply a command; see [`process_command`].
    pub fn apply(&mut self, cmd: LabCommand) -> Result<()> {
        process_command(cmd, self)
    }
}
