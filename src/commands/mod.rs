// commands/mod.rs
// Commands accepted from the UI and other collaborators

pub mod dispatcher;
mod emitters;
mod light;
mod solution;

pub use dispatcher::process_command;

use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use crate::beers_law::{DetectorMode, LightMode};
use crate::simulation::SoluteForm;
use crate::solute::SoluteId;

/// Every way a collaborator can change the model. Rates are per second
/// (mol/s or L/s), positions are in view units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LabCommand {
    SelectSolute(SoluteId),
    SetSoluteForm(SoluteForm),
    SetShakerDispensing(bool),
    SetDropperDispensing(bool),
    SetEvaporationRate(f64),
    SetSolventFaucet { open: bool, flow_rate: f64 },
    SetDrainFaucet { open: bool, flow_rate: f64 },
    MoveShaker(Vec2),
    MoveDropper(Vec2),
    MoveProbe(Vec2),
    RemoveSolute,
    SetLightOn(bool),
    SetLightMode(LightMode),
    SetWavelength(f64),
    SetDetectorMode(DetectorMode),
    Reset,
}

#[cfg(test)]
mod tests;
