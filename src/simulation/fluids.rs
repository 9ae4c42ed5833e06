//! Volume changes: solvent inflow, stock solution from the dropper,
//! evaporation and draining.
//!
//! Each function advances one source or sink by `dt` seconds and returns
//! the liters moved.

use super::{ConcentrationModel, SoluteForm};

/// Pure solvent from the input faucet.
pub fn add_solvent(model: &mut ConcentrationModel, dt: f64) -> f64 {
    let liters = model.solvent_faucet.current_flow_rate() * dt;
    model.solution.add_volume(liters)
}

/// Stock solution from the dropper, at the solute's stock concentration.
pub fn add_stock_solution(model: &mut ConcentrationModel, dt: f64) -> f64 {
    if model.solute_form != SoluteForm::Solution {
        return 0.0;
    }
    let liters = model.dropper.current_flow_rate() * dt;
    let concentration = model.solution.solute().stock_concentration();
    model.solution.add_stock_solution(liters, concentration)
}

/// Solvent only; the solute amount is untouched.
pub fn evaporate(model: &mut ConcentrationModel, dt: f64) -> f64 {
    let liters = model.evaporator.rate() * dt;
    model.solution.evaporate(liters)
}

/// Solution through the drain, carrying dissolved solute with it.
pub fn drain(model: &mut ConcentrationModel, dt: f64) -> f64 {
    let liters = model.drain_faucet.current_flow_rate() * dt;
    model.solution.remove_volume(liters)
}
