use ultraviolet::Vec2;

use crate::error::{LabError, Result};
use crate::simulation::{ConcentrationModel, SoluteForm};

fn finite(point: Vec2) -> Result<Vec2> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(point)
    } else {
        Err(LabError::invalid(format!("non-finite position {point:?}")))
    }
}

pub fn handle_shaker_dispensing(model: &mut ConcentrationModel, on: bool) -> Result<()> {
    if on {
        if model.solute_form != SoluteForm::Solid {
            return Err(LabError::invalid("shaker is not the active emitter"));
        }
        if !model.shaker_enabled() {
            return Err(LabError::Disabled("shaker"));
        }
    }
    model.shaker.set_dispensing(on);
    Ok(())
}

pub fn handle_dropper_dispensing(model: &mut ConcentrationModel, on: bool) -> Result<()> {
    if on {
        if model.solute_form != SoluteForm::Solution {
            return Err(LabError::invalid("dropper is not the active emitter"));
        }
        if !model.dropper.enabled {
            return Err(LabError::Disabled("dropper"));
        }
    }
    model.dropper.set_dispensing(on);
    Ok(())
}

pub fn handle_evaporation_rate(model: &mut ConcentrationModel, rate: f64) -> Result<()> {
    LabError::check_range("evaporation_rate", rate, 0.0, model.evaporator.max_rate)?;
    if rate > 0.0 && !model.evaporator.enabled {
        return Err(LabError::Disabled("evaporator"));
    }
    model.evaporator.set_rate(rate)
}

pub fn handle_solvent_faucet(model: &mut ConcentrationModel, open: bool, flow_rate: f64) -> Result<()> {
    LabError::check_range("flow_rate", flow_rate, 0.0, model.solvent_faucet.max_flow_rate)?;
    if open && !model.solvent_faucet.enabled {
        return Err(LabError::Disabled("solvent faucet"));
    }
    model.solvent_faucet.set(open, flow_rate)
}

pub fn handle_drain_faucet(model: &mut ConcentrationModel, open: bool, flow_rate: f64) -> Result<()> {
    LabError::check_range("flow_rate", flow_rate, 0.0, model.drain_faucet.max_flow_rate)?;
    if open && !model.drain_faucet.enabled {
        return Err(LabError::Disabled("drain faucet"));
    }
    model.drain_faucet.set(open, flow_rate)
}

pub fn handle_move_shaker(model: &mut ConcentrationModel, to: Vec2) -> Result<()> {
    model.shaker.movable.move_to(finite(to)?);
    Ok(())
}

pub fn handle_move_dropper(model: &mut ConcentrationModel, to: Vec2) -> Result<()> {
    model.dropper.movable.move_to(finite(to)?);
    Ok(())
}

pub fn handle_move_probe(model: &mut ConcentrationModel, to: Vec2) -> Result<()> {
    model.meter.probe.move_to(finite(to)?);
    Ok(())
}
