//! Read-only view of one frame, shaped for a renderer or for JSON output.

use palette::Srgb;
use serde::Serialize;
use ultraviolet::Vec2;

use crate::beaker::Beaker;
use crate::beers_law::DetectorReading;
use crate::particles::{Particle, ParticleCollection};
use crate::simulation::{ConcentrationModel, SoluteForm};
use crate::solute::SoluteId;

fn rgb(color: Srgb<u8>) -> [u8; 3] {
    [color.red, color.green, color.blue]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub orientation: f32,
    pub size: f32,
    pub color: [u8; 3],
}

impl ParticleView {
    fn of<P: Particle>(p: &P) -> Self {
        let solute = p.solute();
        Self {
            position: p.position(),
            orientation: p.orientation(),
            size: solute.particle_size(),
            color: rgb(solute.particle_color()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmitterView {
    pub position: Vec2,
    pub active: bool,
    pub enabled: bool,
    /// mol/s for the shaker, L/s otherwise
    pub rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelSnapshot {
    pub time: f64,
    pub frame: u64,
    pub solute: SoluteId,
    pub solute_form: SoluteForm,
    pub beaker: Beaker,
    pub volume: f64,
    pub fill_height: f32,
    pub solute_amount: f64,
    pub dissolved_amount: f64,
    pub precipitate_amount: f64,
    pub concentration: f64,
    pub saturated: bool,
    pub solution_color: [u8; 3],
    pub shaker: EmitterView,
    pub dropper: EmitterView,
    pub solvent_faucet: EmitterView,
    pub drain_faucet: EmitterView,
    pub evaporation_rate: f64,
    pub evaporator_enabled: bool,
    pub falling: Vec<ParticleView>,
    pub precipitate: Vec<ParticleView>,
    pub probe_position: Vec2,
    pub meter_value: Option<f64>,
    pub detector: Option<DetectorReading>,
}

impl ConcentrationModel {
    pub fn snapshot(&self) -> ModelSnapshot {
        let solution = &self.solution;
        let solute = solution.solute();
        let concentration = solution.concentration();
        ModelSnapshot {
            time: self.time,
            frame: self.frame,
            solute,
            solute_form: self.solute_form,
            beaker: self.beaker,
            volume: solution.volume(),
            fill_height: self.fill_height(),
            solute_amount: solution.solute_amount(),
            dissolved_amount: solution.dissolved_amount(),
            precipitate_amount: solution.precipitate_amount(),
            concentration,
            saturated: solution.is_saturated(),
            solution_color: rgb(solute.props().colors.color_at(concentration)),
            shaker: EmitterView {
                position: self.shaker.position(),
                active: self.shaker.is_dispensing(),
                enabled: self.shaker_enabled(),
                rate: self.shaker.dispensing_rate(),
            },
            dropper: EmitterView {
                position: self.dropper.position(),
                active: self.dropper.is_dispensing(),
                enabled: self.dropper.enabled,
                rate: self.dropper.current_flow_rate(),
            },
            solvent_faucet: EmitterView {
                position: self.solvent_faucet.position,
                active: self.solvent_faucet.is_open(),
                enabled: self.solvent_faucet.enabled,
                rate: self.solvent_faucet.current_flow_rate(),
            },
            drain_faucet: EmitterView {
                position: self.drain_faucet.position,
                active: self.drain_faucet.is_open(),
                enabled: self.drain_faucet.enabled,
                rate: self.drain_faucet.current_flow_rate(),
            },
            evaporation_rate: self.evaporator.rate(),
            evaporator_enabled: self.evaporator.enabled,
            falling: self.shaker_particles.iter().map(ParticleView::of).collect(),
            precipitate: self.precipitate.iter().map(ParticleView::of).collect(),
            probe_position: self.meter.probe_position(),
            meter_value: self.meter.value(),
            detector: self.beers_law.measure(solute, concentration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LabCommand;

    #[test]
    fn snapshot_reflects_solution_state() {
        let mut model = ConcentrationModel::new();
        model.solution.add_solute(4.0);
        crate::simulation::collision::reconcile_precipitate(&mut model, None);
        let snap = model.snapshot();
        assert_eq!(snap.solute, SoluteId::DrinkMix);
        assert!(snap.saturated);
        assert_eq!(snap.precipitate.len(), 204);
        assert!(snap.falling.is_empty());
        assert_eq!(snap.solution_color, rgb(SoluteId::DrinkMix.props().colors.color_at(5.96)));
    }

    #[test]
    fn detector_disappears_with_light_off() {
        let mut model = ConcentrationModel::new();
        assert!(model.snapshot().detector.is_some());
        model.apply(LabCommand::SetLightOn(false)).unwrap();
        assert!(model.snapshot().detector.is_none());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let model = ConcentrationModel::new();
        let json = serde_json::to_value(model.snapshot()).unwrap();
        assert_eq!(json["frame"], 0);
        assert_eq!(json["solute_form"], "Solid");
    }
}
