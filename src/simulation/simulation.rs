// simulation/simulation.rs
// Contains the ConcentrationModel struct and main methods (new, step, reset)

use std::collections::VecDeque;

use log::{debug, info};
use ultraviolet::Vec2;

use super::{collision, fluids, LabEvent, SoluteForm};
use crate::beaker::Beaker;
use crate::beers_law::BeersLawModel;
use crate::config::{self, LabConfig};
use crate::emitters::{Dropper, Evaporator, Faucet, Shaker};
use crate::error::Result;
use crate::meter::ConcentrationMeter;
use crate::particles::{ParticleCollection, Precipitate, ShakerParticle, ShakerParticles};
use crate::solute::SoluteId;
use crate::solution::Solution;

/// Beaker, solution, emitters and grains, advanced one frame at a time.
///
/// Collaborators read through the accessors or `snapshot()` and change
/// the model only through `apply` (see `commands`) and `step`.
pub struct ConcentrationModel {
    pub(crate) config: LabConfig,
    pub(crate) beaker: Beaker,
    pub(crate) solution: Solution,
    pub(crate) solute_form: SoluteForm,
    pub(crate) shaker: Shaker,
    pub(crate) dropper: Dropper,
    pub(crate) solvent_faucet: Faucet,
    pub(crate) drain_faucet: Faucet,
    pub(crate) evaporator: Evaporator,
    pub(crate) shaker_particles: ShakerParticles,
    pub(crate) precipitate: Precipitate,
    pub(crate) meter: ConcentrationMeter,
    pub(crate) beers_law: BeersLawModel,
    pub(crate) rng: fastrand::Rng,
    pub(crate) time: f64,
    pub(crate) frame: u64,
    pub(crate) events: VecDeque<LabEvent>,
}

impl Default for ConcentrationModel {
    fn default() -> Self {
        Self::build(LabConfig::default(), SoluteId::DrinkMix)
    }
}

impl ConcentrationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a validated configuration.
    pub fn with_config(config: LabConfig) -> Result<Self> {
        config.validate()?;
        let solute = config.initial_solute_id()?;
        Ok(Self::build(config, solute))
    }

    fn build(config: LabConfig, solute: SoluteId) -> Self {
        let beaker = Beaker::from_config(&config);
        let mut model = Self {
            solution: Solution::new(solute, config.initial_volume, beaker.capacity),
            solute_form: SoluteForm::Solid,
            shaker: Shaker::new(&config),
            dropper: Dropper::new(&config),
            solvent_faucet: Faucet::new(config::SOLVENT_FAUCET_POSITION, config.max_inflow_rate),
            drain_faucet: Faucet::new(config::DRAIN_FAUCET_POSITION, config.max_outflow_rate),
            evaporator: Evaporator::new(config.max_evaporation_rate),
            shaker_particles: ShakerParticles::new(),
            precipitate: Precipitate::new(),
            meter: ConcentrationMeter::default(),
            beers_law: BeersLawModel::new(beaker.path_length),
            rng: fastrand::Rng::with_seed(config.rng_seed),
            time: 0.0,
            frame: 0,
            events: VecDeque::new(),
            beaker,
            config,
        };
        model.update_enabled_states();
        model.refresh_meter();
        model
    }

    /// Restore the configured initial state. Clears all grains and
    /// pending events.
    pub fn reset(&mut self) {
        let solute = self.config.initial_solute_id().unwrap_or(SoluteId::DrinkMix);
        *self = Self::build(self.config.clone(), solute);
        info!("model reset to {} at {:.3} L", solute, self.solution.volume());
    }

    /// Advance the model by `dt` seconds, clamped to the configured
    /// maximum step. Non-positive or non-finite `dt` is ignored.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let dt = dt.min(self.config.max_dt);
        let was_full = self.solution.is_full();
        let was_empty = self.solution.is_empty();

        // Emit
        self.emit_grains(dt);
        fluids::add_stock_solution(self, dt);
        fluids::add_solvent(self, dt);

        // Fall, then resolve grains that reached the surface
        let surface_y = self.beaker.surface_y(self.solution.volume());
        let landed = self.shaker_particles.step(dt as f32, &self.beaker, surface_y);
        let mut dissolved = 0;
        for landing in landed {
            if collision::resolve_landing(self, landing) {
                dissolved += 1;
            }
        }
        if dissolved > 0 {
            self.push_event(LabEvent::GrainsDissolved { count: dissolved });
        }

        fluids::evaporate(self, dt);
        collision::reconcile_precipitate(self, None);

        fluids::drain(self, dt);
        // Re-dissolve anything the new volume can hold again
        collision::reconcile_precipitate(self, None);

        self.update_enabled_states();
        if !was_full && self.solution.is_full() {
            debug!("beaker full at t={:.2}s", self.time);
            self.push_event(LabEvent::BeakerFull);
        }
        if !was_empty && self.solution.is_empty() {
            debug!("beaker empty at t={:.2}s", self.time);
            self.push_event(LabEvent::BeakerEmpty);
        }
        self.refresh_meter();

        self.time += dt;
        self.frame += 1;
    }

    fn emit_grains(&mut self, dt: f64) {
        if self.solute_form != SoluteForm::Solid {
            return;
        }
        let solute = self.solution.solute();
        let per_mole = solute.particles_per_mole();
        let room = (self.config.max_solute_amount - self.committed_solute()).max(0.0);
        // tolerate rounding in `room` so the last whole grain still fits
        let budget = (room * per_mole + 1e-6).floor() as usize;
        let count = self.shaker.grains_due(dt, per_mole, budget);
        for _ in 0..count {
            let grain = ShakerParticle::emit(
                self.shaker.position(),
                self.shaker.orientation,
                self.config.shaker_initial_speed,
                self.config.gravity,
                solute,
                &mut self.rng,
            );
            self.shaker_particles.add(grain);
        }
    }

    /// Close or disable whatever cannot run at the current volume.
    pub(crate) fn update_enabled_states(&mut self) {
        let full = self.solution.is_full();
        let empty = self.solution.is_empty();

        self.solvent_faucet.enabled = !full;
        self.dropper.enabled = !full;
        if full {
            self.solvent_faucet.close();
            self.dropper.set_dispensing(false);
        }

        self.drain_faucet.enabled = !empty;
        if empty {
            self.drain_faucet.close();
            self.evaporator.disable();
        } else {
            self.evaporator.enabled = true;
        }
    }

    pub(crate) fn refresh_meter(&mut self) {
        let surface_y = self.beaker.surface_y(self.solution.volume());
        let streams = [
            (self.dropper.stream(surface_y), self.solution.solute().stock_concentration()),
            (self.solvent_faucet.stream(surface_y), 0.0),
            (
                self.drain_faucet.stream(self.drain_faucet.position.y - config::DRAIN_STREAM_LENGTH),
                self.solution.concentration(),
            ),
        ];
        self.meter.update(&self.beaker, &self.solution, &streams);
    }

    /// Switch chemicals, discarding all solute and grains.
    pub(crate) fn select_solute(&mut self, solute: SoluteId) {
        if solute == self.solution.solute() {
            return;
        }
        self.solution.set_solute(solute);
        self.clear_grains();
        info!("solute changed to {}", solute);
    }

    pub(crate) fn remove_solute(&mut self) {
        self.solution.remove_all_solute();
        self.clear_grains();
        debug!("all solute removed");
    }

    fn clear_grains(&mut self) {
        let settled = self.precipitate.len();
        self.precipitate.clear();
        self.shaker_particles.clear();
        if settled > 0 {
            self.push_event(LabEvent::PrecipitateDissolved { count: settled });
        }
    }

    pub(crate) fn set_solute_form(&mut self, form: SoluteForm) {
        self.solute_form = form;
        match form {
            SoluteForm::Solid => self.dropper.set_dispensing(false),
            SoluteForm::Solution => self.shaker.set_dispensing(false),
        }
    }

    /// Solute in the beaker plus grains still falling (mol).
    pub fn committed_solute(&self) -> f64 {
        self.solution.solute_amount() + self.shaker_particles.amount_in_flight()
    }

    /// Whether the shaker may still dispense.
    pub fn shaker_enabled(&self) -> bool {
        self.solute_form == SoluteForm::Solid
            && self.committed_solute() + self.solution.solute().moles_per_particle()
                <= self.config.max_solute_amount + 1e-9
    }

    /// Queue a notification. At most `MAX_PENDING_EVENTS` stay pending;
    /// the oldest is dropped when the queue is full.
    pub(crate) fn push_event(&mut self, event: LabEvent) {
        if self.events.len() >= config::MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Drain pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<LabEvent> {
        self.events.drain(..).collect()
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn beaker(&self) -> &Beaker {
        &self.beaker
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn solute_form(&self) -> SoluteForm {
        self.solute_form
    }

    pub fn shaker(&self) -> &Shaker {
        &self.shaker
    }

    pub fn dropper(&self) -> &Dropper {
        &self.dropper
    }

    pub fn solvent_faucet(&self) -> &Faucet {
        &self.solvent_faucet
    }

    pub fn drain_faucet(&self) -> &Faucet {
        &self.drain_faucet
    }

    pub fn evaporator(&self) -> &Evaporator {
        &self.evaporator
    }

    pub fn shaker_particles(&self) -> &ShakerParticles {
        &self.shaker_particles
    }

    pub fn precipitate(&self) -> &Precipitate {
        &self.precipitate
    }

    pub fn meter(&self) -> &ConcentrationMeter {
        &self.meter
    }

    pub fn beers_law(&self) -> &BeersLawModel {
        &self.beers_law
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Height of the fluid surface above the beaker floor.
    pub fn fill_height(&self) -> f32 {
        self.beaker.fill_height(self.solution.volume())
    }

    pub fn surface_y(&self) -> f32 {
        self.beaker.surface_y(self.solution.volume())
    }

    pub fn probe_position(&self) -> Vec2 {
        self.meter.probe_position()
    }
}
