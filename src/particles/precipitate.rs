use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::{Particle, ParticleCollection};
use crate::beaker::Beaker;
use crate::config;
use crate::solute::SoluteId;

/// A settled grain occupying one cell of the floor grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecipitateParticle {
    pub position: Vec2,
    pub orientation: f32,
    pub solute: SoluteId,
    pub column: usize,
    pub row: usize,
}

impl Particle for PrecipitateParticle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn orientation(&self) -> f32 {
        self.orientation
    }

    fn solute(&self) -> SoluteId {
        self.solute
    }
}

/// Grains lying on the beaker floor.
///
/// The grain count follows the precipitate amount. Grains are stacked on a
/// square grid one particle wide: a new grain goes to the lowest column,
/// ties broken by distance to a preferred column. Grains are removed
/// newest first, so every column stays gap-free.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitate {
    particles: Vec<PrecipitateParticle>,
}

impl Precipitate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grains that represent `amount` moles of `solute`.
    pub fn target_count(amount: f64, solute: SoluteId) -> usize {
        if amount <= config::PRECIPITATE_EPSILON {
            return 0;
        }
        ((amount * solute.particles_per_mole()).round() as usize).max(1)
    }

    /// Add or remove grains until there are exactly `target`. New grains
    /// prefer the column under `hint_x`, or a random column without a hint.
    /// Returns `(added, removed)`.
    pub fn reconcile(
        &mut self,
        target: usize,
        solute: SoluteId,
        beaker: &Beaker,
        hint_x: Option<f32>,
        rng: &mut fastrand::Rng,
    ) -> (usize, usize) {
        let removed = self.particles.len().saturating_sub(target);
        self.particles.truncate(target);

        let missing = target - self.particles.len();
        if missing == 0 {
            return (0, removed);
        }

        let size = solute.particle_size();
        let columns = ((beaker.size.x / size).floor() as usize).max(1);
        let mut heights = vec![0usize; columns];
        for p in &self.particles {
            if let Some(h) = heights.get_mut(p.column) {
                *h = (*h).max(p.row + 1);
            }
        }

        for _ in 0..missing {
            let preferred = match hint_x {
                Some(x) => (((x - beaker.left()) / size).floor().max(0.0) as usize).min(columns - 1),
                None => rng.usize(0..columns),
            };
            let column = (0..columns)
                .min_by_key(|&c| (heights[c], c.abs_diff(preferred)))
                .unwrap_or(preferred);
            let row = heights[column];
            heights[column] += 1;
            self.particles.push(PrecipitateParticle {
                position: Vec2::new(
                    beaker.left() + size * (column as f32 + 0.5),
                    beaker.bottom() + size * (row as f32 + 0.5),
                ),
                orientation: rng.f32() * std::f32::consts::TAU,
                solute,
                column,
                row,
            });
        }
        (missing, removed)
    }
}

impl ParticleCollection for Precipitate {
    type Item = PrecipitateParticle;

    fn particles(&self) -> &[PrecipitateParticle] {
        &self.particles
    }

    fn clear(&mut self) {
        self.particles.clear();
    }
}
