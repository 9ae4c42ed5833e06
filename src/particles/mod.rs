// particles/mod.rs
// Solid grains: falling from the shaker, and settled on the beaker floor.

mod precipitate;
mod shaker_particles;

pub use precipitate::{Precipitate, PrecipitateParticle};
pub use shaker_particles::{Landing, ShakerParticle, ShakerParticles};

use ultraviolet::Vec2;

use crate::solute::SoluteId;

/// Read access shared by both kinds of grain.
pub trait Particle {
    fn position(&self) -> Vec2;
    fn orientation(&self) -> f32;
    fn solute(&self) -> SoluteId;
}

/// An owned, ordered collection of grains.
pub trait ParticleCollection {
    type Item: Particle;

    fn particles(&self) -> &[Self::Item];

    fn clear(&mut self);

    fn len(&self) -> usize {
        self.particles().len()
    }

    fn is_empty(&self) -> bool {
        self.particles().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.particles().iter()
    }
}
