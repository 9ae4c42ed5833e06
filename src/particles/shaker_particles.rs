use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::{Particle, ParticleCollection};
use crate::beaker::Beaker;
use crate::config;
use crate::solute::SoluteId;

/// A solid grain in flight between the shaker and the fluid surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShakerParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub orientation: f32,
    /// Tumbling rate (rad/s)
    pub spin: f32,
    pub solute: SoluteId,
    pub size: f32,
}

impl ShakerParticle {
    /// Spawn a grain at the shaker opening with randomized offset,
    /// orientation and spin.
    pub fn emit(
        origin: Vec2,
        shaker_orientation: f32,
        speed: f32,
        gravity: f32,
        solute: SoluteId,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let offset = (rng.f32() * 2.0 - 1.0) * config::SHAKER_MAX_X_OFFSET;
        let (sin, cos) = shaker_orientation.sin_cos();
        Self {
            position: origin + Vec2::new(offset, 0.0),
            velocity: Vec2::new(cos, sin) * speed,
            acceleration: Vec2::new(0.0, -gravity),
            orientation: rng.f32() * std::f32::consts::TAU,
            spin: (rng.f32() * 2.0 - 1.0) * config::SHAKER_MAX_SPIN,
            solute,
            size: solute.particle_size(),
        }
    }

    /// Semi-implicit Euler step. Below the rim, grains inside the beaker
    /// bounce off the inner side of the walls and grains beside it bounce
    /// off the outer side. Above the rim nothing is in the way.
    fn integrate(&mut self, dt: f32, beaker: &Beaker) {
        let half = self.size / 2.0;
        let min_x = beaker.left() + half;
        let max_x = beaker.right() - half;
        let previous = self.position;

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.orientation = (self.orientation + self.spin * dt).rem_euclid(std::f32::consts::TAU);

        if self.position.y > beaker.top() {
            return;
        }
        if (min_x..=max_x).contains(&previous.x) {
            if self.position.x < min_x || self.position.x > max_x {
                let wall = if self.position.x < min_x { min_x } else { max_x };
                self.position.x = (2.0 * wall - self.position.x).clamp(min_x, max_x);
                self.velocity.x = -self.velocity.x;
            }
        } else if previous.y <= beaker.top()
            && (previous.x < beaker.left() || previous.x > beaker.right())
            && self.position.x >= beaker.left()
            && self.position.x <= beaker.right()
        {
            let wall = if previous.x < beaker.left() { beaker.left() } else { beaker.right() };
            self.position.x = 2.0 * wall - self.position.x;
            self.velocity.x = -self.velocity.x;
        }
    }
}

impl Particle for ShakerParticle {
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

/// A grain that reached the fluid surface during a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    pub position: Vec2,
    pub solute: SoluteId,
}

/// Grains currently falling from the shaker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShakerParticles {
    particles: Vec<ShakerParticle>,
}

impl ShakerParticles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, particle: ShakerParticle) {
        self.particles.push(particle);
    }

    /// Total solute carried by grains still in the air (mol).
    pub fn amount_in_flight(&self) -> f64 {
        self.particles.iter().map(|p| p.solute.moles_per_particle()).sum()
    }

    /// Advance every grain by `dt`. Grains over the beaker that reach the
    /// surface `surface_y` are removed and returned in emission order;
    /// grains that missed the beaker are removed once below its floor.
    pub fn step(&mut self, dt: f32, beaker: &Beaker, surface_y: f32) -> Vec<Landing> {
        let mut landed = Vec::new();
        self.particles.retain_mut(|p| {
            p.integrate(dt, beaker);
            let over_beaker = p.position.x >= beaker.left() && p.position.x <= beaker.right();
            if over_beaker && p.position.y <= surface_y {
                landed.push(Landing {
                    position: Vec2::new(p.position.x, surface_y),
                    solute: p.solute,
                });
                false
            } else {
                over_beaker || p.position.y >= beaker.bottom()
            }
        });
        landed
    }
}

impl ParticleCollection for ShakerParticles {
    type Item = ShakerParticle;

    fn particles(&self) -> &[ShakerParticle] {
        &self.particles
    }

    fn clear(&mut self) {
        self.particles.clear();
    }
}
