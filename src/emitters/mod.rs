// emitters/mod.rs
// Things that put material into the beaker or take it out.
//
// Each emitter is composed from the same small set of capabilities
// (a draggable position, an on/off flag, a flow rate) instead of sharing
// a base type.

mod dropper;
mod evaporator;
mod faucet;
mod shaker;

pub use dropper::Dropper;
pub use evaporator::Evaporator;
pub use faucet::Faucet;
pub use shaker::Shaker;

use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

/// Axis-aligned rectangle a draggable position is confined to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl DragBounds {
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self {
            min: Vec2::new(min[0], min[1]),
            max: Vec2::new(max[0], max[1]),
        }
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamped(self.min, self.max)
    }
}

/// A position that can only be dragged within its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movable {
    position: Vec2,
    pub bounds: DragBounds,
}

impl Movable {
    pub fn new(position: [f32; 2], bounds: DragBounds) -> Self {
        let position = bounds.clamp(Vec2::new(position[0], position[1]));
        Self { position, bounds }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move towards `target`, clamped to the drag bounds. Returns the
    /// position actually taken.
    pub fn move_to(&mut self, target: Vec2) -> Vec2 {
        self.position = self.bounds.clamp(target);
        self.position
    }
}

/// Vertical column of falling fluid below an outlet, used by the
/// concentration meter to decide what the probe is dipped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidStream {
    pub x: f32,
    pub half_width: f32,
    pub top: f32,
    pub bottom: f32,
}

impl FluidStream {
    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.x).abs() <= self.half_width && point.y <= self.top && point.y >= self.bottom
    }
}
