// simulation/mod.rs
// The concentration model and its per-frame sub-steps

pub mod collision;
pub mod fluids;
pub mod simulation;
pub use simulation::*;

use serde::{Deserialize, Serialize};

/// Whether solute is added as solid grains or as stock solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoluteForm {
    /// The shaker is the active emitter
    Solid,
    /// The dropper is the active emitter
    Solution,
}

/// One-way notifications for collaborators such as a sound layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabEvent {
    /// Falling grains that dissolved on reaching the surface during one step
    GrainsDissolved { count: usize },
    /// Precipitate grains appeared on the floor
    PrecipitateFormed { count: usize },
    /// Precipitate grains went back into solution or were cleared
    PrecipitateDissolved { count: usize },
    BeakerFull,
    BeakerEmpty,
}
