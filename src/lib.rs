pub mod beaker;
pub mod beers_law;
pub mod color;
pub mod commands;
pub mod config;
pub mod emitters;
pub mod error;
pub mod io;
pub mod meter;
pub mod particles;
pub mod simulation;
pub mod snapshot;
pub mod solute;
pub mod solution;
pub mod utils;

pub use commands::LabCommand;
pub use error::{LabError, Result};
pub use simulation::{ConcentrationModel, LabEvent, SoluteForm};
pub use solute::SoluteId;
