//! Component definitions for the colony simulation.
//!
//! Components are data structs with small, clamped mutators. Cross-entity
//! behavior lives in systems.

mod building;
mod colonist;
mod resources;

pub use building::*;
pub use colonist::*;
pub use resources::*;
