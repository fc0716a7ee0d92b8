//! Colony Core - Space Colony Simulation Engine
//!
//! A day-by-day simulation of a small space colony: colonists with roles,
//! buildings that produce and consume resources, a shared resource ledger,
//! and random events that perturb the whole colony.
//!
//! # Architecture
//!
//! - **Components**: plain data with clamped mutators (Resource, Colonist, Building)
//! - **Systems**: the passes of a simulated day (power, production, colonists,
//!   maintenance, events)
//! - **Engine**: [`Colony`](engine::Colony) owns every entity and runs the
//!   passes in a fixed order
//!
//! # Example
//!
//! ```rust,no_run
//! use colony_core::prelude::*;
//!
//! let mut colony = Colony::with_seed("New Hope", 42);
//!
//! for line in colony.advance_day() {
//!     println!("{line}");
//! }
//!
//! match colony.build_new_building(BuildingKind::Farm, 2) {
//!     Ok(message) => println!("{message}"),
//!     Err(err) => println!("{err}"),
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod status;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::ColonyConfig;
    pub use crate::engine::Colony;
    pub use crate::error::{ColonyError, Result};
    pub use crate::status::ColonyStatus;
    pub use crate::systems::EventKind;
}
