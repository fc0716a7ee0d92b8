//! Systems - the passes of a simulated day

mod colonists;
mod events;
mod maintenance;
mod power;
mod production;

pub use colonists::*;
pub use events::*;
pub use maintenance::*;
pub use power::*;
pub use production::*;
