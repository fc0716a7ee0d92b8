//! Generation - founding rosters and new arrivals

mod names;
mod roster;

pub use names::*;
pub use roster::*;
