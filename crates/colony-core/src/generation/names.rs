//! Name generation for new arrivals

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a random given name for a colonist
pub fn generate_name(rng: &mut impl Rng) -> &'static str {
    ARRIVAL_NAMES.choose(rng).copied().unwrap_or("Newcomer")
}

static ARRIVAL_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Avery", "Quinn", "Dakota", "Reese",
    "Skyler", "Finley", "Sage", "Blair",
];
