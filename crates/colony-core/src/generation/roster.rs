//! Founding roster and arrival generation

use rand::seq::SliceRandom;
use rand::Rng;

use super::names::generate_name;
use crate::components::{Building, Colonist, Role};
use crate::config::ColonyConfig;

/// Instantiate the config's starting buildings, in order
pub fn generate_buildings(config: &ColonyConfig) -> Vec<Building> {
    config
        .starting_buildings
        .iter()
        .map(|spec| Building::new(spec.kind, spec.size))
        .collect()
}

/// Instantiate the config's starting colonists, rolling unset skill levels
pub fn generate_colonists(config: &ColonyConfig, rng: &mut impl Rng) -> Vec<Colonist> {
    config
        .starting_colonists
        .iter()
        .map(|spec| match spec.skill_level {
            Some(skill) => Colonist::new(spec.name.clone(), spec.role, skill),
            None => Colonist::random(spec.name.clone(), spec.role, rng),
        })
        .collect()
}

/// A newcomer with a random role, name and skill
pub fn generate_arrival(rng: &mut impl Rng) -> Colonist {
    let role = *Role::ALL.choose(rng).unwrap_or(&Role::Engineer);
    let name = generate_name(rng);
    Colonist::random(name, role, rng)
}
