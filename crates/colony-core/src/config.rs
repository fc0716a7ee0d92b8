//! Colony configuration: starting stocks, rosters and tuning knobs.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```
//! use colony_core::config::ColonyConfig;
//!
//! let config: ColonyConfig = serde_json::from_str(r#"{ "seed": 7, "event_chance": 0.5 }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.starting_food, 30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::components::{BuildingKind, Role, DEFAULT_SPOILAGE_RATE, MAX_BUILDING_SIZE};
use crate::error::{ColonyError, Result};

/// Chance per day that a random event fires
pub const DEFAULT_EVENT_CHANCE: f64 = 0.15;

/// A building to place at colony founding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub kind: BuildingKind,
    /// Size, or capacity for habitats
    pub size: u32,
}

/// A colonist present at colony founding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonistSpec {
    pub name: String,
    pub role: Role,
    /// Fixed skill; rolled 1..=10 when absent
    #[serde(default)]
    pub skill_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Seed for the colony's random source; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub starting_food: f32,
    pub starting_water: f32,
    pub starting_oxygen: f32,
    pub starting_materials: f32,
    /// Probability of a random event per day (0.0-1.0)
    pub event_chance: f64,
    /// Fraction of stored food lost per day (0.0-1.0)
    pub spoilage_rate: f32,
    pub starting_buildings: Vec<BuildingSpec>,
    pub starting_colonists: Vec<ColonistSpec>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_food: 30.0,
            starting_water: 40.0,
            starting_oxygen: 20.0,
            starting_materials: 50.0,
            event_chance: DEFAULT_EVENT_CHANCE,
            spoilage_rate: DEFAULT_SPOILAGE_RATE,
            starting_buildings: vec![
                BuildingSpec::new(BuildingKind::Habitat, 5),
                BuildingSpec::new(BuildingKind::Farm, 2),
                BuildingSpec::new(BuildingKind::Laboratory, 2),
                BuildingSpec::new(BuildingKind::Mine, 2),
                BuildingSpec::new(BuildingKind::SolarPanel, 2),
                BuildingSpec::new(BuildingKind::OxygenGenerator, 2),
                BuildingSpec::new(BuildingKind::WaterReclaimer, 2),
            ],
            starting_colonists: vec![
                ColonistSpec::new("Alice", Role::Engineer),
                ColonistSpec::new("Bob", Role::Scientist),
                ColonistSpec::new("Charlie", Role::Farmer),
                ColonistSpec::new("David", Role::Miner),
            ],
        }
    }
}

impl BuildingSpec {
    pub fn new(kind: BuildingKind, size: u32) -> Self {
        Self { kind, size }
    }
}

impl ColonistSpec {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            skill_level: None,
        }
    }
}

impl ColonyConfig {
    /// A colony with stocks but no buildings and no colonists.
    pub fn empty() -> Self {
        Self {
            starting_buildings: Vec::new(),
            starting_colonists: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_event_chance(mut self, chance: f64) -> Self {
        self.event_chance = chance;
        self
    }

    /// Check value ranges before a colony is built from this config.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(ColonyError::InvalidConfig(format!(
                "event_chance must be within 0..=1 (got {})",
                self.event_chance
            )));
        }
        if !(0.0..=1.0).contains(&self.spoilage_rate) {
            return Err(ColonyError::InvalidConfig(format!(
                "spoilage_rate must be within 0..=1 (got {})",
                self.spoilage_rate
            )));
        }

        let stocks = [
            ("starting_food", self.starting_food),
            ("starting_water", self.starting_water),
            ("starting_oxygen", self.starting_oxygen),
            ("starting_materials", self.starting_materials),
        ];
        for (field, value) in stocks {
            if !value.is_finite() || value < 0.0 {
                return Err(ColonyError::InvalidConfig(format!(
                    "{field} must be a non-negative number (got {value})"
                )));
            }
        }

        if let Some(spec) = self
            .starting_buildings
            .iter()
            .find(|b| !(1..=MAX_BUILDING_SIZE).contains(&b.size))
        {
            return Err(ColonyError::InvalidConfig(format!(
                "{} has size {}, expected 1..={MAX_BUILDING_SIZE}",
                spec.kind, spec.size
            )));
        }

        Ok(())
    }
}
