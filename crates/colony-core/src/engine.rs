//! Simulation engine - owns the colony and advances it one day at a time

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::*;
use crate::config::ColonyConfig;
use crate::error::{ColonyError, Result};
use crate::generation::{generate_buildings, generate_colonists};
use crate::status::ColonyStatus;
use crate::systems::*;

/// A colony and everything in it
#[derive(Debug, Clone)]
pub struct Colony {
    name: String,
    colonists: Vec<Colonist>,
    buildings: Vec<Building>,
    resources: ResourceLedger,
    /// Starts at 1, +1 per advance
    day: u32,
    research_points: f32,
    event_chance: f64,
    rng: StdRng,
}

impl Colony {
    /// Found a colony with the default roster and an entropy-seeded rng.
    pub fn new(name: impl Into<String>) -> Self {
        Self::found(name.into(), &ColonyConfig::default(), StdRng::from_entropy())
    }

    /// Found a colony with the default roster and a fixed seed.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::found(
            name.into(),
            &ColonyConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn from_config(name: impl Into<String>, config: &ColonyConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::found(name.into(), config, rng))
    }

    fn found(name: String, config: &ColonyConfig, mut rng: StdRng) -> Self {
        let mut resources = ResourceLedger::new(
            config.starting_food,
            config.starting_water,
            config.starting_oxygen,
            config.starting_materials,
        );
        resources.food = resources.food.with_spoilage_rate(config.spoilage_rate);

        let colonists = generate_colonists(config, &mut rng);
        let buildings = generate_buildings(config);

        log::info!(
            "Founded {name} with {} colonists and {} buildings",
            colonists.len(),
            buildings.len()
        );

        Self {
            name,
            colonists,
            buildings,
            resources,
            day: 1,
            research_points: 0.0,
            event_chance: config.event_chance,
            rng,
        }
    }

    // Accessors

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colonists(&self) -> &[Colonist] {
        &self.colonists
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn research_points(&self) -> f32 {
        self.research_points
    }

    pub fn event_chance(&self) -> f64 {
        self.event_chance
    }

    pub fn alive_colonists(&self) -> impl Iterator<Item = &Colonist> {
        self.colonists.iter().filter(|c| c.is_alive())
    }

    pub fn add_colonist(&mut self, colonist: Colonist) {
        self.colonists.push(colonist);
    }

    pub fn add_building(&mut self, building: Building) {
        self.buildings.push(building);
    }

    /// Advance one day using the colony's own random source.
    pub fn advance_day(&mut self) -> Vec<String> {
        let mut rng = self.rng.clone();
        let log = self.advance_day_with(&mut rng);
        self.rng = rng;
        log
    }

    /// Advance one day, drawing every random decision from `rng`.
    ///
    /// Never fails: starvation, blackouts and an empty colony are all
    /// ordinary outcomes that show up in the returned log.
    pub fn advance_day_with(&mut self, rng: &mut impl Rng) -> Vec<String> {
        self.day += 1;
        let mut log = vec![format!("=== Day {} ===", self.day)];
        self.resources.energy.reset_day();
        self.resources.energy.clear_production_rate();

        // Power
        let balance = energy_pass(&self.buildings, &mut self.resources.energy);
        log.push(format!("Energy production: {:.1} units.", balance.production));
        if !balance.is_sufficient() {
            log::warn!(
                "Day {}: energy shortage, {:.1} produced for {:.1} demand",
                self.day,
                balance.production,
                balance.demand
            );
            log.push(format!(
                "WARNING: Energy shortage! Producing {:.1} but need {:.1}",
                balance.production, balance.demand
            ));
        }

        // Buildings
        let totals = production_pass(&mut self.buildings, &balance, rng);
        for (kind, amount) in apply_production(&mut self.resources, &totals) {
            log.push(format!("{} production: {:.1} units", kind.name(), amount));
        }

        let spoiled = self.resources.food.update_day();
        if spoiled > 0.0 {
            log.push(format!("{spoiled:.1} units of food spoiled."));
        }

        // Colonists
        let feeding = feed_colonists(&mut self.colonists, &mut self.resources, totals.happiness);
        log.push(format!("Fed {}/{} colonists", feeding.fed, feeding.living));

        let work = colonist_work(&mut self.colonists, totals.research_boost);
        if work.research > 0.0 {
            self.research_points += work.research;
            log.push(format!("Research conducted: +{:.1} points", work.research));
        }
        log::debug!(
            "Day {}: farming labor {:.1}, mining labor {:.1} (unused)",
            self.day,
            work.farming,
            work.mining
        );

        let repaired = allocate_maintenance(&mut self.buildings, work.maintenance);
        if repaired > 0 {
            log.push(format!("Maintenance performed on {repaired} buildings"));
        }

        // Events
        if self.event_chance > 0.0 && rng.gen_bool(self.event_chance) {
            let event = EventKind::random(rng);
            let mut target = EventTarget {
                buildings: &mut self.buildings,
                colonists: &mut self.colonists,
                resources: &mut self.resources,
            };
            let outcome = event.execute(&mut target, rng);
            log::info!("Day {}: {} - {}", self.day, event.name(), outcome);
            log.push(format!("EVENT - {}: {}", event.name(), outcome));
        }

        // Mortality
        let before = self.colonists.len();
        self.colonists.retain(|c| c.is_alive());
        let died = before - self.colonists.len();
        if died > 0 {
            log::info!("Day {}: {} colonists died", self.day, died);
            log.push(format!("{died} colonists died today."));
        }

        log::info!(
            "Day {} complete: {} colonists, research {:.1}",
            self.day,
            self.colonists.len(),
            self.research_points
        );
        log
    }

    /// Spend Materials on a new building of `kind` at `size`.
    ///
    /// On failure nothing changes.
    pub fn build_new_building(&mut self, kind: BuildingKind, size: u32) -> Result<String> {
        if size == 0 || size > MAX_BUILDING_SIZE {
            return Err(ColonyError::InvalidSize);
        }

        let cost = kind.construction_cost(size);
        let available = self.resources.materials.quantity();
        if !self.resources.materials.consume(cost) {
            log::warn!("Cannot build {kind}: need {cost} materials, have {available}");
            return Err(ColonyError::InsufficientMaterials {
                needed: cost,
                available,
            });
        }

        self.buildings.push(Building::new(kind, size));
        log::info!("Built {kind} (size {size}) for {cost} materials");
        Ok(format!("Successfully built a new {}!", kind.name()))
    }

    /// Apply the upgrade that fits the building at `index`.
    ///
    /// Habitats gain comfort, farms efficiency and laboratories equipment.
    /// Returns false for other kinds, a bad index or a non-positive amount.
    pub fn upgrade_building(&mut self, index: usize, amount: f32) -> bool {
        let Some(building) = self.buildings.get_mut(index) else {
            return false;
        };
        let upgraded = match building.kind() {
            BuildingKind::Habitat => building.upgrade_comfort(amount),
            BuildingKind::Farm => building.boost_efficiency(amount),
            BuildingKind::Laboratory => building.upgrade_equipment(amount),
            _ => false,
        };
        if upgraded {
            log::info!("Upgraded {} by {amount}", building.name());
        }
        upgraded
    }

    /// Send the colonist at `colonist` to repair the building at `building`.
    ///
    /// Returns the condition restored; zero unless a living engineer was sent.
    pub fn repair_with(&mut self, colonist: usize, building: usize) -> f32 {
        let (Some(worker), Some(target)) = (
            self.colonists.get_mut(colonist),
            self.buildings.get_mut(building),
        ) else {
            return 0.0;
        };
        let repaired = worker.repair_building(target);
        if repaired > 0.0 {
            log::info!("{} repaired {} by {repaired:.1}", worker.name(), target.name());
        }
        repaired
    }

    /// Have the colonist at `colonist` tend the farm at `building`.
    ///
    /// Returns the efficiency gained; zero unless a living farmer tended a farm.
    pub fn tend_farm(&mut self, colonist: usize, building: usize) -> f32 {
        let (Some(worker), Some(farm)) = (
            self.colonists.get(colonist),
            self.buildings.get_mut(building),
        ) else {
            return 0.0;
        };
        let boost = worker.boost_food_production(farm);
        if boost > 0.0 {
            log::info!("{} boosted {} efficiency by {boost:.2}", worker.name(), farm.name());
        }
        boost
    }

    pub fn get_colony_status(&self) -> ColonyStatus {
        ColonyStatus::capture(
            &self.name,
            self.day,
            &self.colonists,
            &self.buildings,
            &self.resources,
            self.research_points,
        )
    }
}
