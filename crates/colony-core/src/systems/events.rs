//! Events system - random one-shot perturbations of the colony
//!
//! An event is stateless. It is picked from a fixed catalog, executed once
//! against the colony's rosters and ledger, and leaves behind a message.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{
    total_capacity, Building, Colonist, ResourceKind, ResourceLedger, Role, OPERATIONAL_THRESHOLD,
};
use crate::generation::generate_arrival;

/// Types of events that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A random building takes impact damage
    MeteorStrike,
    /// Solar panels dusted over, morale down
    DustStorm,
    /// Food, water and materials windfall
    SupplyDrop,
    /// Someone asks to join, space permitting
    NewColonist,
    /// An operational building breaks down
    EquipmentMalfunction,
    /// Part of the crew falls ill
    DiseaseOutbreak,
    /// A deposit of materials or water is found
    ResourceDiscovery,
}

/// Mutable view of everything an event may touch
pub struct EventTarget<'a> {
    pub buildings: &'a mut Vec<Building>,
    pub colonists: &'a mut Vec<Colonist>,
    pub resources: &'a mut ResourceLedger,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::MeteorStrike,
        EventKind::DustStorm,
        EventKind::SupplyDrop,
        EventKind::NewColonist,
        EventKind::EquipmentMalfunction,
        EventKind::DiseaseOutbreak,
        EventKind::ResourceDiscovery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::MeteorStrike => "Meteor Strike",
            EventKind::DustStorm => "Dust Storm",
            EventKind::SupplyDrop => "Supply Drop",
            EventKind::NewColonist => "New Arrival",
            EventKind::EquipmentMalfunction => "Equipment Malfunction",
            EventKind::DiseaseOutbreak => "Disease Outbreak",
            EventKind::ResourceDiscovery => "Resource Discovery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::MeteorStrike => "A meteor is heading toward your colony!",
            EventKind::DustStorm => "A powerful dust storm is sweeping through the colony!",
            EventKind::SupplyDrop => "A supply ship from Earth has arrived with resources!",
            EventKind::NewColonist => "A new colonist has arrived from Earth!",
            EventKind::EquipmentMalfunction => "Critical equipment malfunction detected!",
            EventKind::DiseaseOutbreak => "A mysterious illness is spreading among colonists!",
            EventKind::ResourceDiscovery => {
                "Your colonists have discovered a valuable resource deposit!"
            }
        }
    }

    /// Pick one event uniformly from the catalog
    pub fn random(rng: &mut impl Rng) -> EventKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Apply the event and describe what happened.
    pub fn execute(&self, target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
        match self {
            EventKind::MeteorStrike => meteor_strike(target, rng),
            EventKind::DustStorm => dust_storm(target),
            EventKind::SupplyDrop => supply_drop(target, rng),
            EventKind::NewColonist => new_colonist(target, rng),
            EventKind::EquipmentMalfunction => equipment_malfunction(target, rng),
            EventKind::DiseaseOutbreak => disease_outbreak(target, rng),
            EventKind::ResourceDiscovery => resource_discovery(target, rng),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name(), self.description())
    }
}

fn meteor_strike(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    let Some(building) = target.buildings.choose_mut(rng) else {
        return "No buildings were damaged as your colony has no structures.".to_string();
    };

    let damage: u32 = rng.gen_range(20..=50);
    let before = building.condition();
    building.apply_damage(damage as f32);

    // Only a strike that pushes condition past the threshold counts
    let knocked_out =
        before > OPERATIONAL_THRESHOLD && building.condition() <= OPERATIONAL_THRESHOLD;
    if knocked_out {
        format!(
            "A meteor struck your {}! It took {}% damage and is now non-operational.",
            building.name(),
            damage
        )
    } else {
        format!(
            "A meteor struck your {}! It took {}% damage but remains operational.",
            building.name(),
            damage
        )
    }
}

fn dust_storm(target: &mut EventTarget<'_>) -> String {
    let mut results = Vec::new();

    let mut panels = 0;
    for building in target.buildings.iter_mut().filter(|b| b.is_solar()) {
        building.cover_with_dust();
        panels += 1;
    }
    if panels > 0 {
        results.push(format!(
            "{panels} solar panels were covered with dust, reducing efficiency."
        ));
    }

    let mut affected = 0;
    for colonist in target.colonists.iter_mut().filter(|c| c.is_alive()) {
        colonist.adjust_happiness(-10.0);
        affected += 1;
    }
    if affected > 0 {
        results.push(format!(
            "The storm has decreased morale among {affected} colonists."
        ));
    }

    if results.is_empty() {
        "The dust storm passed without significant effect.".to_string()
    } else {
        results.join(" ")
    }
}

fn supply_drop(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    let food: u32 = rng.gen_range(20..=50);
    let water: u32 = rng.gen_range(15..=40);
    let materials: u32 = rng.gen_range(10..=30);

    target.resources.food.credit(food as f32);
    target.resources.water.credit(water as f32);
    target.resources.materials.credit(materials as f32);

    for colonist in target.colonists.iter_mut().filter(|c| c.is_alive()) {
        colonist.boost_happiness(15.0);
    }

    format!(
        "Supply drop received! Added {food} Food, {water} Water, and {materials} Materials. Colonist morale improved."
    )
}

fn new_colonist(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    let capacity = total_capacity(target.buildings);
    if target.colonists.len() >= capacity as usize {
        return "A new colonist arrived but had to be turned away due to insufficient habitat space."
            .to_string();
    }

    let arrival = generate_arrival(rng);
    let message = format!(
        "{} the {} has joined your colony!",
        arrival.name(),
        arrival.role().name()
    );
    target.colonists.push(arrival);
    message
}

fn equipment_malfunction(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    if target.buildings.is_empty() {
        return "No buildings were affected as your colony has no structures.".to_string();
    }

    let operational: Vec<usize> = target
        .buildings
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_operational())
        .map(|(i, _)| i)
        .collect();
    let Some(&idx) = operational.choose(rng) else {
        return "No operational buildings were affected.".to_string();
    };

    let building = &mut target.buildings[idx];
    building.malfunction();

    let engineers = count_living(target.colonists, Role::Engineer);
    let engineer_text = if engineers > 0 {
        format!(" {engineers} engineer(s) have been notified and are working on repairs.")
    } else {
        " You have no engineers to perform immediate repairs.".to_string()
    };

    format!(
        "Critical malfunction in the {}! It's now non-operational.{}",
        building.name(),
        engineer_text
    )
}

fn disease_outbreak(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    let living: Vec<usize> = target
        .colonists
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive())
        .map(|(i, _)| i)
        .collect();
    if living.is_empty() {
        return "There are no living colonists to be affected by the disease.".to_string();
    }

    let fraction: f64 = rng.gen_range(0.3..0.7);
    let sick_count = ((living.len() as f64 * fraction) as usize).clamp(1, living.len());

    for pick in index::sample(rng, living.len(), sick_count) {
        let loss: u32 = rng.gen_range(10..=30);
        let colonist = &mut target.colonists[living[pick]];
        colonist.sicken(loss as f32);
        colonist.adjust_happiness(-20.0);
    }

    format!(
        "Disease outbreak! {sick_count} colonists have fallen ill, reducing their health and happiness."
    )
}

fn resource_discovery(target: &mut EventTarget<'_>, rng: &mut impl Rng) -> String {
    let kind = if rng.gen_bool(0.5) {
        ResourceKind::Materials
    } else {
        ResourceKind::Water
    };
    let amount: u32 = rng.gen_range(30..=100);
    target.resources.get_mut(kind).credit(amount as f32);

    let mut scientists = 0;
    for colonist in target
        .colonists
        .iter_mut()
        .filter(|c| c.is_alive() && c.role() == Role::Scientist)
    {
        colonist.boost_happiness(10.0);
        scientists += 1;
    }
    let scientist_text = if scientists > 0 {
        " Your scientists are excited about studying the discovery!"
    } else {
        ""
    };

    format!(
        "Resource discovery! {amount} units of {} have been added to your stockpile.{scientist_text}",
        kind.name()
    )
}

fn count_living(colonists: &[Colonist], role: Role) -> usize {
    colonists
        .iter()
        .filter(|c| c.is_alive() && c.role() == role)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BuildingKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        buildings: Vec<Building>,
        colonists: Vec<Colonist>,
        resources: ResourceLedger,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                buildings: vec![
                    Building::new(BuildingKind::Habitat, 5),
                    Building::new(BuildingKind::SolarPanel, 2),
                    Building::new(BuildingKind::Farm, 2),
                ],
                colonists: vec![
                    Colonist::new("Alice", Role::Engineer, 5),
                    Colonist::new("Bob", Role::Scientist, 5),
                    Colonist::new("Charlie", Role::Farmer, 5),
                    Colonist::new("David", Role::Miner, 5),
                ],
                resources: ResourceLedger::default(),
            }
        }

        fn empty() -> Self {
            Self {
                buildings: Vec::new(),
                colonists: Vec::new(),
                resources: ResourceLedger::default(),
            }
        }

        fn run(&mut self, kind: EventKind, seed: u64) -> String {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut target = EventTarget {
                buildings: &mut self.buildings,
                colonists: &mut self.colonists,
                resources: &mut self.resources,
            };
            kind.execute(&mut target, &mut rng)
        }
    }

    #[test]
    fn test_every_event_handles_empty_colony() {
        for kind in EventKind::ALL {
            let mut fixture = Fixture::empty();
            let message = fixture.run(kind, 42);
            assert!(!message.is_empty(), "{kind:?} returned an empty message");
        }
    }

    #[test]
    fn test_meteor_strike_damages_one_building() {
        let mut fixture = Fixture::new();
        let message = fixture.run(EventKind::MeteorStrike, 42);

        let damaged: Vec<f32> = fixture
            .buildings
            .iter()
            .map(|b| b.condition())
            .filter(|c| *c < 100.0)
            .collect();
        assert_eq!(damaged.len(), 1);
        assert!((50.0..=80.0).contains(&damaged[0]));
        assert!(message.contains("remains operational"));
    }

    #[test]
    fn test_meteor_message_tracks_threshold_crossing() {
        // Unpowered but sound: the strike alone does not knock it out
        let mut fixture = Fixture::new();
        fixture.buildings = vec![Building::new(BuildingKind::Farm, 2)];
        fixture.buildings[0].update_day(false);
        assert!(!fixture.buildings[0].is_operational());
        let message = fixture.run(EventKind::MeteorStrike, 42);
        assert!(message.contains("remains operational"), "{message}");

        // From 40, any 20..=50 hit lands at or below the threshold
        let mut fixture = Fixture::new();
        fixture.buildings = vec![Building::new(BuildingKind::Farm, 2)];
        fixture.buildings[0].apply_damage(60.0);
        let message = fixture.run(EventKind::MeteorStrike, 42);
        assert!(fixture.buildings[0].condition() <= OPERATIONAL_THRESHOLD);
        assert!(message.contains("now non-operational"), "{message}");
    }

    #[test]
    fn test_dust_storm() {
        let mut fixture = Fixture::new();
        let message = fixture.run(EventKind::DustStorm, 42);

        assert_eq!(fixture.buildings[1].condition(), 85.0);
        assert_eq!(fixture.buildings[2].condition(), 100.0);
        assert!(fixture.colonists.iter().all(|c| c.happiness() == 60.0));
        assert!(message.contains("1 solar panels"));
    }

    #[test]
    fn test_supply_drop_ranges() {
        let mut fixture = Fixture::new();
        fixture.run(EventKind::SupplyDrop, 42);

        let r = &fixture.resources;
        assert!((50.0..=80.0).contains(&r.food.quantity()));
        assert!((55.0..=80.0).contains(&r.water.quantity()));
        assert!((60.0..=80.0).contains(&r.materials.quantity()));
        assert_eq!(r.oxygen.quantity(), 20.0);
        assert!(fixture.colonists.iter().all(|c| c.happiness() == 85.0));
    }

    #[test]
    fn test_new_colonist_respects_capacity() {
        let mut fixture = Fixture::new();
        fixture.run(EventKind::NewColonist, 42);
        assert_eq!(fixture.colonists.len(), 5);

        let message = fixture.run(EventKind::NewColonist, 43);
        assert_eq!(fixture.colonists.len(), 5);
        assert!(message.contains("turned away"));
    }

    #[test]
    fn test_malfunction_hits_operational_building() {
        let mut fixture = Fixture::new();
        let message = fixture.run(EventKind::EquipmentMalfunction, 42);

        let broken: Vec<&Building> = fixture
            .buildings
            .iter()
            .filter(|b| !b.is_operational())
            .collect();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].condition(), 70.0);
        assert!(message.contains("1 engineer(s)"));
    }

    #[test]
    fn test_malfunction_without_operational_buildings() {
        let mut fixture = Fixture::new();
        for building in &mut fixture.buildings {
            building.apply_damage(90.0);
        }
        let message = fixture.run(EventKind::EquipmentMalfunction, 42);
        assert_eq!(message, "No operational buildings were affected.");
    }

    #[test]
    fn test_disease_outbreak() {
        let mut fixture = Fixture::new();
        fixture.run(EventKind::DiseaseOutbreak, 42);

        let sick: Vec<&Colonist> = fixture
            .colonists
            .iter()
            .filter(|c| c.health() < 100.0)
            .collect();
        // 4 colonists * 0.3..0.7 rounds down to 1 or 2
        assert!((1..=2).contains(&sick.len()));
        for colonist in sick {
            assert!((70.0..=90.0).contains(&colonist.health()));
            assert_eq!(colonist.happiness(), 50.0);
            assert!(colonist.is_alive());
        }
    }

    #[test]
    fn test_disease_skips_the_dead() {
        let mut fixture = Fixture::new();
        for colonist in fixture.colonists.iter_mut().skip(1) {
            colonist.adjust_health(-100.0);
        }
        fixture.run(EventKind::DiseaseOutbreak, 7);
        assert!(fixture.colonists[0].health() < 100.0);
    }

    #[test]
    fn test_resource_discovery() {
        let mut fixture = Fixture::new();
        let message = fixture.run(EventKind::ResourceDiscovery, 42);

        let gained = fixture.resources.materials.quantity() - 50.0
            + fixture.resources.water.quantity()
            - 40.0;
        assert!((30.0..=100.0).contains(&gained));
        assert_eq!(fixture.colonists[1].happiness(), 80.0);
        assert_eq!(fixture.colonists[0].happiness(), 70.0);
        assert!(message.contains("scientists are excited"));
    }

    #[test]
    fn test_random_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(EventKind::random(&mut rng));
        }
        assert_eq!(seen.len(), EventKind::ALL.len());
    }
}
