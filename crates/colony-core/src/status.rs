//! Read-only colony status snapshot

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{
    total_capacity, Building, BuildingKind, Colonist, ResourceKind, ResourceLedger,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonistSummary {
    /// Roster size, dead included until the next mortality sweep
    pub total: usize,
    pub alive: usize,
    pub avg_health: f32,
    pub avg_happiness: f32,
    pub habitat_capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub amount: f32,
    pub production: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingCount {
    pub total: usize,
    pub operational: usize,
}

/// Everything a display layer needs, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyStatus {
    pub name: String,
    pub day: u32,
    pub colonists: ColonistSummary,
    pub resources: BTreeMap<ResourceKind, ResourceSnapshot>,
    pub buildings: BTreeMap<BuildingKind, BuildingCount>,
    pub research_points: f32,
}

impl ColonyStatus {
    pub fn capture(
        name: &str,
        day: u32,
        colonists: &[Colonist],
        buildings: &[Building],
        resources: &ResourceLedger,
        research_points: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            day,
            colonists: summarize_colonists(colonists, buildings),
            resources: resources
                .iter()
                .map(|r| {
                    (
                        r.kind(),
                        ResourceSnapshot {
                            amount: r.quantity(),
                            production: r.production_rate(),
                        },
                    )
                })
                .collect(),
            buildings: count_buildings(buildings),
            research_points,
        }
    }

    pub fn resource(&self, kind: ResourceKind) -> Option<&ResourceSnapshot> {
        self.resources.get(&kind)
    }

    pub fn building(&self, kind: BuildingKind) -> BuildingCount {
        self.buildings.get(&kind).copied().unwrap_or_default()
    }
}

fn summarize_colonists(colonists: &[Colonist], buildings: &[Building]) -> ColonistSummary {
    let living: Vec<&Colonist> = colonists.iter().filter(|c| c.is_alive()).collect();
    let (avg_health, avg_happiness) = if living.is_empty() {
        (0.0, 0.0)
    } else {
        let n = living.len() as f32;
        (
            living.iter().map(|c| c.health()).sum::<f32>() / n,
            living.iter().map(|c| c.happiness()).sum::<f32>() / n,
        )
    };

    ColonistSummary {
        total: colonists.len(),
        alive: living.len(),
        avg_health,
        avg_happiness,
        habitat_capacity: total_capacity(buildings),
    }
}

fn count_buildings(buildings: &[Building]) -> BTreeMap<BuildingKind, BuildingCount> {
    let mut counts: BTreeMap<BuildingKind, BuildingCount> = BTreeMap::new();
    for building in buildings {
        let entry = counts.entry(building.kind()).or_default();
        entry.total += 1;
        if building.is_operational() {
            entry.operational += 1;
        }
    }
    counts
}

impl std::fmt::Display for ColonyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} - Day {} ===", self.name, self.day)?;
        writeln!(
            f,
            "Colonists: {}/{} alive (capacity {}), avg health {:.1}, avg happiness {:.1}",
            self.colonists.alive,
            self.colonists.total,
            self.colonists.habitat_capacity,
            self.colonists.avg_health,
            self.colonists.avg_happiness
        )?;
        for (kind, snapshot) in &self.resources {
            writeln!(
                f,
                "  {}: {:.1} (+{:.1}/day)",
                kind.name(),
                snapshot.amount,
                snapshot.production
            )?;
        }
        for (kind, count) in &self.buildings {
            writeln!(f, "  {}: {}/{} operational", kind, count.operational, count.total)?;
        }
        write!(f, "Research: {:.1}", self.research_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Role;

    #[test]
    fn test_capture() {
        let colonists = vec![
            Colonist::new("Alice", Role::Engineer, 5),
            Colonist::new("Bob", Role::Scientist, 5),
        ];
        let mut buildings = vec![
            Building::new(BuildingKind::Habitat, 5),
            Building::new(BuildingKind::Farm, 2),
            Building::new(BuildingKind::Farm, 1),
        ];
        buildings[2].apply_damage(90.0);

        let status = ColonyStatus::capture(
            "Test",
            3,
            &colonists,
            &buildings,
            &ResourceLedger::default(),
            12.5,
        );

        assert_eq!(status.day, 3);
        assert_eq!(status.colonists.alive, 2);
        assert_eq!(status.colonists.habitat_capacity, 5);
        assert_eq!(status.colonists.avg_happiness, 70.0);
        assert_eq!(
            status.building(BuildingKind::Farm),
            BuildingCount {
                total: 2,
                operational: 1
            }
        );
        assert_eq!(status.building(BuildingKind::Mine), BuildingCount::default());
        assert_eq!(status.resource(ResourceKind::Food).unwrap().amount, 30.0);
        assert_eq!(status.resources.len(), 5);
    }

    #[test]
    fn test_empty_colony_averages() {
        let status = ColonyStatus::capture("Empty", 1, &[], &[], &ResourceLedger::default(), 0.0);
        assert_eq!(status.colonists.avg_health, 0.0);
        assert_eq!(status.colonists.total, 0);
        assert!(status.buildings.is_empty());
    }
}
