//! Building components: kinds, role payloads, condition and daily output.

use serde::{Deserialize, Serialize};

/// Buildings at or below this condition cannot operate
pub const OPERATIONAL_THRESHOLD: f32 = 20.0;

/// Largest size (capacity for habitats) a building may be built at
pub const MAX_BUILDING_SIZE: u32 = 1_000;

const MAX_CONDITION: f32 = 100.0;
const DAILY_WEAR: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Habitat,
    Farm,
    WaterReclaimer,
    OxygenGenerator,
    SolarPanel,
    Mine,
    Laboratory,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 7] = [
        BuildingKind::Habitat,
        BuildingKind::Farm,
        BuildingKind::WaterReclaimer,
        BuildingKind::OxygenGenerator,
        BuildingKind::SolarPanel,
        BuildingKind::Mine,
        BuildingKind::Laboratory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Habitat => "Habitat",
            BuildingKind::Farm => "Farm",
            BuildingKind::WaterReclaimer => "Water Reclaimer",
            BuildingKind::OxygenGenerator => "Oxygen Generator",
            BuildingKind::SolarPanel => "Solar Panel",
            BuildingKind::Mine => "Mine",
            BuildingKind::Laboratory => "Laboratory",
        }
    }

    /// Materials per unit of size (capacity for habitats)
    pub fn base_cost(&self) -> f32 {
        match self {
            BuildingKind::Habitat => 10.0,
            BuildingKind::Farm => 15.0,
            BuildingKind::WaterReclaimer => 20.0,
            BuildingKind::OxygenGenerator => 25.0,
            BuildingKind::SolarPanel => 15.0,
            BuildingKind::Mine => 20.0,
            BuildingKind::Laboratory => 30.0,
        }
    }

    /// Total Materials needed to build at `size`
    pub fn construction_cost(&self, size: u32) -> f32 {
        self.base_cost() * size as f32
    }

    /// What this building puts out when it operates
    pub fn output(&self) -> OutputKind {
        match self {
            BuildingKind::Habitat => OutputKind::Happiness,
            BuildingKind::Farm => OutputKind::Food,
            BuildingKind::WaterReclaimer => OutputKind::Water,
            BuildingKind::OxygenGenerator => OutputKind::Oxygen,
            BuildingKind::SolarPanel => OutputKind::Energy,
            BuildingKind::Mine => OutputKind::Materials,
            BuildingKind::Laboratory => OutputKind::ResearchBoost,
        }
    }
}

impl std::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Daily output categories: four storable resources, energy, and two soft effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    Food,
    Water,
    Oxygen,
    Materials,
    Energy,
    Happiness,
    ResearchBoost,
}

/// Result of a building operating for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub kind: OutputKind,
    pub amount: f32,
}

/// Role-specific state carried by each building variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildingRole {
    Habitat { capacity: u32, comfort: f32 },
    Farm { efficiency: f32 },
    WaterReclaimer,
    OxygenGenerator,
    SolarPanel,
    Mine,
    Laboratory { research_multiplier: f32 },
}

impl BuildingRole {
    pub fn kind(&self) -> BuildingKind {
        match self {
            BuildingRole::Habitat { .. } => BuildingKind::Habitat,
            BuildingRole::Farm { .. } => BuildingKind::Farm,
            BuildingRole::WaterReclaimer => BuildingKind::WaterReclaimer,
            BuildingRole::OxygenGenerator => BuildingKind::OxygenGenerator,
            BuildingRole::SolarPanel => BuildingKind::SolarPanel,
            BuildingRole::Mine => BuildingKind::Mine,
            BuildingRole::Laboratory { .. } => BuildingKind::Laboratory,
        }
    }

    /// Multiplier on base production from upgrades
    fn multiplier(&self) -> f32 {
        match self {
            BuildingRole::Habitat { comfort, .. } => *comfort,
            BuildingRole::Farm { efficiency } => *efficiency,
            BuildingRole::Laboratory {
                research_multiplier,
            } => *research_multiplier,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    role: BuildingRole,
    /// Footprint (habitats: 5 per unit of capacity)
    size: u32,
    base_production: f32,
    energy_usage: f32,
    condition: f32,
    operational: bool,
}

impl Building {
    /// Build a new building of `kind`. For habitats `size` is the capacity.
    pub fn new(kind: BuildingKind, size: u32) -> Self {
        let s = size as f32;
        let (role, footprint, base_production, energy_usage) = match kind {
            BuildingKind::Habitat => (
                BuildingRole::Habitat {
                    capacity: size,
                    comfort: 1.0,
                },
                size.saturating_mul(5),
                5.0,
                s * 0.5,
            ),
            BuildingKind::Farm => (BuildingRole::Farm { efficiency: 1.0 }, size, s * 2.0, s * 0.8),
            BuildingKind::WaterReclaimer => (BuildingRole::WaterReclaimer, size, s * 3.0, s * 1.2),
            BuildingKind::OxygenGenerator => {
                (BuildingRole::OxygenGenerator, size, s * 5.0, s * 1.5)
            }
            BuildingKind::SolarPanel => (BuildingRole::SolarPanel, size, s * 3.0, 0.0),
            BuildingKind::Mine => (BuildingRole::Mine, size, s * 1.5, s * 2.0),
            BuildingKind::Laboratory => (
                BuildingRole::Laboratory {
                    research_multiplier: 1.0,
                },
                size,
                1.5,
                s * 1.8,
            ),
        };

        Self {
            role,
            size: footprint,
            base_production,
            energy_usage,
            condition: MAX_CONDITION,
            operational: true,
        }
    }

    pub fn kind(&self) -> BuildingKind {
        self.role.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn role(&self) -> &BuildingRole {
        &self.role
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn energy_usage(&self) -> f32 {
        self.energy_usage
    }

    pub fn condition(&self) -> f32 {
        self.condition
    }

    /// Colonist capacity (habitats only)
    pub fn capacity(&self) -> u32 {
        match self.role {
            BuildingRole::Habitat { capacity, .. } => capacity,
            _ => 0,
        }
    }

    pub fn is_solar(&self) -> bool {
        matches!(self.role, BuildingRole::SolarPanel)
    }

    /// Operational means not disabled and above the condition threshold.
    pub fn is_operational(&self) -> bool {
        self.operational && self.condition > OPERATIONAL_THRESHOLD
    }

    /// Today's output, scaled by condition. Zero when not operational.
    pub fn operate(&self) -> Production {
        let kind = self.kind().output();
        if !self.is_operational() {
            return Production { kind, amount: 0.0 };
        }
        Production {
            kind,
            amount: self.base_production * self.role.multiplier() * (self.condition / 100.0),
        }
    }

    /// Daily wear plus power check. The only place the operational flag is set.
    pub fn update_day(&mut self, energy_available: bool) {
        self.condition = (self.condition - DAILY_WEAR).max(0.0);
        self.operational = energy_available && self.condition > OPERATIONAL_THRESHOLD;
    }

    pub fn repair(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.condition = (self.condition + amount).min(MAX_CONDITION);
        if self.condition > OPERATIONAL_THRESHOLD {
            self.operational = true;
        }
    }

    pub fn apply_damage(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.condition = (self.condition - amount).max(0.0);
    }

    /// Knock the building offline and take 30 condition, never below 10.
    pub fn malfunction(&mut self) {
        self.operational = false;
        self.condition = (self.condition - 30.0).max(10.0f32.min(self.condition));
    }

    /// Dust covers solar collectors: 15 condition, never below 30.
    pub fn cover_with_dust(&mut self) {
        if self.condition > 30.0 {
            self.condition = (self.condition - 15.0).max(30.0);
        }
    }

    // Upgrades

    pub fn upgrade_comfort(&mut self, amount: f32) -> bool {
        if amount <= 0.0 {
            return false;
        }
        match &mut self.role {
            BuildingRole::Habitat { comfort, .. } => {
                *comfort += amount;
                self.energy_usage += amount * 0.2;
                true
            }
            _ => false,
        }
    }

    pub fn boost_efficiency(&mut self, amount: f32) -> bool {
        if amount <= 0.0 {
            return false;
        }
        match &mut self.role {
            BuildingRole::Farm { efficiency } => {
                *efficiency += amount;
                true
            }
            _ => false,
        }
    }

    pub fn upgrade_equipment(&mut self, amount: f32) -> bool {
        if amount <= 0.0 {
            return false;
        }
        match &mut self.role {
            BuildingRole::Laboratory {
                research_multiplier,
            } => {
                *research_multiplier += amount;
                self.energy_usage += amount * 0.5;
                true
            }
            _ => false,
        }
    }
}

/// Colonists all habitats together can house
pub fn total_capacity(buildings: &[Building]) -> u32 {
    buildings
        .iter()
        .fold(0u32, |total, b| total.saturating_add(b.capacity()))
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_operational() {
            "Operational"
        } else {
            "Non-operational"
        };
        write!(
            f,
            "{} - Condition: {:.0}% [{}]",
            self.name(),
            self.condition,
            status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farm_output() {
        let farm = Building::new(BuildingKind::Farm, 2);
        assert_eq!(
            farm.operate(),
            Production {
                kind: OutputKind::Food,
                amount: 4.0
            }
        );
        assert!((farm.energy_usage() - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_output_scales_with_condition() {
        let mut mine = Building::new(BuildingKind::Mine, 2);
        mine.apply_damage(50.0);
        // 3.0 base * 0.5 condition
        assert!((mine.operate().amount - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_threshold_gates_operation() {
        let mut lab = Building::new(BuildingKind::Laboratory, 2);
        lab.apply_damage(80.0);
        assert_eq!(lab.condition(), 20.0);
        assert!(!lab.is_operational());
        assert_eq!(lab.operate().amount, 0.0);

        lab.update_day(true);
        assert!(!lab.is_operational());

        lab.repair(30.0);
        assert!(lab.is_operational());
    }

    #[test]
    fn test_update_day_power() {
        let mut reclaimer = Building::new(BuildingKind::WaterReclaimer, 2);
        reclaimer.update_day(false);
        assert_eq!(reclaimer.condition(), 99.0);
        assert!(!reclaimer.is_operational());
        assert_eq!(reclaimer.operate().amount, 0.0);

        reclaimer.update_day(true);
        assert!(reclaimer.is_operational());
    }

    #[test]
    fn test_condition_floor() {
        let mut generator = Building::new(BuildingKind::OxygenGenerator, 1);
        generator.apply_damage(500.0);
        assert_eq!(generator.condition(), 0.0);
        generator.update_day(true);
        assert_eq!(generator.condition(), 0.0);
    }

    #[test]
    fn test_repair_capped() {
        let mut farm = Building::new(BuildingKind::Farm, 1);
        farm.apply_damage(10.0);
        farm.repair(50.0);
        assert_eq!(farm.condition(), 100.0);
    }

    #[test]
    fn test_meteor_damage_examples() {
        let mut habitat = Building::new(BuildingKind::Habitat, 5);
        habitat.apply_damage(10.0);
        habitat.apply_damage(30.0);
        assert_eq!(habitat.condition(), 60.0);
        assert!(habitat.is_operational());

        let mut farm = Building::new(BuildingKind::Farm, 2);
        farm.apply_damage(10.0);
        farm.apply_damage(80.0);
        assert_eq!(farm.condition(), 10.0);
        assert!(!farm.is_operational());
    }

    #[test]
    fn test_malfunction() {
        let mut mine = Building::new(BuildingKind::Mine, 1);
        mine.malfunction();
        assert_eq!(mine.condition(), 70.0);
        assert!(!mine.is_operational());

        let mut weak = Building::new(BuildingKind::Mine, 1);
        weak.apply_damage(75.0);
        weak.malfunction();
        assert_eq!(weak.condition(), 10.0);
    }

    #[test]
    fn test_dust_never_raises_condition() {
        let mut panel = Building::new(BuildingKind::SolarPanel, 2);
        panel.cover_with_dust();
        assert_eq!(panel.condition(), 85.0);

        panel.apply_damage(50.0);
        panel.cover_with_dust();
        assert_eq!(panel.condition(), 30.0);

        panel.apply_damage(10.0);
        panel.cover_with_dust();
        assert_eq!(panel.condition(), 20.0);
    }

    #[test]
    fn test_habitat_capacity_and_happiness() {
        let habitat = Building::new(BuildingKind::Habitat, 5);
        assert_eq!(habitat.capacity(), 5);
        assert_eq!(habitat.size(), 25);
        assert_eq!(habitat.operate().kind, OutputKind::Happiness);
        assert_eq!(habitat.operate().amount, 5.0);
        assert_eq!(Building::new(BuildingKind::Farm, 5).capacity(), 0);
    }

    #[test]
    fn test_upgrades() {
        let mut habitat = Building::new(BuildingKind::Habitat, 4);
        assert!(habitat.upgrade_comfort(0.5));
        assert_eq!(habitat.operate().amount, 7.5);
        assert!((habitat.energy_usage() - 2.1).abs() < 1e-5);

        let mut farm = Building::new(BuildingKind::Farm, 2);
        assert!(farm.boost_efficiency(0.5));
        assert_eq!(farm.operate().amount, 6.0);
        assert!(!farm.upgrade_comfort(1.0));

        let mut lab = Building::new(BuildingKind::Laboratory, 2);
        assert!(lab.upgrade_equipment(1.0));
        assert_eq!(lab.operate().amount, 3.0);
        assert!(!lab.upgrade_equipment(-1.0));
    }

    #[test]
    fn test_oversized_habitat_does_not_overflow() {
        let habitat = Building::new(BuildingKind::Habitat, u32::MAX);
        assert_eq!(habitat.size(), u32::MAX);

        let buildings = vec![habitat.clone(), habitat];
        assert_eq!(total_capacity(&buildings), u32::MAX);
    }

    #[test]
    fn test_total_capacity_counts_habitats_only() {
        let buildings = vec![
            Building::new(BuildingKind::Habitat, 5),
            Building::new(BuildingKind::Farm, 9),
            Building::new(BuildingKind::Habitat, 3),
        ];
        assert_eq!(total_capacity(&buildings), 8);
    }

    #[test]
    fn test_construction_cost() {
        assert_eq!(BuildingKind::Habitat.construction_cost(3), 30.0);
        assert_eq!(BuildingKind::Laboratory.construction_cost(2), 60.0);
    }
}
