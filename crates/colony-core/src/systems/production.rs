//! Production system - daily building wear, brownouts, and output totals

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::power::EnergyBalance;
use crate::components::{Building, OutputKind, Production, ResourceKind, ResourceLedger};

/// Output accumulated across all buildings for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyProduction {
    pub food: f32,
    pub water: f32,
    pub oxygen: f32,
    pub materials: f32,
    pub happiness: f32,
    pub research_boost: f32,
}

impl DailyProduction {
    pub fn add(&mut self, production: Production) {
        let slot = match production.kind {
            OutputKind::Food => &mut self.food,
            OutputKind::Water => &mut self.water,
            OutputKind::Oxygen => &mut self.oxygen,
            OutputKind::Materials => &mut self.materials,
            OutputKind::Happiness => &mut self.happiness,
            OutputKind::ResearchBoost => &mut self.research_boost,
            // Solar output is tallied by the power pass
            OutputKind::Energy => return,
        };
        *slot += production.amount;
    }

    /// Total for a storable resource
    pub fn get(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Water => self.water,
            ResourceKind::Oxygen => self.oxygen,
            ResourceKind::Materials => self.materials,
            ResourceKind::Energy => 0.0,
        }
    }
}

/// Wear every non-solar building, decide who gets power, and total the output.
///
/// With enough energy every building is powered. During a shortage each
/// building independently wins power with probability production/demand.
pub fn production_pass(
    buildings: &mut [Building],
    balance: &EnergyBalance,
    rng: &mut impl Rng,
) -> DailyProduction {
    let sufficient = balance.is_sufficient();
    let ratio = balance.supply_ratio() as f64;
    let mut totals = DailyProduction::default();

    for building in buildings.iter_mut().filter(|b| !b.is_solar()) {
        let energy_available = sufficient || rng.gen_bool(ratio);
        if !sufficient {
            log::debug!(
                "Brownout draw for {}: {}",
                building.name(),
                if energy_available { "powered" } else { "dark" }
            );
        }

        building.update_day(energy_available);

        if building.is_operational() {
            totals.add(building.operate());
        }
    }

    totals
}

/// Record today's totals as production rates and bank them.
///
/// Returns `(kind, amount)` for every storable resource that grew.
pub fn apply_production(
    resources: &mut ResourceLedger,
    totals: &DailyProduction,
) -> Vec<(ResourceKind, f32)> {
    let mut produced = Vec::new();

    for kind in ResourceKind::STORABLE {
        let resource = resources.get_mut(kind);
        if let Err(err) = resource.set_production_rate(totals.get(kind)) {
            log::error!("{} rate rejected: {err}", kind.name());
            continue;
        }
        let amount = resource.produce_daily();
        if amount > 0.0 {
            produced.push((kind, amount));
        }
    }

    produced
}
