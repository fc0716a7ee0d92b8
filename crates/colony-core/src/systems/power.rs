//! Power system - solar generation versus building demand

use serde::{Deserialize, Serialize};

use crate::components::{Building, Resource};

/// Today's energy balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    pub production: f32,
    pub demand: f32,
}

impl EnergyBalance {
    pub fn is_sufficient(&self) -> bool {
        self.production >= self.demand
    }

    /// Chance that any one building gets power during a shortage
    pub fn supply_ratio(&self) -> f32 {
        if self.demand <= 0.0 {
            return 1.0;
        }
        (self.production / self.demand).clamp(0.0, 1.0)
    }
}

/// Sum solar output into the energy ledger and compare against demand.
///
/// Demand counts non-solar buildings that are operational going into the day.
pub fn energy_pass(buildings: &[Building], energy: &mut Resource) -> EnergyBalance {
    let production: f32 = buildings
        .iter()
        .filter(|b| b.is_solar() && b.is_operational())
        .map(|b| b.operate().amount)
        .sum();

    let demand: f32 = buildings
        .iter()
        .filter(|b| !b.is_solar() && b.is_operational())
        .map(|b| b.energy_usage())
        .sum();

    if let Err(err) = energy.set_production_rate(production) {
        log::error!("Energy rate rejected: {err}");
    }

    EnergyBalance { production, demand }
}
