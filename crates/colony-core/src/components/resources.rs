//! Resource ledger: Food, Water, Oxygen, Materials, Energy.

use serde::{Deserialize, Serialize};

use crate::error::{ColonyError, Result};

/// Fraction of stored food lost every day
pub const DEFAULT_SPOILAGE_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Food,
    Water,
    Oxygen,
    Materials,
    Energy,
}

impl ResourceKind {
    /// All resource kinds in ledger order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Food,
        ResourceKind::Water,
        ResourceKind::Oxygen,
        ResourceKind::Materials,
        ResourceKind::Energy,
    ];

    /// Kinds that can be banked from one day to the next.
    pub const STORABLE: [ResourceKind; 4] = [
        ResourceKind::Food,
        ResourceKind::Water,
        ResourceKind::Oxygen,
        ResourceKind::Materials,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Food => "Food",
            ResourceKind::Water => "Water",
            ResourceKind::Oxygen => "Oxygen",
            ResourceKind::Materials => "Materials",
            ResourceKind::Energy => "Energy",
        }
    }

    /// Energy cannot be stored: it is reset at the start of every day.
    pub fn is_storable(&self) -> bool {
        !matches!(self, ResourceKind::Energy)
    }
}

/// A single tracked resource: stock on hand plus today's flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    kind: ResourceKind,
    quantity: f32,
    production_rate: f32,
    /// Energy drawn so far today (Energy only)
    consumed_today: f32,
    /// Fraction lost per day (Food only)
    spoilage_rate: f32,
}

impl Resource {
    pub fn new(kind: ResourceKind, quantity: f32) -> Self {
        let spoilage_rate = match kind {
            ResourceKind::Food => DEFAULT_SPOILAGE_RATE,
            _ => 0.0,
        };
        let mut resource = Self {
            kind,
            quantity: 0.0,
            production_rate: 0.0,
            consumed_today: 0.0,
            spoilage_rate,
        };
        resource.set_quantity(quantity);
        resource
    }

    pub fn with_spoilage_rate(mut self, rate: f32) -> Self {
        if self.kind == ResourceKind::Food {
            self.spoilage_rate = rate.clamp(0.0, 1.0);
        }
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn quantity(&self) -> f32 {
        self.quantity
    }

    pub fn production_rate(&self) -> f32 {
        self.production_rate
    }

    pub fn consumed_today(&self) -> f32 {
        self.consumed_today
    }

    pub fn spoilage_rate(&self) -> f32 {
        self.spoilage_rate
    }

    /// Set stock directly; negative values clamp to zero.
    pub fn set_quantity(&mut self, quantity: f32) {
        self.quantity = if quantity.is_finite() {
            quantity.max(0.0)
        } else {
            0.0
        };
    }

    /// Set today's flow rate. Negative rates are a caller bug and are rejected.
    pub fn set_production_rate(&mut self, rate: f32) -> Result<()> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ColonyError::NegativeProductionRate(rate));
        }
        self.production_rate = rate;
        Ok(())
    }

    /// Try to take `amount` out of the ledger.
    ///
    /// Storable kinds draw from stock. Energy draws against today's
    /// production rate, since it cannot be banked.
    pub fn consume(&mut self, amount: f32) -> bool {
        if !(amount > 0.0) {
            return false;
        }
        match self.kind {
            ResourceKind::Energy => {
                if self.consumed_today + amount <= self.production_rate {
                    self.consumed_today += amount;
                    true
                } else {
                    false
                }
            }
            _ => {
                if amount <= self.quantity {
                    self.quantity -= amount;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Add `amount` to stock and return what was added.
    pub fn produce(&mut self, amount: f32) -> f32 {
        let added = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.quantity += added;
        added
    }

    /// Realize today's production rate into stock.
    pub fn produce_daily(&mut self) -> f32 {
        if !self.kind.is_storable() {
            return 0.0;
        }
        self.produce(self.production_rate)
    }

    /// Windfall from an event (supply drop, discovery).
    pub fn credit(&mut self, amount: f32) -> f32 {
        self.produce(amount)
    }

    /// Daily decay. Food spoils; every other kind is untouched.
    pub fn update_day(&mut self) -> f32 {
        if self.spoilage_rate <= 0.0 {
            return 0.0;
        }
        let spoiled = self.quantity * self.spoilage_rate;
        self.set_quantity(self.quantity - spoiled);
        spoiled
    }

    /// Start-of-day reset for Energy: the draw counter and stock are cleared,
    /// the rate stands until the power pass sets a new one.
    pub fn reset_day(&mut self) {
        if self.kind == ResourceKind::Energy {
            self.consumed_today = 0.0;
            self.quantity = 0.0;
        }
    }

    /// Drop today's rate back to zero.
    pub fn clear_production_rate(&mut self) {
        self.production_rate = 0.0;
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.1} (+{:.1}/day)",
            self.name(),
            self.quantity,
            self.production_rate
        )
    }
}

/// Colony-wide resource ledger (one tracker per kind)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub food: Resource,
    pub water: Resource,
    pub oxygen: Resource,
    pub materials: Resource,
    pub energy: Resource,
}

impl ResourceLedger {
    pub fn new(food: f32, water: f32, oxygen: f32, materials: f32) -> Self {
        Self {
            food: Resource::new(ResourceKind::Food, food),
            water: Resource::new(ResourceKind::Water, water),
            oxygen: Resource::new(ResourceKind::Oxygen, oxygen),
            materials: Resource::new(ResourceKind::Materials, materials),
            energy: Resource::new(ResourceKind::Energy, 0.0),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &Resource {
        match kind {
            ResourceKind::Food => &self.food,
            ResourceKind::Water => &self.water,
            ResourceKind::Oxygen => &self.oxygen,
            ResourceKind::Materials => &self.materials,
            ResourceKind::Energy => &self.energy,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut Resource {
        match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Water => &mut self.water,
            ResourceKind::Oxygen => &mut self.oxygen,
            ResourceKind::Materials => &mut self.materials,
            ResourceKind::Energy => &mut self.energy,
        }
    }

    /// Mutable food and water at once, for feeding colonists.
    pub fn food_and_water_mut(&mut self) -> (&mut Resource, &mut Resource) {
        (&mut self.food, &mut self.water)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        ResourceKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(30.0, 40.0, 20.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_within_stock() {
        let mut water = Resource::new(ResourceKind::Water, 10.0);
        assert!(water.consume(4.0));
        assert_eq!(water.quantity(), 6.0);
        assert!(!water.consume(7.0));
        assert_eq!(water.quantity(), 6.0);
    }

    #[test]
    fn test_consume_rejects_non_positive() {
        let mut food = Resource::new(ResourceKind::Food, 10.0);
        assert!(!food.consume(0.0));
        assert!(!food.consume(-3.0));
        assert_eq!(food.quantity(), 10.0);
    }

    #[test]
    fn test_quantity_clamped() {
        let mut oxygen = Resource::new(ResourceKind::Oxygen, -5.0);
        assert_eq!(oxygen.quantity(), 0.0);
        oxygen.set_quantity(-1.0);
        assert_eq!(oxygen.quantity(), 0.0);
        assert_eq!(oxygen.produce(-10.0), 0.0);
        assert_eq!(oxygen.quantity(), 0.0);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut materials = Resource::new(ResourceKind::Materials, 5.0);
        materials.set_production_rate(3.0).unwrap();
        assert_eq!(
            materials.set_production_rate(-1.0),
            Err(ColonyError::NegativeProductionRate(-1.0))
        );
        assert_eq!(materials.production_rate(), 3.0);
    }

    #[test]
    fn test_food_spoilage() {
        let mut food = Resource::new(ResourceKind::Food, 100.0);
        let spoiled = food.update_day();
        assert!((spoiled - 5.0).abs() < 1e-4);
        assert!((food.quantity() - 95.0).abs() < 1e-4);

        // Other kinds never spoil
        let mut water = Resource::new(ResourceKind::Water, 100.0);
        assert_eq!(water.update_day(), 0.0);
        assert_eq!(water.quantity(), 100.0);
    }

    #[test]
    fn test_energy_draws_against_rate() {
        let mut energy = Resource::new(ResourceKind::Energy, 0.0);
        energy.set_production_rate(10.0).unwrap();
        energy.reset_day();

        assert_eq!(energy.production_rate(), 10.0);
        assert!(energy.consume(6.0));
        assert!(!energy.consume(6.0));
        assert_eq!(energy.consumed_today(), 6.0);
    }

    #[test]
    fn test_energy_reset() {
        let mut energy = Resource::new(ResourceKind::Energy, 0.0);
        energy.set_production_rate(8.0).unwrap();
        assert!(energy.consume(5.0));
        energy.reset_day();
        assert_eq!(energy.consumed_today(), 0.0);
        assert_eq!(energy.quantity(), 0.0);
        assert_eq!(energy.production_rate(), 8.0);

        // A fresh day's full budget is available again
        assert!(energy.consume(8.0));

        energy.clear_production_rate();
        assert_eq!(energy.production_rate(), 0.0);
    }

    #[test]
    fn test_produce_daily_realizes_rate() {
        let mut food = Resource::new(ResourceKind::Food, 10.0);
        food.set_production_rate(4.0).unwrap();
        assert_eq!(food.produce_daily(), 4.0);
        assert_eq!(food.quantity(), 14.0);

        let mut energy = Resource::new(ResourceKind::Energy, 0.0);
        energy.set_production_rate(4.0).unwrap();
        assert_eq!(energy.produce_daily(), 0.0);
    }

    #[test]
    fn test_ledger_lookup() {
        let mut ledger = ResourceLedger::default();
        assert_eq!(ledger.get(ResourceKind::Food).quantity(), 30.0);
        assert_eq!(ledger.get(ResourceKind::Materials).quantity(), 50.0);
        ledger.get_mut(ResourceKind::Water).credit(5.0);
        assert_eq!(ledger.water.quantity(), 45.0);
        assert_eq!(ledger.iter().count(), 5);
    }
}
