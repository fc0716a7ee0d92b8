//! Colonist component: vitals, role, and daily work.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::building::Building;
use super::resources::Resource;

/// Food eaten per colonist per day
pub const FOOD_PER_COLONIST: f32 = 1.0;
/// Water drunk per colonist per day
pub const WATER_PER_COLONIST: f32 = 0.5;

const HUNGER_PER_MISSED_MEAL: f32 = 25.0;
const THIRST_PER_MISSED_DRINK: f32 = 30.0;
const STARTING_HAPPINESS: f32 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Engineer,
    Scientist,
    Farmer,
    Miner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Engineer, Role::Scientist, Role::Farmer, Role::Miner];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Engineer => "Engineer",
            Role::Scientist => "Scientist",
            Role::Farmer => "Farmer",
            Role::Miner => "Miner",
        }
    }

    /// Role-specific output scale applied on top of skill × health × happiness
    fn work_multiplier(&self) -> f32 {
        match self {
            Role::Engineer => 1.0,
            Role::Scientist => 5.0,
            Role::Farmer => 1.2,
            Role::Miner => 1.1,
        }
    }

    fn labor_kind(&self) -> LaborKind {
        match self {
            Role::Engineer => LaborKind::Maintenance,
            Role::Scientist => LaborKind::Research,
            Role::Farmer => LaborKind::Farming,
            Role::Miner => LaborKind::Mining,
        }
    }
}

/// What a day of work produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaborKind {
    Maintenance,
    Research,
    Farming,
    Mining,
}

/// One colonist's labor contribution for the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Labor {
    pub kind: LaborKind,
    pub magnitude: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colonist {
    name: String,
    role: Role,
    health: f32,
    happiness: f32,
    hunger: f32,
    thirst: f32,
    alive: bool,
    skill_level: u8,
}

impl Colonist {
    /// Create a colonist with a fixed skill level (clamped to 1..=10).
    pub fn new(name: impl Into<String>, role: Role, skill_level: u8) -> Self {
        Self {
            name: name.into(),
            role,
            health: 100.0,
            happiness: STARTING_HAPPINESS,
            hunger: 0.0,
            thirst: 0.0,
            alive: true,
            skill_level: skill_level.clamp(1, 10),
        }
    }

    /// Create a colonist with a random skill level.
    pub fn random(name: impl Into<String>, role: Role, rng: &mut impl Rng) -> Self {
        Self::new(name, role, rng.gen_range(1..=10))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn happiness(&self) -> f32 {
        self.happiness
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn thirst(&self) -> f32 {
        self.thirst
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    /// Eat and drink for the day.
    ///
    /// Each ration is drawn at most once. Returns true only when both food
    /// and water were available; any shortfall grows the matching deficit
    /// and costs health.
    pub fn consume_resources(&mut self, food: &mut Resource, water: &mut Resource) -> bool {
        if !self.alive {
            return false;
        }

        let ate = food.consume(FOOD_PER_COLONIST);
        let drank = water.consume(WATER_PER_COLONIST);

        if ate && drank {
            self.hunger = 0.0;
            self.thirst = 0.0;
            return true;
        }

        if !ate {
            self.hunger += HUNGER_PER_MISSED_MEAL;
        }
        if !drank {
            self.thirst += THIRST_PER_MISSED_DRINK;
        }
        self.update_health();
        false
    }

    /// Apply health and happiness penalties for accumulated deficits.
    pub fn update_health(&mut self) {
        if !self.alive {
            return;
        }

        let mut health_loss = 0.0;
        if self.hunger > 0.0 {
            health_loss += self.hunger / 5.0;
            self.adjust_happiness(-5.0);
        }
        if self.thirst > 0.0 {
            health_loss += self.thirst / 4.0;
            self.adjust_happiness(-7.0);
        }
        self.adjust_health(-health_loss);
    }

    pub fn boost_happiness(&mut self, amount: f32) {
        self.adjust_happiness(amount.max(0.0));
    }

    /// Shift happiness by `delta`, clamped to 0..=100.
    pub fn adjust_happiness(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.happiness = (self.happiness + delta).clamp(0.0, 100.0);
    }

    /// Shift health by `delta`, clamped to 0..=100. Reaching zero is fatal.
    pub fn adjust_health(&mut self, delta: f32) {
        if !self.alive || !delta.is_finite() {
            return;
        }
        self.health = (self.health + delta).clamp(0.0, 100.0);
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
        }
    }

    /// Illness: loses health but never below 1.
    pub fn sicken(&mut self, health_loss: f32) {
        if !self.alive {
            return;
        }
        self.health = (self.health - health_loss.max(0.0)).max(1.0).min(100.0);
    }

    pub fn update_day(&mut self) {
        if !self.alive {
            return;
        }

        self.adjust_happiness(-2.0);

        // Recover only when fed and watered
        if self.hunger == 0.0 && self.thirst == 0.0 {
            self.health = (self.health + 5.0).min(100.0);
        }
    }

    /// Hands-on repair by an engineer: restores `20 × skill/10 × health/100`
    /// condition and lifts the engineer's mood by 5.
    ///
    /// Returns the condition restored; zero for anyone else or the dead.
    pub fn repair_building(&mut self, building: &mut Building) -> f32 {
        if !self.alive || self.role != Role::Engineer {
            return 0.0;
        }

        let amount = 20.0 * (self.skill_level as f32 / 10.0) * (self.health / 100.0);
        building.repair(amount);
        self.adjust_happiness(5.0);
        amount
    }

    /// A farmer tending a farm raises its efficiency by
    /// `0.2 × skill × health/100`. Returns the boost applied.
    pub fn boost_food_production(&self, farm: &mut Building) -> f32 {
        if !self.alive || self.role != Role::Farmer {
            return 0.0;
        }

        let boost = 0.2 * self.skill_level as f32 * (self.health / 100.0);
        if farm.boost_efficiency(boost) {
            boost
        } else {
            0.0
        }
    }

    /// Today's labor. Dead colonists contribute nothing.
    pub fn work(&self) -> Option<Labor> {
        if !self.alive {
            return None;
        }

        let magnitude = self.skill_level as f32
            * (self.health / 100.0)
            * (self.happiness / 100.0)
            * self.role.work_multiplier();

        Some(Labor {
            kind: self.role.labor_kind(),
            magnitude,
        })
    }
}

impl std::fmt::Display for Colonist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} the {} (skill {}) - Health: {:.0}, Happiness: {:.0}, Hunger: {:.0}, Thirst: {:.0}{}",
            self.name,
            self.role.name(),
            self.skill_level,
            self.health,
            self.happiness,
            self.hunger,
            self.thirst,
            if self.alive { "" } else { " [DEAD]" }
        )
    }
}
