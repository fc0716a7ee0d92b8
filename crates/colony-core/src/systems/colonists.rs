//! Colonist system - feeding, morale from habitats, and daily labor

use serde::{Deserialize, Serialize};

use crate::components::{Colonist, LaborKind, ResourceLedger};

/// Outcome of the feeding round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingReport {
    pub fed: usize,
    pub living: usize,
}

/// Labor totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkReport {
    /// Research after the laboratory boost
    pub research: f32,
    pub maintenance: f32,
    pub farming: f32,
    pub mining: f32,
}

/// Feed every living colonist and share the habitats' happiness equally.
pub fn feed_colonists(
    colonists: &mut [Colonist],
    resources: &mut ResourceLedger,
    happiness_pool: f32,
) -> FeedingReport {
    let living = colonists.iter().filter(|c| c.is_alive()).count();
    if living == 0 {
        return FeedingReport::default();
    }

    let share = happiness_pool / living as f32;
    let (food, water) = resources.food_and_water_mut();
    let mut fed = 0;

    for colonist in colonists.iter_mut().filter(|c| c.is_alive()) {
        if colonist.consume_resources(food, water) {
            fed += 1;
        }
        colonist.boost_happiness(share);
    }

    FeedingReport { fed, living }
}

/// Collect each colonist's labor, then age everyone by a day.
///
/// Research is scaled by `1 + research_boost` per colonist. Farming and
/// mining are totalled but nothing consumes them yet.
pub fn colonist_work(colonists: &mut [Colonist], research_boost: f32) -> WorkReport {
    let mut report = WorkReport::default();

    for colonist in colonists.iter() {
        let Some(labor) = colonist.work() else {
            continue;
        };
        match labor.kind {
            LaborKind::Research => report.research += labor.magnitude * (1.0 + research_boost),
            LaborKind::Maintenance => report.maintenance += labor.magnitude,
            LaborKind::Farming => report.farming += labor.magnitude,
            LaborKind::Mining => report.mining += labor.magnitude,
        }
    }

    for colonist in colonists.iter_mut() {
        colonist.update_day();
    }

    report
}
