//! Maintenance system - turns engineer labor into building repairs

use crate::components::Building;

/// How many of the worst buildings share each day's maintenance
pub const REPAIR_SLOTS: usize = 3;

/// Split `points` evenly across the lowest-condition buildings.
///
/// Returns how many buildings were repaired.
pub fn allocate_maintenance(buildings: &mut [Building], points: f32) -> usize {
    if points <= 0.0 || buildings.is_empty() {
        return 0;
    }

    let mut order: Vec<usize> = (0..buildings.len()).collect();
    order.sort_by(|&a, &b| {
        buildings[a]
            .condition()
            .partial_cmp(&buildings[b].condition())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(REPAIR_SLOTS);

    let per_building = points / order.len() as f32;
    for idx in &order {
        buildings[*idx].repair(per_building);
    }

    order.len()
}
