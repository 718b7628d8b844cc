#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that proposes obstacle placements on open lines of fire.

use std::collections::HashSet;

use ballistics_core::{CellCoord, GridView, ThreatReport};

/// Collects free cells strictly between an enemy and the player on every open line.
///
/// Cells are returned once, in the order they are first discovered while
/// walking the reports. Blocked reports contribute nothing and line endpoints
/// are never candidates.
#[must_use]
pub fn recommend_defenses(grid: &GridView<'_>, reports: &[ThreatReport]) -> Vec<CellCoord> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for report in reports.iter().filter(|report| !report.is_blocked()) {
        let path = report.trace.path();
        let Some(interior) = path.get(1..path.len().saturating_sub(1)) else {
            continue;
        };

        for &cell in interior {
            if !grid.is_occupied(cell) && seen.insert(cell) {
                candidates.push(cell);
            }
        }
    }

    candidates
}
