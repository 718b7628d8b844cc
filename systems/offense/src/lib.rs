#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that searches the grid for safe attack cells.
//!
//! A free cell qualifies when a shot from the player toward it passes through
//! at least one enemy while no enemy can trace a line back to the player's
//! current cell. The enemy-to-player lines do not depend on the candidate, so
//! they are traced once per scan.

use ballistics_core::{CellCoord, GridView, Occupant, OffenseCandidate};
use ballistics_system_tracer::trace;
use tracing::debug;

/// Scans every free cell in row-major order for safe attack candidates.
///
/// Returns an empty list when the player or every enemy is missing, or when
/// any enemy has an open line to the player.
#[must_use]
pub fn recommend_offenses(grid: &GridView<'_>) -> Vec<OffenseCandidate> {
    let Some(player) = grid.player() else {
        return Vec::new();
    };
    let enemies = grid.enemies();
    if enemies.is_empty() {
        return Vec::new();
    }

    let covered = enemies
        .iter()
        .all(|&enemy| trace(grid, enemy, player).is_blocked());
    if !covered {
        debug!("player is exposed, skipping offense scan");
        return Vec::new();
    }

    let candidates: Vec<OffenseCandidate> = grid
        .cells()
        .filter(|cell| !grid.is_occupied(*cell))
        .filter_map(|cell| {
            let hit_count = count_hits(grid, player, cell);
            (hit_count > 0).then_some(OffenseCandidate { cell, hit_count })
        })
        .collect();

    debug!(candidates = candidates.len(), "offense scan finished");
    candidates
}

/// Counts the enemies struck by a shot from `player` toward `target`.
///
/// The player's own cell is never counted.
#[must_use]
pub fn count_hits(grid: &GridView<'_>, player: CellCoord, target: CellCoord) -> u32 {
    let shot = trace(grid, player, target);
    let hits = shot
        .path()
        .iter()
        .filter(|cell| **cell != player && grid.occupant(**cell) == Some(Occupant::Enemy))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}
