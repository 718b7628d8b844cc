#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that evaluates every enemy's line of fire toward the player.

use ballistics_core::{EvaluationError, GridView, ThreatAssessment, ThreatReport};
use ballistics_system_tracer::trace;
use tracing::debug;

/// Traces each enemy toward the player and collects the outcomes.
///
/// Lines always run from the enemy to the player. Traces are not symmetric, so
/// a player-to-enemy line along the same pair can visit different cells.
pub fn evaluate_threats(grid: &GridView<'_>) -> Result<ThreatAssessment, EvaluationError> {
    let player = grid.player().ok_or(EvaluationError::MissingPlayer)?;
    let enemies = grid.enemies();
    if enemies.is_empty() {
        return Err(EvaluationError::NoEnemies);
    }

    let reports: Vec<ThreatReport> = enemies
        .iter()
        .map(|&enemy| ThreatReport {
            enemy,
            player,
            trace: trace(grid, enemy, player),
        })
        .collect();

    let assessment = ThreatAssessment::new(reports);
    debug!(
        enemies = enemies.len(),
        open_lines = assessment.open_lines(),
        "threats evaluated"
    );
    Ok(assessment)
}
