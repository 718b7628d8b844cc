use std::collections::HashSet;

use ballistics_core::{CellCoord, GridView, Occupant, SituationReport, ThreatReport};

/// Glyph drawn for a cell suggested as cover.
const DEFENSE_GLYPH: char = '*';
/// Glyph drawn for a cell suggested as an attack target.
const OFFENSE_GLYPH: char = '+';
const EMPTY_GLYPH: char = '.';

const fn occupant_glyph(occupant: Occupant) -> char {
    match occupant {
        Occupant::Player => '@',
        Occupant::Enemy => 'E',
        Occupant::Obstacle => 'o',
        Occupant::Wall => '#',
    }
}

/// Draws the grid as text with suggestions overlaid on free cells.
pub(crate) fn board(grid: &GridView<'_>, report: &SituationReport) -> String {
    let defenses: HashSet<CellCoord> = report.defenses.iter().copied().collect();
    let offenses: HashSet<CellCoord> = report
        .offenses
        .iter()
        .map(|candidate| candidate.cell)
        .collect();

    let edge = usize::try_from(grid.size()).unwrap_or(0);
    let capacity = edge
        .checked_add(1)
        .and_then(|line| line.checked_mul(edge))
        .unwrap_or(0);
    let mut output = String::with_capacity(capacity);
    for cell in grid.cells() {
        let glyph = match grid.occupant(cell) {
            Some(occupant) => occupant_glyph(occupant),
            None if defenses.contains(&cell) => DEFENSE_GLYPH,
            None if offenses.contains(&cell) => OFFENSE_GLYPH,
            None => EMPTY_GLYPH,
        };
        output.push(glyph);
        if cell.column() + 1 == grid.size() {
            output.push('\n');
        }
    }
    output
}

/// One line per enemy describing whether its shot reaches the player.
pub(crate) fn threat_line(report: &ThreatReport) -> String {
    match report.trace.blocker() {
        Some(blocker) => format!(
            "enemy {} -> player {}: blocked, last clear cell {}",
            report.enemy, report.player, blocker
        ),
        None => format!(
            "enemy {} -> player {}: open ({} cells)",
            report.enemy,
            report.player,
            report.trace.path().len()
        ),
    }
}
