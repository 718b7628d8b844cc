#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the ballistics engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired grid edits, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems read the grid through a [`GridView`]
//! and return plain result values; they never mutate the grid.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod scenario;

pub use scenario::{Scenario, ScenarioCatalog};

/// Grid dimension used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Largest grid dimension the world accepts.
pub const MAX_GRID_SIZE: u32 = 512;

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the grid with an empty square grid of the provided dimension.
    ConfigureGrid {
        /// Number of cells along each edge of the grid.
        size: u32,
    },
    /// Requests placement of an occupant on a free cell.
    Place {
        /// Category of the token being placed.
        occupant: Occupant,
        /// Cell that should receive the token.
        cell: CellCoord,
    },
    /// Requests removal of whatever occupies the provided cell.
    Remove {
        /// Cell to clear.
        cell: CellCoord,
    },
    /// Removes every occupant from the grid.
    Clear,
    /// Replaces the grid contents wholesale with the provided snapshot.
    LoadSnapshot {
        /// Occupancy lists that should become the new grid contents.
        snapshot: GridSnapshot,
    },
    /// Restores the grid revision that preceded the last successful edit.
    Undo,
    /// Re-applies the grid revision most recently reverted by [`Command::Undo`].
    Redo,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the grid was reset to the provided dimension.
    GridConfigured {
        /// Number of cells along each edge of the grid.
        size: u32,
    },
    /// Confirms that an occupant was placed.
    OccupantPlaced {
        /// Category of the placed token.
        occupant: Occupant,
        /// Cell now holding the token.
        cell: CellCoord,
    },
    /// Confirms that an occupant left the grid.
    OccupantRemoved {
        /// Category of the removed token.
        occupant: Occupant,
        /// Cell that held the token.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Category requested for placement.
        occupant: Occupant,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: GridError,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the removal failed.
        reason: GridError,
    },
    /// Confirms that every occupant was removed.
    GridCleared,
    /// Confirms that a snapshot replaced the grid contents.
    SnapshotLoaded,
    /// Reports that a snapshot could not be loaded; the grid is unchanged.
    SnapshotRejected {
        /// Specific reason the snapshot was refused.
        reason: SnapshotError,
    },
    /// Confirms that a stored grid revision became current.
    HistoryRestored {
        /// Whether the revision was reached by undoing or redoing.
        direction: HistoryDirection,
    },
    /// Publishes a freshly computed situation report.
    SituationUpdated {
        /// Report describing the current tactical situation.
        report: SituationReport,
    },
}

impl Event {
    /// Reports whether the event signals a change to the grid contents.
    #[must_use]
    pub const fn changes_layout(&self) -> bool {
        matches!(
            self,
            Self::GridConfigured { .. }
                | Self::OccupantPlaced { .. }
                | Self::OccupantRemoved { .. }
                | Self::GridCleared
                | Self::SnapshotLoaded
                | Self::HistoryRestored { .. }
        )
    }
}

/// Direction of travel through the grid history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryDirection {
    /// An earlier revision was restored.
    Undo,
    /// A later revision was restored.
    Redo,
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    #[serde(rename = "x")]
    column: u32,
    #[serde(rename = "y")]
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Categories of tokens that can occupy a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupant {
    /// The single friendly token whose safety is evaluated.
    Player,
    /// A hostile token that fires at the player.
    Enemy,
    /// Placeable cover that stops lines of fire.
    Obstacle,
    /// Level geometry that stops lines of fire.
    Wall,
}

impl Occupant {
    /// Every occupant category in presentation order.
    pub const ALL: [Occupant; 4] = [Self::Player, Self::Enemy, Self::Obstacle, Self::Wall];

    /// Reports whether the category interrupts traced lines.
    ///
    /// Obstacles and walls only differ in presentation.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Obstacle | Self::Wall)
    }

    /// Lowercase label used by adapters and scenario data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
            Self::Obstacle => "obstacle",
            Self::Wall => "wall",
        }
    }
}

/// Reasons a grid edit may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum GridError {
    /// The requested cell lies outside the configured grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell already holds an occupant.
    #[error("cell is already occupied")]
    AlreadyOccupied,
}

/// Reasons a bulk snapshot load may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SnapshotError {
    /// A listed cell lies outside the configured grid.
    #[error("snapshot cell {cell} lies outside the grid")]
    OutOfBounds {
        /// First offending cell.
        cell: CellCoord,
    },
    /// A cell is listed more than once across the occupancy lists.
    #[error("snapshot lists cell {cell} more than once")]
    Stacked {
        /// First duplicated cell.
        cell: CellCoord,
    },
    /// More than one player is listed.
    #[error("snapshot lists more than one player")]
    MultiplePlayers,
}

/// Preconditions that prevent a threat evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum EvaluationError {
    /// No player token is placed.
    #[error("place the player first")]
    MissingPlayer,
    /// No enemy token is placed.
    #[error("place at least one enemy")]
    NoEnemies,
}

/// Occupancy lists describing a whole grid, as used by scenario data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Player cells; valid snapshots hold at most one.
    #[serde(default)]
    pub players: Vec<CellCoord>,
    /// Enemy cells in placement order.
    #[serde(default)]
    pub enemies: Vec<CellCoord>,
    /// Obstacle cells in placement order.
    #[serde(default)]
    pub obstacles: Vec<CellCoord>,
    /// Wall cells in placement order.
    #[serde(default)]
    pub walls: Vec<CellCoord>,
}

impl GridSnapshot {
    /// Returns the cells listed for the provided category.
    #[must_use]
    pub fn cells(&self, occupant: Occupant) -> &[CellCoord] {
        match occupant {
            Occupant::Player => &self.players,
            Occupant::Enemy => &self.enemies,
            Occupant::Obstacle => &self.obstacles,
            Occupant::Wall => &self.walls,
        }
    }

    /// Iterates over every listed cell paired with its category.
    pub fn entries(&self) -> impl Iterator<Item = (Occupant, CellCoord)> + '_ {
        Occupant::ALL.into_iter().flat_map(move |occupant| {
            self.cells(occupant)
                .iter()
                .map(move |cell| (occupant, *cell))
        })
    }

    /// Checks the snapshot against a square grid of the provided dimension.
    pub fn validate(&self, size: u32) -> Result<(), SnapshotError> {
        if self.players.len() > 1 {
            return Err(SnapshotError::MultiplePlayers);
        }

        let mut seen = HashSet::new();
        for (_, cell) in self.entries() {
            if cell.column() >= size || cell.row() >= size {
                return Err(SnapshotError::OutOfBounds { cell });
            }
            if !seen.insert(cell) {
                return Err(SnapshotError::Stacked { cell });
            }
        }
        Ok(())
    }
}

/// Read-only view into the dense occupancy grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Option<Occupant>],
    size: u32,
    player: Option<CellCoord>,
    enemies: &'a [CellCoord],
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided storage.
    ///
    /// `cells` is laid out row-major with `size * size` entries.
    #[must_use]
    pub fn new(
        cells: &'a [Option<Occupant>],
        size: u32,
        player: Option<CellCoord>,
        enemies: &'a [CellCoord],
    ) -> Self {
        Self {
            cells,
            size,
            player,
            enemies,
        }
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.size && cell.row() < self.size
    }

    /// Returns the occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether any category holds the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_some()
    }

    /// Reports whether the cell holds an obstacle or a wall.
    #[must_use]
    pub fn is_blocking(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_some_and(Occupant::is_blocking)
    }

    /// Cell holding the player, if placed.
    #[must_use]
    pub const fn player(&self) -> Option<CellCoord> {
        self.player
    }

    /// Enemy cells in placement order.
    #[must_use]
    pub const fn enemies(&self) -> &'a [CellCoord] {
        self.enemies
    }

    /// Iterates over every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |column| CellCoord::new(column, row)))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Outcome of tracing a discrete line between two cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TraceResult {
    path: Vec<CellCoord>,
    blocker: Option<CellCoord>,
}

impl TraceResult {
    /// Creates a trace that ended without hitting a blocking cell.
    #[must_use]
    pub fn open(path: Vec<CellCoord>) -> Self {
        Self {
            path,
            blocker: None,
        }
    }

    /// Creates a trace interrupted by a blocking cell.
    ///
    /// `blocker` is the last passable cell before the interruption.
    #[must_use]
    pub fn blocked(path: Vec<CellCoord>, blocker: CellCoord) -> Self {
        Self {
            path,
            blocker: Some(blocker),
        }
    }

    /// Reports whether a blocking cell interrupted the line.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocker.is_some()
    }

    /// Cells visited in emission order, starting with the source.
    ///
    /// A blocked path ends with the blocking cell itself.
    #[must_use]
    pub fn path(&self) -> &[CellCoord] {
        &self.path
    }

    /// Last passable cell before the interruption, present iff blocked.
    #[must_use]
    pub const fn blocker(&self) -> Option<CellCoord> {
        self.blocker
    }

    /// Final cell of the path, if any.
    #[must_use]
    pub fn end(&self) -> Option<CellCoord> {
        self.path.last().copied()
    }
}

/// Line of fire from a single enemy toward the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThreatReport {
    /// Enemy cell the line originates from.
    pub enemy: CellCoord,
    /// Player cell the line aims at.
    pub player: CellCoord,
    /// Traced line from the enemy to the player.
    pub trace: TraceResult,
}

impl ThreatReport {
    /// Reports whether the enemy's line is interrupted before the player.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.trace.is_blocked()
    }
}

/// Aggregate of every enemy's line of fire toward the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThreatAssessment {
    reports: Vec<ThreatReport>,
}

impl ThreatAssessment {
    /// Creates an assessment from per-enemy reports.
    #[must_use]
    pub fn new(reports: Vec<ThreatReport>) -> Self {
        Self { reports }
    }

    /// Per-enemy reports in enemy placement order.
    #[must_use]
    pub fn reports(&self) -> &[ThreatReport] {
        &self.reports
    }

    /// Reports whether every enemy's line is blocked.
    #[must_use]
    pub fn all_blocked(&self) -> bool {
        self.reports.iter().all(ThreatReport::is_blocked)
    }

    /// Number of enemy lines that reach the player.
    #[must_use]
    pub fn open_lines(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| !report.is_blocked())
            .count()
    }
}

/// Free cell from which a shot would strike at least one enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffenseCandidate {
    /// Cell the player would fire toward.
    pub cell: CellCoord,
    /// Number of distinct enemies on the line from the player to the cell.
    pub hit_count: u32,
}

/// Summary verdict for the current grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The grid lacks the tokens required for an evaluation.
    Unavailable(EvaluationError),
    /// Every enemy line is blocked.
    Safe,
    /// At least one enemy line reaches the player.
    Exposed {
        /// Number of enemy lines that reach the player.
        open_lines: usize,
    },
}

/// Complete tactical picture recomputed after each grid change.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SituationReport {
    /// Threat assessment, or the precondition that prevented it.
    pub threats: Result<ThreatAssessment, EvaluationError>,
    /// Suggested obstacle placements.
    pub defenses: Vec<CellCoord>,
    /// Suggested attack cells.
    pub offenses: Vec<OffenseCandidate>,
}

impl SituationReport {
    /// Condenses the threat assessment into a verdict.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match &self.threats {
            Err(error) => Verdict::Unavailable(*error),
            Ok(assessment) if assessment.all_blocked() => Verdict::Safe,
            Ok(assessment) => Verdict::Exposed {
                open_lines: assessment.open_lines(),
            },
        }
    }

    /// Human-readable status line describing the verdict.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.verdict() {
            Verdict::Unavailable(error) => format!("cannot evaluate: {error}"),
            Verdict::Safe => "all lines of fire are blocked, the player is safe".to_owned(),
            Verdict::Exposed { open_lines: 1 } => {
                "1 line of fire is open, place an obstacle".to_owned()
            }
            Verdict::Exposed { open_lines } => {
                format!("{open_lines} lines of fire are open, place obstacles")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, EvaluationError, GridSnapshot, GridView, Occupant, SituationReport,
        SnapshotError, ThreatAssessment, ThreatReport, TraceResult, Verdict,
    };

    #[test]
    fn only_obstacles_and_walls_block() {
        assert!(Occupant::Obstacle.is_blocking());
        assert!(Occupant::Wall.is_blocking());
        assert!(!Occupant::Player.is_blocking());
        assert!(!Occupant::Enemy.is_blocking());
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let snapshot = GridSnapshot {
            players: vec![CellCoord::new(0, 0)],
            enemies: vec![CellCoord::new(4, 4), CellCoord::new(2, 3)],
            obstacles: vec![CellCoord::new(1, 1)],
            walls: vec![CellCoord::new(3, 3)],
        };
        let bytes = bincode::serialize(&snapshot).expect("serialize");
        let restored: GridSnapshot = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn cell_serializes_with_xy_keys() {
        let json = serde_json::to_string(&CellCoord::new(3, 7)).expect("serialize");
        assert_eq!(json, r#"{"x":3,"y":7}"#);
    }

    #[test]
    fn snapshot_validation_rejects_stacked_cells() {
        let snapshot = GridSnapshot {
            players: vec![CellCoord::new(1, 1)],
            walls: vec![CellCoord::new(1, 1)],
            ..GridSnapshot::default()
        };
        assert_eq!(
            snapshot.validate(5),
            Err(SnapshotError::Stacked {
                cell: CellCoord::new(1, 1)
            })
        );
    }

    #[test]
    fn snapshot_validation_rejects_out_of_bounds_and_extra_players() {
        let outside = GridSnapshot {
            enemies: vec![CellCoord::new(5, 0)],
            ..GridSnapshot::default()
        };
        assert_eq!(
            outside.validate(5),
            Err(SnapshotError::OutOfBounds {
                cell: CellCoord::new(5, 0)
            })
        );

        let crowded = GridSnapshot {
            players: vec![CellCoord::new(0, 0), CellCoord::new(1, 0)],
            ..GridSnapshot::default()
        };
        assert_eq!(crowded.validate(5), Err(SnapshotError::MultiplePlayers));
    }

    #[test]
    fn grid_view_answers_occupancy_queries() {
        let mut cells = vec![None; 9];
        cells[4] = Some(Occupant::Wall);
        cells[0] = Some(Occupant::Player);
        let view = GridView::new(&cells, 3, Some(CellCoord::new(0, 0)), &[]);

        assert!(view.is_blocking(CellCoord::new(1, 1)));
        assert!(view.is_occupied(CellCoord::new(0, 0)));
        assert!(!view.is_blocking(CellCoord::new(0, 0)));
        assert!(!view.is_occupied(CellCoord::new(2, 2)));
        assert_eq!(view.occupant(CellCoord::new(3, 0)), None);
        assert_eq!(view.cells().count(), 9);
        assert_eq!(view.cells().nth(3), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn verdict_counts_open_lines() {
        let player = CellCoord::new(0, 0);
        let open = ThreatReport {
            enemy: CellCoord::new(2, 0),
            player,
            trace: TraceResult::open(vec![CellCoord::new(2, 0), CellCoord::new(1, 0), player]),
        };
        let closed = ThreatReport {
            enemy: CellCoord::new(0, 2),
            player,
            trace: TraceResult::blocked(
                vec![CellCoord::new(0, 2), CellCoord::new(0, 1)],
                CellCoord::new(0, 2),
            ),
        };
        let report = SituationReport {
            threats: Ok(ThreatAssessment::new(vec![open, closed])),
            defenses: Vec::new(),
            offenses: Vec::new(),
        };

        assert_eq!(report.verdict(), Verdict::Exposed { open_lines: 1 });
        assert!(report.status_line().starts_with("1 line"));
    }

    #[test]
    fn verdict_reports_missing_tokens() {
        let report = SituationReport {
            threats: Err(EvaluationError::MissingPlayer),
            defenses: Vec::new(),
            offenses: Vec::new(),
        };
        assert_eq!(
            report.verdict(),
            Verdict::Unavailable(EvaluationError::MissingPlayer)
        );
        assert_eq!(report.status_line(), "cannot evaluate: place the player first");
    }
}
