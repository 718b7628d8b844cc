#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state management for the ballistics engine.

mod grid;
mod history;

use ballistics_core::{
    Command, Event, HistoryDirection, Occupant, DEFAULT_GRID_SIZE, MAX_GRID_SIZE,
};
use tracing::{debug, warn};

pub use grid::Grid;
use history::History;

/// Represents the authoritative grid state and its edit history.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    history: History,
}

impl World {
    /// Creates a world holding an empty grid of the default dimension.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_GRID_SIZE)
    }

    /// Creates a world holding an empty grid with `size` cells per edge.
    #[must_use]
    pub fn with_size(size: u32) -> Self {
        Self {
            grid: Grid::new(size),
            history: History::default(),
        }
    }

    fn commit(&mut self, previous: Grid) {
        if previous != self.grid {
            self.history.record(previous);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            if size == 0 {
                warn!("ignoring request for an empty grid");
                return;
            }
            if size > MAX_GRID_SIZE {
                warn!(size, max = MAX_GRID_SIZE, "ignoring request for an oversized grid");
                return;
            }
            world.grid = Grid::new(size);
            world.history.clear();
            debug!(size, "grid configured");
            out_events.push(Event::GridConfigured { size });
        }
        Command::Place { occupant, cell } => {
            let previous = world.grid.clone();
            match world.grid.place(occupant, cell) {
                Ok(displaced) => {
                    world.commit(previous);
                    if let Some(from) = displaced {
                        out_events.push(Event::OccupantRemoved {
                            occupant: Occupant::Player,
                            cell: from,
                        });
                    }
                    debug!(occupant = occupant.label(), %cell, "occupant placed");
                    out_events.push(Event::OccupantPlaced { occupant, cell });
                }
                Err(reason) => {
                    warn!(occupant = occupant.label(), %cell, %reason, "placement rejected");
                    out_events.push(Event::PlacementRejected {
                        occupant,
                        cell,
                        reason,
                    });
                }
            }
        }
        Command::Remove { cell } => {
            let previous = world.grid.clone();
            match world.grid.remove(cell) {
                Ok(Some(occupant)) => {
                    world.commit(previous);
                    debug!(occupant = occupant.label(), %cell, "occupant removed");
                    out_events.push(Event::OccupantRemoved { occupant, cell });
                }
                Ok(None) => {}
                Err(reason) => {
                    warn!(%cell, %reason, "removal rejected");
                    out_events.push(Event::RemovalRejected { cell, reason });
                }
            }
        }
        Command::Clear => {
            let previous = world.grid.clone();
            world.grid.clear();
            world.commit(previous);
            out_events.push(Event::GridCleared);
        }
        Command::LoadSnapshot { snapshot } => {
            let previous = world.grid.clone();
            match world.grid.replace(&snapshot) {
                Ok(()) => {
                    world.commit(previous);
                    debug!(size = world.grid.size(), "snapshot loaded");
                    out_events.push(Event::SnapshotLoaded);
                }
                Err(reason) => {
                    warn!(%reason, "snapshot rejected");
                    out_events.push(Event::SnapshotRejected { reason });
                }
            }
        }
        Command::Undo => {
            if world.history.undo(&mut world.grid) {
                out_events.push(Event::HistoryRestored {
                    direction: HistoryDirection::Undo,
                });
            }
        }
        Command::Redo => {
            if world.history.redo(&mut world.grid) {
                out_events.push(Event::HistoryRestored {
                    direction: HistoryDirection::Redo,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use ballistics_core::{CellCoord, GridSnapshot, GridView, Occupant};

    use super::{Grid, World};

    /// Provides read-only access to the current grid revision.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures a read-only view of the grid for systems.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid.view()
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub fn grid_size(world: &World) -> u32 {
        world.grid.size()
    }

    /// Returns the occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant_at(world: &World, cell: CellCoord) -> Option<Occupant> {
        world.grid.occupant_at(cell)
    }

    /// Captures the occupancy lists describing the current grid.
    #[must_use]
    pub fn snapshot(world: &World) -> GridSnapshot {
        world.grid.snapshot()
    }

    /// Reports whether an earlier revision can be restored.
    #[must_use]
    pub fn can_undo(world: &World) -> bool {
        world.history.can_undo()
    }

    /// Reports whether an undone revision can be re-applied.
    #[must_use]
    pub fn can_redo(world: &World) -> bool {
        world.history.can_redo()
    }
}
