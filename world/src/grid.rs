use ballistics_core::{
    CellCoord, GridError, GridSnapshot, GridView, Occupant, SnapshotError, MAX_GRID_SIZE,
};

/// Square grid holding four disjoint occupant categories.
///
/// Every cell holds at most one occupant and at most one player exists. The
/// dense `cells` array answers occupancy queries, while the per-category lists
/// preserve placement order for deterministic iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<Option<Occupant>>,
    player: Option<CellCoord>,
    enemies: Vec<CellCoord>,
    obstacles: Vec<CellCoord>,
    walls: Vec<CellCoord>,
}

impl Grid {
    /// Creates an empty grid with `size` cells along each edge.
    ///
    /// Sizes above [`MAX_GRID_SIZE`] are clamped.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let size = size.min(MAX_GRID_SIZE);
        let edge = usize::try_from(size).unwrap_or(0);
        let capacity = edge.checked_mul(edge).unwrap_or(0);
        Self {
            size,
            cells: vec![None; capacity],
            player: None,
            enemies: Vec::new(),
            obstacles: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Captures a read-only view for systems.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.size, self.player, &self.enemies)
    }

    /// Returns the occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant_at(&self, cell: CellCoord) -> Option<Occupant> {
        self.index(cell).and_then(|index| self.cells[index])
    }

    /// Reports whether any category holds the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.occupant_at(cell).is_some()
    }

    /// Reports whether the cell holds an obstacle or a wall.
    #[must_use]
    pub fn is_blocking(&self, cell: CellCoord) -> bool {
        self.occupant_at(cell).is_some_and(Occupant::is_blocking)
    }

    /// Reports whether the grid holds no occupants at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player.is_none()
            && self.enemies.is_empty()
            && self.obstacles.is_empty()
            && self.walls.is_empty()
    }

    /// Places `occupant` on a free cell.
    ///
    /// Placing a player relocates the existing one; the displaced cell is
    /// returned so callers can report it.
    pub fn place(
        &mut self,
        occupant: Occupant,
        cell: CellCoord,
    ) -> Result<Option<CellCoord>, GridError> {
        let index = self.index(cell).ok_or(GridError::OutOfBounds)?;
        if self.cells[index].is_some() {
            return Err(GridError::AlreadyOccupied);
        }

        let displaced = match occupant {
            Occupant::Player => {
                let previous = self.player.replace(cell);
                if let Some(previous) = previous {
                    if let Some(previous_index) = self.index(previous) {
                        self.cells[previous_index] = None;
                    }
                }
                previous
            }
            Occupant::Enemy => {
                self.enemies.push(cell);
                None
            }
            Occupant::Obstacle => {
                self.obstacles.push(cell);
                None
            }
            Occupant::Wall => {
                self.walls.push(cell);
                None
            }
        };
        self.cells[index] = Some(occupant);
        Ok(displaced)
    }

    /// Clears the provided cell, returning the occupant that held it.
    ///
    /// Removing from an empty cell is a no-op that yields `None`.
    pub fn remove(&mut self, cell: CellCoord) -> Result<Option<Occupant>, GridError> {
        let index = self.index(cell).ok_or(GridError::OutOfBounds)?;
        let Some(occupant) = self.cells[index].take() else {
            return Ok(None);
        };

        match occupant {
            Occupant::Player => self.player = None,
            Occupant::Enemy => self.enemies.retain(|enemy| *enemy != cell),
            Occupant::Obstacle => self.obstacles.retain(|obstacle| *obstacle != cell),
            Occupant::Wall => self.walls.retain(|wall| *wall != cell),
        }
        Ok(Some(occupant))
    }

    /// Removes every occupant while keeping the grid dimension.
    pub fn clear(&mut self) {
        *self = Self::new(self.size);
    }

    /// Replaces the grid contents with the provided snapshot.
    ///
    /// The snapshot is validated up front so a rejected load leaves the grid
    /// untouched.
    pub fn replace(&mut self, snapshot: &GridSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate(self.size)?;

        let mut replacement = Self::new(self.size);
        for (occupant, cell) in snapshot.entries() {
            if replacement.place(occupant, cell).is_err() {
                return Err(SnapshotError::Stacked { cell });
            }
        }
        *self = replacement;
        Ok(())
    }

    /// Captures the occupancy lists describing the grid.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            players: self.player.into_iter().collect(),
            enemies: self.enemies.clone(),
            obstacles: self.obstacles.clone(),
            walls: self.walls.clone(),
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.size && cell.row() < self.size {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placing_second_player_relocates_the_first() {
        let mut grid = Grid::new(5);
        assert_eq!(grid.place(Occupant::Player, CellCoord::new(0, 0)), Ok(None));
        assert_eq!(
            grid.place(Occupant::Player, CellCoord::new(3, 3)),
            Ok(Some(CellCoord::new(0, 0)))
        );

        assert!(!grid.is_occupied(CellCoord::new(0, 0)));
        assert_eq!(grid.view().player(), Some(CellCoord::new(3, 3)));
        assert_eq!(grid.snapshot().players, vec![CellCoord::new(3, 3)]);
    }

    #[test]
    fn placement_onto_occupied_cell_is_rejected() {
        let mut grid = Grid::new(5);
        let cell = CellCoord::new(2, 2);
        assert_eq!(grid.place(Occupant::Wall, cell), Ok(None));
        let before = grid.clone();

        assert_eq!(
            grid.place(Occupant::Enemy, cell),
            Err(GridError::AlreadyOccupied)
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn out_of_bounds_edits_leave_grid_unchanged() {
        let mut grid = Grid::new(5);
        assert_eq!(
            grid.place(Occupant::Obstacle, CellCoord::new(5, 0)),
            Err(GridError::OutOfBounds)
        );
        assert_eq!(
            grid.remove(CellCoord::new(0, 9)),
            Err(GridError::OutOfBounds)
        );
        assert!(grid.is_empty());
    }

    #[test]
    fn remove_returns_occupant_and_is_noop_when_empty() {
        let mut grid = Grid::new(5);
        let cell = CellCoord::new(1, 4);
        let _ = grid.place(Occupant::Enemy, cell);

        assert_eq!(grid.remove(cell), Ok(Some(Occupant::Enemy)));
        assert!(grid.view().enemies().is_empty());
        assert_eq!(grid.remove(cell), Ok(None));
    }

    #[test]
    fn blocking_covers_walls_and_obstacles_only() {
        let mut grid = Grid::new(4);
        let _ = grid.place(Occupant::Wall, CellCoord::new(0, 1));
        let _ = grid.place(Occupant::Obstacle, CellCoord::new(1, 1));
        let _ = grid.place(Occupant::Enemy, CellCoord::new(2, 1));

        assert!(grid.is_blocking(CellCoord::new(0, 1)));
        assert!(grid.is_blocking(CellCoord::new(1, 1)));
        assert!(!grid.is_blocking(CellCoord::new(2, 1)));
        assert!(!grid.is_blocking(CellCoord::new(3, 1)));
    }

    #[test]
    fn replace_rejects_invalid_snapshot_without_side_effects() {
        let mut grid = Grid::new(5);
        let _ = grid.place(Occupant::Player, CellCoord::new(0, 0));
        let before = grid.clone();

        let snapshot = GridSnapshot {
            enemies: vec![CellCoord::new(1, 1), CellCoord::new(1, 1)],
            ..GridSnapshot::default()
        };
        assert_eq!(
            grid.replace(&snapshot),
            Err(SnapshotError::Stacked {
                cell: CellCoord::new(1, 1)
            })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn replace_round_trips_snapshot() {
        let snapshot = GridSnapshot {
            players: vec![CellCoord::new(2, 2)],
            enemies: vec![CellCoord::new(4, 0), CellCoord::new(0, 4)],
            obstacles: vec![CellCoord::new(3, 1)],
            walls: vec![CellCoord::new(1, 3)],
        };
        let mut grid = Grid::new(5);
        assert_eq!(grid.replace(&snapshot), Ok(()));
        assert_eq!(grid.snapshot(), snapshot);

        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.size(), 5);
    }
}
