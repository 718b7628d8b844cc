#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that traces discrete lines of fire across the grid.
//!
//! Lines are rasterised with integer-only Bresenham stepping. The axis with
//! the larger delta advances every step; when both deltas are equal the row
//! axis is the major one. A line stops at the first blocking cell it enters,
//! and the collision is charged to the cell visited just before it. The
//! source cell is never tested, so a shooter is never blocked by its own cell.

use ballistics_core::{CellCoord, GridView, TraceResult};

/// Traces the line from `source` toward `destination`.
///
/// The walk ends when it reaches `destination`, enters a blocking cell, or
/// leaves the grid. Leaving the grid yields an unblocked result whose path
/// stops at the last in-bounds cell. A source outside the grid produces an
/// empty, unblocked path.
#[must_use]
pub fn trace(grid: &GridView<'_>, source: CellCoord, destination: CellCoord) -> TraceResult {
    let mut walker = LineWalker::new(source, destination);
    let mut path = Vec::with_capacity(walker.expected_len());
    let mut previous: Option<CellCoord> = None;

    while let Some(current) = walker.current_cell(grid) {
        if current != source && grid.is_blocking(current) {
            path.push(current);
            return TraceResult::blocked(path, previous.unwrap_or(current));
        }

        path.push(current);
        if current == destination {
            break;
        }

        previous = Some(current);
        walker.advance();
    }

    TraceResult::open(path)
}

/// Reports whether a line from `source` reaches `destination` unobstructed.
#[must_use]
pub fn has_line_of_sight(grid: &GridView<'_>, source: CellCoord, destination: CellCoord) -> bool {
    let result = trace(grid, source, destination);
    !result.is_blocked() && result.end() == Some(destination)
}

/// Bresenham stepping state in signed coordinates.
#[derive(Clone, Copy, Debug)]
struct LineWalker {
    column: i64,
    row: i64,
    column_major: bool,
    major_step: i64,
    minor_step: i64,
    major_delta: i64,
    minor_delta: i64,
    error: i64,
}

impl LineWalker {
    fn new(source: CellCoord, destination: CellCoord) -> Self {
        let column = i64::from(source.column());
        let row = i64::from(source.row());
        let delta_column = i64::from(destination.column()) - column;
        let delta_row = i64::from(destination.row()) - row;

        // Zero deltas pick -1; the direction is unused when the magnitude is zero.
        let step_column = if delta_column > 0 { 1 } else { -1 };
        let step_row = if delta_row > 0 { 1 } else { -1 };
        let abs_column = delta_column.abs();
        let abs_row = delta_row.abs();

        let column_major = abs_column > abs_row;
        let (major_step, minor_step, major_delta, minor_delta) = if column_major {
            (step_column, step_row, abs_column, abs_row)
        } else {
            (step_row, step_column, abs_row, abs_column)
        };

        Self {
            column,
            row,
            column_major,
            major_step,
            minor_step,
            major_delta,
            minor_delta,
            error: major_delta / 2,
        }
    }

    fn expected_len(&self) -> usize {
        usize::try_from(self.major_delta.saturating_add(1)).unwrap_or(1)
    }

    fn current_cell(&self, grid: &GridView<'_>) -> Option<CellCoord> {
        let column = u32::try_from(self.column).ok()?;
        let row = u32::try_from(self.row).ok()?;
        let cell = CellCoord::new(column, row);
        grid.contains(cell).then_some(cell)
    }

    fn advance(&mut self) {
        if self.column_major {
            self.column += self.major_step;
        } else {
            self.row += self.major_step;
        }

        self.error += self.minor_delta;
        if self.error >= self.major_delta {
            self.error -= self.major_delta;
            if self.column_major {
                self.row += self.minor_step;
            } else {
                self.column += self.minor_step;
            }
        }
    }
}
