#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editing system that turns pointer-style input into grid commands.
//!
//! The world rejects placement onto an occupied cell. Click-to-toggle editing
//! lives here instead: activating an occupied cell removes its occupant, and
//! activating a free cell places the selected tool.

use ballistics_core::{CellCoord, Command, Occupant};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorInput {
    /// Indicates whether the user activated the cursor cell on this frame.
    pub activate: bool,
    /// Cell currently under the cursor, already translated to grid coordinates.
    pub cursor_cell: Option<CellCoord>,
}

impl EditorInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(activate: bool, cursor_cell: Option<CellCoord>) -> Self {
        Self {
            activate,
            cursor_cell,
        }
    }
}

/// Outcome of a toggle request, useful for status messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// The cursor cell was free and the selected tool will be placed.
    Place(Occupant),
    /// The cursor cell was occupied and its occupant will be removed.
    Remove(Occupant),
}

/// Editing system holding the currently selected tool.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    tool: Option<Occupant>,
}

impl Editor {
    /// Creates a new editor with no tool selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { tool: None }
    }

    /// Selects the occupant category placed on free cells.
    pub fn select_tool(&mut self, tool: Occupant) {
        self.tool = Some(tool);
    }

    /// Currently selected tool, if any.
    #[must_use]
    pub const fn tool(&self) -> Option<Occupant> {
        self.tool
    }

    /// Translates input into at most one command.
    ///
    /// The `occupant_at` closure should mirror the world's
    /// `query::occupant_at` helper. Nothing is emitted without a selected tool,
    /// mirroring an editor that asks the user to pick a tool first.
    pub fn handle<F>(
        &mut self,
        input: EditorInput,
        mut occupant_at: F,
        out: &mut Vec<Command>,
    ) -> Option<EditAction>
    where
        F: FnMut(CellCoord) -> Option<Occupant>,
    {
        if !input.activate {
            return None;
        }
        let tool = self.tool?;
        let cell = input.cursor_cell?;

        match occupant_at(cell) {
            Some(occupant) => {
                out.push(Command::Remove { cell });
                Some(EditAction::Remove(occupant))
            }
            None => {
                out.push(Command::Place {
                    occupant: tool,
                    cell,
                });
                Some(EditAction::Place(tool))
            }
        }
    }
}
