use std::collections::VecDeque;

use crate::grid::Grid;

/// Maximum number of revisions retained for undo.
const HISTORY_LIMIT: usize = 128;

/// Undo and redo stacks of whole-grid revisions.
#[derive(Debug, Default)]
pub(crate) struct History {
    undo: VecDeque<Grid>,
    redo: Vec<Grid>,
}

impl History {
    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Records the revision that preceded a successful edit.
    pub(crate) fn record(&mut self, previous: Grid) {
        if self.undo.len() == HISTORY_LIMIT {
            let _ = self.undo.pop_front();
        }
        self.undo.push_back(previous);
        self.redo.clear();
    }

    /// Swaps `current` for the previous revision, if one exists.
    pub(crate) fn undo(&mut self, current: &mut Grid) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, previous));
        true
    }

    /// Swaps `current` for the most recently undone revision, if one exists.
    pub(crate) fn redo(&mut self, current: &mut Grid) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(std::mem::replace(current, next));
        true
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
