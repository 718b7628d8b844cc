use anyhow::{anyhow, Context, Result};
use ballistics_core::{CellCoord, Command, Event, Occupant, SituationReport};
use ballistics_system_editor::{EditAction, Editor, EditorInput};
use ballistics_system_situation::{assess, Situation};
use ballistics_world::{self as world, query, World};
use tracing::debug;

/// Owns the world and the systems driven by the command-line adapter.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    situation: Situation,
    editor: Editor,
    report: Option<SituationReport>,
}

impl Session {
    /// Creates a session holding an empty grid of the provided dimension.
    pub(crate) fn new(size: u32) -> Self {
        Self {
            world: World::with_size(size),
            situation: Situation::new(),
            editor: Editor::new(),
            report: None,
        }
    }

    /// Read access to the authoritative world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies a command, turning rejection events into errors.
    pub(crate) fn apply(&mut self, command: Command) -> Result<()> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        for event in &events {
            match event {
                Event::PlacementRejected {
                    occupant,
                    cell,
                    reason,
                } => {
                    return Err(anyhow::Error::new(*reason)
                        .context(format!("cannot place {} at {cell}", occupant.label())));
                }
                Event::RemovalRejected { cell, reason } => {
                    return Err(anyhow::Error::new(*reason).context(format!("cannot clear {cell}")));
                }
                Event::SnapshotRejected { reason } => {
                    return Err(anyhow::Error::new(*reason).context("cannot load layout"));
                }
                _ => {}
            }
        }

        let mut published = Vec::new();
        self.situation
            .handle(&events, &query::grid_view(&self.world), &mut published);
        for event in published {
            if let Event::SituationUpdated { report } = event {
                debug!(status = %report.status_line(), "situation published");
                self.report = Some(report);
            }
        }
        Ok(())
    }

    /// Toggles `occupant` at `cell` the way an editor click would.
    pub(crate) fn toggle(&mut self, occupant: Occupant, cell: CellCoord) -> Result<EditAction> {
        self.editor.select_tool(occupant);
        let mut commands = Vec::new();
        let world = &self.world;
        let action = self
            .editor
            .handle(
                EditorInput::new(true, Some(cell)),
                |cell| query::occupant_at(world, cell),
                &mut commands,
            )
            .ok_or_else(|| anyhow!("editor ignored the toggle at {cell}"))?;

        for command in commands {
            self.apply(command)
                .with_context(|| format!("cannot toggle {} at {cell}", occupant.label()))?;
        }
        Ok(action)
    }

    /// Returns the latest published situation report for the current grid.
    pub(crate) fn report(&self) -> SituationReport {
        match &self.report {
            Some(report) => report.clone(),
            None => assess(&query::grid_view(&self.world)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_core::{EvaluationError, GridError, Verdict};

    #[test]
    fn rejected_placements_surface_as_errors() {
        let mut session = Session::new(5);
        session
            .apply(Command::Place {
                occupant: Occupant::Player,
                cell: CellCoord::new(0, 0),
            })
            .expect("placement succeeds");

        let error = session
            .apply(Command::Place {
                occupant: Occupant::Enemy,
                cell: CellCoord::new(0, 0),
            })
            .expect_err("occupied cell is rejected");
        assert_eq!(
            error.downcast_ref::<GridError>(),
            Some(&GridError::AlreadyOccupied)
        );
    }

    #[test]
    fn toggling_twice_restores_the_cell() {
        let mut session = Session::new(5);
        let cell = CellCoord::new(2, 2);

        assert_eq!(
            session.toggle(Occupant::Wall, cell).expect("toggle places"),
            EditAction::Place(Occupant::Wall)
        );
        assert_eq!(query::occupant_at(session.world(), cell), Some(Occupant::Wall));

        assert_eq!(
            session.toggle(Occupant::Enemy, cell).expect("toggle removes"),
            EditAction::Remove(Occupant::Wall)
        );
        assert_eq!(query::occupant_at(session.world(), cell), None);
    }

    #[test]
    fn report_tracks_the_latest_layout() {
        let mut session = Session::new(5);
        assert_eq!(
            session.report().verdict(),
            Verdict::Unavailable(EvaluationError::MissingPlayer)
        );

        session
            .apply(Command::Place {
                occupant: Occupant::Player,
                cell: CellCoord::new(0, 0),
            })
            .expect("player placed");
        session
            .apply(Command::Place {
                occupant: Occupant::Enemy,
                cell: CellCoord::new(4, 0),
            })
            .expect("enemy placed");
        assert_eq!(session.report().verdict(), Verdict::Exposed { open_lines: 1 });
    }

    #[test]
    fn report_follows_published_updates_only() {
        let mut session = Session::new(5);
        for (occupant, cell) in [
            (Occupant::Player, CellCoord::new(0, 0)),
            (Occupant::Enemy, CellCoord::new(4, 0)),
            (Occupant::Wall, CellCoord::new(2, 0)),
        ] {
            session
                .apply(Command::Place { occupant, cell })
                .expect("placement succeeds");
        }
        let published = session.report();
        assert_eq!(published.verdict(), Verdict::Safe);
        assert_eq!(published, assess(&query::grid_view(session.world())));

        let _ = session
            .apply(Command::Place {
                occupant: Occupant::Obstacle,
                cell: CellCoord::new(2, 0),
            })
            .expect_err("occupied cell is rejected");
        assert_eq!(session.report(), published);

        session.apply(Command::Undo).expect("undo succeeds");
        assert_eq!(session.report().verdict(), Verdict::Exposed { open_lines: 1 });
    }
}
