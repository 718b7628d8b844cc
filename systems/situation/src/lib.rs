#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that republishes the tactical situation after grid changes.
//!
//! Nothing is cached between grid revisions: every layout change triggers a
//! full recomputation of threats, defenses and offenses.

use ballistics_core::{Event, GridView, SituationReport};
use ballistics_system_defense::recommend_defenses;
use ballistics_system_offense::recommend_offenses;
use ballistics_system_threat::evaluate_threats;
use tracing::debug;

/// Computes a complete situation report for the provided grid.
#[must_use]
pub fn assess(grid: &GridView<'_>) -> SituationReport {
    let threats = evaluate_threats(grid);
    let defenses = match &threats {
        Ok(assessment) => recommend_defenses(grid, assessment.reports()),
        Err(_) => Vec::new(),
    };
    let offenses = recommend_offenses(grid);

    SituationReport {
        threats,
        defenses,
        offenses,
    }
}

/// Situation system that recomputes reports whenever the layout changes.
#[derive(Debug, Default)]
pub struct Situation {
    last_report: Option<SituationReport>,
}

impl Situation {
    /// Creates a new situation system without a published report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&SituationReport> {
        self.last_report.as_ref()
    }

    /// Consumes world events and publishes a fresh report after layout changes.
    ///
    /// At most one report is published per call regardless of how many
    /// layout-changing events were observed.
    pub fn handle(&mut self, events: &[Event], grid: &GridView<'_>, out: &mut Vec<Event>) {
        if !events.iter().any(Event::changes_layout) {
            return;
        }

        let report = assess(grid);
        debug!(status = %report.status_line(), "situation updated");
        self.last_report = Some(report.clone());
        out.push(Event::SituationUpdated { report });
    }
}
