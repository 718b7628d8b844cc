#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that evaluates lines of fire on a tactical grid.

mod edits;
mod layout_transfer;
mod render;
mod scenarios;
mod session;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use ballistics_core::{CellCoord, Command, MAX_GRID_SIZE};
use ballistics_world::query;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    edits::{parse_cell, parse_placement, Placement},
    layout_transfer::LayoutSnapshot,
    session::Session,
    settings::Settings,
};

/// Evaluates enemy lines of fire against the player and suggests cover.
#[derive(Debug, Parser)]
#[command(name = "ballistics", author, version, about, long_about = None)]
struct Cli {
    /// Settings file; `ballistics.toml` in the working directory is used when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of cells along each edge of the grid.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_GRID_SIZE)))]
    size: Option<u32>,
    /// Scenario catalog JSON replacing the built-in catalog.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Scenario identifier to load before applying edits.
    #[arg(long, conflicts_with = "layout")]
    scenario: Option<String>,
    /// Layout transfer string to load before applying edits.
    #[arg(long)]
    layout: Option<String>,
    /// Places a token on a free cell, as `kind@x,y`.
    #[arg(long = "place", value_name = "KIND@X,Y", value_parser = parse_placement)]
    places: Vec<Placement>,
    /// Toggles a token the way an editor click does, as `kind@x,y`.
    #[arg(long = "toggle", value_name = "KIND@X,Y", value_parser = parse_placement)]
    toggles: Vec<Placement>,
    /// Clears an occupied cell, as `x,y`.
    #[arg(long = "remove", value_name = "X,Y", value_parser = parse_cell)]
    removals: Vec<CellCoord>,
    #[command(subcommand)]
    output: Option<Output>,
}

/// Output produced after the grid has been assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Subcommand)]
enum Output {
    /// Lists every enemy line of fire toward the player.
    Threats,
    /// Lists suggested cover cells.
    Defenses,
    /// Lists cells the player could fire toward and the enemies hit.
    Offenses,
    /// Draws the grid with suggestions and a status line.
    #[default]
    Report,
    /// Lists the scenarios in the catalog.
    Scenarios,
    /// Prints a layout transfer string for the assembled grid.
    Export,
}

/// Entry point for the ballistics command-line interface.
fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::discover()?,
    };
    let catalog_path = cli.catalog.clone().or(settings.catalog.clone());
    let output = cli.output.unwrap_or_default();

    if output == Output::Scenarios {
        let catalog = scenarios::load_catalog(catalog_path.as_deref())?;
        for scenario in &catalog.scenarios {
            println!("{:<12} {:<16} {}", scenario.id, scenario.name, scenario.description);
        }
        return Ok(());
    }

    let layout = cli
        .layout
        .as_deref()
        .map(LayoutSnapshot::decode)
        .transpose()
        .context("invalid --layout value")?;
    let size = cli
        .size
        .or(layout.as_ref().map(|layout| layout.size))
        .unwrap_or(settings.grid_size);
    debug!(size, "starting session");

    let mut session = Session::new(size);

    if let Some(id) = &cli.scenario {
        let catalog = scenarios::load_catalog(catalog_path.as_deref())?;
        let scenario = catalog
            .find(id)
            .with_context(|| format!("no scenario named '{id}' in the catalog"))?;
        info!(scenario = %scenario.id, "loading scenario");
        session
            .apply(Command::LoadSnapshot {
                snapshot: scenario.entities.clone(),
            })
            .with_context(|| format!("scenario '{id}' does not fit a {size}x{size} grid"))?;
    }

    if let Some(layout) = layout {
        session.apply(Command::LoadSnapshot {
            snapshot: layout.grid,
        })?;
    }

    for cell in cli.removals {
        session.apply(Command::Remove { cell })?;
    }

    for Placement { occupant, cell } in cli.places {
        session.apply(Command::Place { occupant, cell })?;
    }

    for Placement { occupant, cell } in cli.toggles {
        let action = session.toggle(occupant, cell)?;
        debug!(?action, %cell, "toggled cell");
    }

    print_output(&session, output)
}

fn print_output(session: &Session, output: Output) -> Result<()> {
    let report = session.report();
    match output {
        Output::Threats => match &report.threats {
            Ok(assessment) => {
                for threat in assessment.reports() {
                    println!("{}", render::threat_line(threat));
                }
            }
            Err(error) => println!("cannot evaluate: {error}"),
        },
        Output::Defenses => {
            for cell in &report.defenses {
                println!("{cell}");
            }
        }
        Output::Offenses => {
            for candidate in &report.offenses {
                println!("{} hits {}", candidate.cell, candidate.hit_count);
            }
        }
        Output::Report => {
            print!("{}", render::board(&query::grid_view(session.world()), &report));
            println!("{}", report.status_line());
        }
        Output::Export => {
            let snapshot = LayoutSnapshot {
                size: query::grid_size(session.world()),
                grid: query::snapshot(session.world()),
            };
            println!("{}", snapshot.encode()?);
        }
        Output::Scenarios => {}
    }
    Ok(())
}
