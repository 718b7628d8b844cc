use std::{fs, path::Path};

use anyhow::{Context, Result};
use ballistics_core::ScenarioCatalog;

const BUILTIN_CATALOG: &str = include_str!("../scenarios.json");

/// Loads the scenario catalog at `path`, or the built-in catalog when absent.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ScenarioCatalog> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path).with_context(|| {
                format!("failed to read scenario catalog at {}", path.display())
            })?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse scenario catalog {}", path.display()))
        }
        None => {
            serde_json::from_str(BUILTIN_CATALOG).context("built-in scenario catalog is invalid")
        }
    }
}
