use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use ballistics_core::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use serde::Deserialize;

const SUPPORTED_SETTINGS_VERSION: u32 = 1;

/// Settings file picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_SETTINGS_PATH: &str = "ballistics.toml";

/// Resolved adapter settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Grid dimension used unless a layout or flag overrides it.
    pub(crate) grid_size: u32,
    /// Scenario catalog to use instead of the built-in one.
    pub(crate) catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            catalog: None,
        }
    }
}

impl Settings {
    /// Loads settings from the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        parse_settings(&contents, &base)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    /// Loads the default settings file if present, falling back to defaults.
    pub(crate) fn discover() -> Result<Self> {
        let path = Path::new(DEFAULT_SETTINGS_PATH);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    version: u32,
    grid_size: Option<u32>,
    catalog: Option<PathBuf>,
}

fn parse_settings(contents: &str, base_path: &Path) -> Result<Settings> {
    let file: SettingsFile =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if file.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            file.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }

    let grid_size = file.grid_size.unwrap_or(DEFAULT_GRID_SIZE);
    if grid_size == 0 || grid_size > MAX_GRID_SIZE {
        bail!("grid_size must be between 1 and {MAX_GRID_SIZE}, got {grid_size}");
    }

    Ok(Settings {
        grid_size,
        catalog: file.catalog.map(|catalog| base_path.join(catalog)),
    })
}
