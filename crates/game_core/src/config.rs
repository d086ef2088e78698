use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::{
    domain::{
        BoardLayout, MoveInterval, DEFAULT_COLUMNS, DEFAULT_MOVE_INTERVAL_MS, DEFAULT_TOTAL_CELLS,
    },
    error::{validate_speed_factor, GameError},
    protocol::{SPEED_DOWN_FACTOR, SPEED_UP_FACTOR},
};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_SETTINGS_FILE: &str = "goblin.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub total_cells: usize,
    pub columns: usize,
    pub move_interval_ms: u64,
    pub speed_up_factor: f64,
    pub speed_down_factor: f64,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            total_cells: DEFAULT_TOTAL_CELLS,
            columns: DEFAULT_COLUMNS,
            move_interval_ms: DEFAULT_MOVE_INTERVAL_MS,
            speed_up_factor: SPEED_UP_FACTOR,
            speed_down_factor: SPEED_DOWN_FACTOR,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedFactors {
    pub up: f64,
    pub down: f64,
}

impl Default for SpeedFactors {
    fn default() -> Self {
        Self {
            up: SPEED_UP_FACTOR,
            down: SPEED_DOWN_FACTOR,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] GameError),
}

impl GameSettings {
    pub fn layout(&self) -> Result<BoardLayout, GameError> {
        BoardLayout::new(self.total_cells, self.columns)
    }

    pub fn move_interval(&self) -> MoveInterval {
        MoveInterval::from_millis(self.move_interval_ms)
    }

    pub fn speed_factors(&self) -> Result<SpeedFactors, GameError> {
        Ok(SpeedFactors {
            up: validate_speed_factor(self.speed_up_factor)?,
            down: validate_speed_factor(self.speed_down_factor)?,
        })
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.layout()?;
        self.speed_factors()?;
        Ok(())
    }
}

/// Loads settings from `goblin.toml` in the working directory when present,
/// then applies `APP__*` environment overrides.
pub fn load_settings() -> Result<GameSettings, SettingsError> {
    load_settings_from(None)
}

/// Like [`load_settings`], but an explicit `path` replaces the default file
/// and must exist.
pub fn load_settings_from(path: Option<&Path>) -> Result<GameSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                GameSettings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<GameSettings, toml::de::Error> {
    toml::from_str(raw)
}

fn read_settings_file(path: &Path) -> Result<GameSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded game settings");
    Ok(settings)
}

fn apply_env_overrides(settings: &mut GameSettings, lookup: impl Fn(&str) -> Option<String>) {
    override_from(&lookup, "APP__TOTAL_CELLS", &mut settings.total_cells);
    override_from(&lookup, "APP__COLUMNS", &mut settings.columns);
    override_from(&lookup, "APP__MOVE_INTERVAL_MS", &mut settings.move_interval_ms);
    override_from(&lookup, "APP__SPEED_UP_FACTOR", &mut settings.speed_up_factor);
    override_from(&lookup, "APP__SPEED_DOWN_FACTOR", &mut settings.speed_down_factor);

    if let Some(raw) = lookup("APP__SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => settings.seed = Some(seed),
            Err(_) => warn!(key = "APP__SEED", value = %raw, "ignoring unparseable override"),
        }
    }
}

fn override_from<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "ignoring unparseable override"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
