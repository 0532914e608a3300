/// Game configuration: built-in defaults, then an optional JSON file, then
/// environment variables, then command-line flags.
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::ConfigError;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "guessduel.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub min_number: i32,
    pub max_number: i32,
    pub max_attempts: u32,
    /// How long the computer "thinks" before guessing.
    pub computer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_number: 1,
            max_number: 100,
            max_attempts: 12,
            computer_delay_ms: 1500,
        }
    }
}

/// Values that replace whatever the file and environment produced.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub min_number: Option<i32>,
    pub max_number: Option<i32>,
    pub max_attempts: Option<u32>,
    pub computer_delay_ms: Option<u64>,
}

impl GameConfig {
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_number > self.max_number {
            return Err(ConfigError::InvertedRange {
                min: self.min_number,
                max: self.max_number,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid game config JSON")
    }

    /// Layer environment variables on top. Unparseable values are skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_env(&lookup, "GUESSDUEL_MIN_NUMBER") {
            self.min_number = v;
        }
        if let Some(v) = parse_env(&lookup, "GUESSDUEL_MAX_NUMBER") {
            self.max_number = v;
        }
        if let Some(v) = parse_env(&lookup, "GUESSDUEL_MAX_ATTEMPTS") {
            self.max_attempts = v;
        }
        if let Some(v) = parse_env(&lookup, "GUESSDUEL_DELAY_MS") {
            self.computer_delay_ms = v;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.min_number {
            self.min_number = v;
        }
        if let Some(v) = overrides.max_number {
            self.max_number = v;
        }
        if let Some(v) = overrides.max_attempts {
            self.max_attempts = v;
        }
        if let Some(v) = overrides.computer_delay_ms {
            self.computer_delay_ms = v;
        }
    }
}

/// Resolve the full configuration and check it before any game starts.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> anyhow::Result<GameConfig> {
    let mut config = match path {
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => read_file(Path::new(DEFAULT_CONFIG_FILE))?,
        None => GameConfig::default(),
    };

    config.apply_env(|key| std::env::var(key).ok());
    config.apply_overrides(overrides);
    config.validate()?;

    debug!(?config, "resolved game config");
    Ok(config)
}

fn read_file(path: &Path) -> anyhow::Result<GameConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    GameConfig::from_json(&raw).with_context(|| format!("in config file '{}'", path.display()))
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
