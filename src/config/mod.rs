use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{Result, TrackerError},
    insights::InsightRules,
    utils::{
        fs::write_atomic,
        paths::{app_data_dir, config_file_in},
    },
};

const DEFAULT_CURRENCY: &str = "PHP";
const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default)]
    pub insights: InsightRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            insights: InsightRules::default(),
        }
    }
}

impl Config {
    fn default_currency() -> String {
        DEFAULT_CURRENCY.into()
    }

    fn default_recent_limit() -> usize {
        DEFAULT_RECENT_LIMIT
    }
}

/// Reads and writes `config.json` under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: config_file_in(base.as_ref()),
        }
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|err| self.error("read", err))?;
        serde_json::from_str(&data).map_err(|err| self.error("parse", err))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config).map_err(|err| self.error("encode", err))?;
        write_atomic(&self.path, &json)
            .map_err(|err| TrackerError::Config(format!("{}: {err}", self.path.display())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, action: &str, err: impl std::fmt::Display) -> TrackerError {
        TrackerError::Config(format!(
            "failed to {action} `{}`: {err}",
            self.path.display()
        ))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
