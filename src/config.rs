use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::app_dirs::AppDirs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub initial_time_ms: u64,
    pub max_lives: u32,
    pub fps: u32,
    pub bomb_duplication: usize,
    pub explosion_duplication: usize,
    pub prompts_path: Option<PathBuf>,
    pub words_path: Option<PathBuf>,
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_time_ms: 10_000,
            max_lives: 5,
            fps: 60,
            bomb_duplication: 10,
            explosion_duplication: 4,
            prompts_path: None,
            words_path: None,
            sound: true,
        }
    }
}

/// Longest fuse accepted: one hour.
pub const MAX_INITIAL_TIME_MS: u64 = 3_600_000;
/// Largest per-frame duplication accepted for either animation.
pub const MAX_DUPLICATION: usize = 100;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lives == 0 {
            return Err(ConfigError::Invalid("max_lives must be at least 1".into()));
        }
        if !(1..=MAX_INITIAL_TIME_MS).contains(&self.initial_time_ms) {
            return Err(ConfigError::Invalid(format!(
                "initial_time_ms must be between 1 and {MAX_INITIAL_TIME_MS}, got {}",
                self.initial_time_ms
            )));
        }
        for (name, value) in [
            ("bomb_duplication", self.bomb_duplication),
            ("explosion_duplication", self.explosion_duplication),
        ] {
            if value > MAX_DUPLICATION {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {MAX_DUPLICATION}, got {value}"
                )));
            }
        }
        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::Invalid(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;

    /// Loads the stored config, falling back to defaults when it is missing
    /// or unreadable.
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Config::default()
            }
            Err(e) => {
                warn!(error = %e, "using default config");
                Config::default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice::<Config>(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
