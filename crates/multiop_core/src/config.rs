//! Runtime configuration for board hosts.
//!
//! # Responsibility
//! - Resolve database location, slot key, seeding and logging settings from
//!   environment variables with stable defaults.
//!
//! # Invariants
//! - Resolution never touches the file system.
//! - Unset or blank variables fall back to defaults; malformed values are
//!   rejected instead of silently ignored.

use crate::logging::default_log_level;
use crate::repo::project_repo::DEFAULT_SLOT_KEY;
use crate::service::project_store::StoreOptions;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "MULTIOP_DB_PATH";
pub const ENV_SLOT_KEY: &str = "MULTIOP_SLOT_KEY";
pub const ENV_SEED_SAMPLES: &str = "MULTIOP_SEED_SAMPLES";
pub const ENV_LOG_LEVEL: &str = "MULTIOP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MULTIOP_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "multiop_board.sqlite3";

/// Configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved board host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
    pub seed_samples: bool,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            seed_samples: true,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl BoardConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(slot_key) = read(ENV_SLOT_KEY) {
            config.slot_key = slot_key;
        }
        if let Some(raw) = read(ENV_SEED_SAMPLES) {
            config.seed_samples = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_SEED_SAMPLES,
                value: raw,
            })?;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);

        Ok(config)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            seed_samples: self.seed_samples,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
