//! Catalog and logging configuration.
//!
//! # Responsibility
//! - Hold the knobs callers pass when constructing a store or logger.
//! - Parse environment overrides used by the CLI.
//!
//! # Invariants
//! - Defaults never reuse ids and keep logging disabled.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_ID_POLICY: &str = "LEARNNOTE_ID_POLICY";
pub const ENV_LOG_LEVEL: &str = "LEARNNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LEARNNOTE_LOG_DIR";

/// How the store assigns ids to new entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Counter starting at 1 that never goes backwards.
    #[default]
    Monotonic,
    /// Legacy `current count + 1`. Can collide with a live id after a
    /// removal.
    CountPlusOne,
}

impl IdPolicy {
    /// Parses `monotonic` or `count_plus_one` (case-insensitive, `-` allowed).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "count_plus_one" => Ok(Self::CountPlusOne),
            other => Err(ConfigError::UnknownIdPolicy(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::CountPlusOne => "count_plus_one",
        }
    }
}

/// Store construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub id_policy: IdPolicy,
}

/// Logger options. Logging stays off while `log_dir` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownIdPolicy(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdPolicy(value) => write!(
                f,
                "unknown id policy `{value}`; expected monotonic|count_plus_one"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Reads `LEARNNOTE_ID_POLICY`; unset or blank falls back to the default.
pub fn catalog_config_from_env() -> Result<CatalogConfig, ConfigError> {
    let id_policy = match non_blank_var(ENV_ID_POLICY) {
        Some(raw) => IdPolicy::parse(&raw)?,
        None => IdPolicy::default(),
    };
    Ok(CatalogConfig { id_policy })
}

/// Reads `LEARNNOTE_LOG_LEVEL` and `LEARNNOTE_LOG_DIR`.
pub fn logging_config_from_env() -> LoggingConfig {
    let mut config = LoggingConfig::default();
    if let Some(level) = non_blank_var(ENV_LOG_LEVEL) {
        config.level = level;
    }
    config.log_dir = non_blank_var(ENV_LOG_DIR).map(PathBuf::from);
    config
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
