//! Core configuration from environment variables.
//!
//! # Responsibility
//! - Resolve database location, pool size and logging settings once at
//!   process start.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::db::MAX_POOL_SIZE;
use crate::logging::default_log_level;
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "JOTTER_DB_PATH";
pub const ENV_DB_POOL_SIZE: &str = "JOTTER_DB_POOL_SIZE";
pub const ENV_LOG_LEVEL: &str = "JOTTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "JOTTER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "jotter.sqlite3";
const DEFAULT_POOL_SIZE: usize = 4;

/// File logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error` (case-insensitive).
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: String,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
        }
    }
}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub pool_size: usize,
    pub log_level: String,
    /// File logging is only started when a directory is configured.
    pub log_dir: Option<String>,
}

impl CoreConfig {
    /// Loads configuration from process environment variables.
    ///
    /// Optional:
    /// - `JOTTER_DB_PATH`: SQLite file (default: `<temp_dir>/jotter.sqlite3`)
    /// - `JOTTER_DB_POOL_SIZE`: pooled connections, 1..=32 (default: 4)
    /// - `JOTTER_LOG_LEVEL`: log level (default: build-mode dependent)
    /// - `JOTTER_LOG_DIR`: absolute log directory (default: unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let pool_size = match read(ENV_DB_POOL_SIZE) {
            Some(raw) => parse_pool_size(&raw)?,
            None => DEFAULT_POOL_SIZE,
        };

        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read(ENV_LOG_DIR);

        Ok(Self {
            db_path,
            pool_size,
            log_level,
            log_dir,
        })
    }

    /// Logging settings when a log directory is configured.
    pub fn logging(&self) -> Option<LoggingConfig> {
        self.log_dir
            .as_ref()
            .map(|dir| LoggingConfig::new(self.log_level.clone(), dir.clone()))
    }
}

fn parse_pool_size(raw: &str) -> Result<usize, ConfigError> {
    let size = raw.parse::<usize>().map_err(|err| ConfigError::InvalidValue {
        name: ENV_DB_POOL_SIZE,
        reason: err.to_string(),
    })?;
    if size == 0 || size > MAX_POOL_SIZE {
        return Err(ConfigError::InvalidValue {
            name: ENV_DB_POOL_SIZE,
            reason: format!("expected 1..={MAX_POOL_SIZE}, got {size}"),
        });
    }
    Ok(size)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { name: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, reason } => {
                write!(f, "invalid value for environment variable {name}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}
