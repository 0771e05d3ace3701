//! Environment-driven server configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `EMPLOYEE_HTTP_BIND` | `127.0.0.1:8080` |
//! | `EMPLOYEE_DB_PATH` | `<temp_dir>/employees.sqlite3` |
//! | `EMPLOYEE_LOG_LEVEL` | `debug` in debug builds, `info` otherwise |
//! | `EMPLOYEE_LOG_DIR` | `<temp_dir>/employee-logs` |
//!
//! Blank values fall back to defaults.

use employee_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ENV: &str = "EMPLOYEE_HTTP_BIND";
pub const DB_PATH_ENV: &str = "EMPLOYEE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "EMPLOYEE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "EMPLOYEE_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_FILE_NAME: &str = "employees.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "employee-logs";

#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddress { value: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddress { value, reason } => {
                write!(f, "invalid {BIND_ENV} value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    /// Passed to `employee_core::init_logging`, which validates it.
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = read(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBindAddress {
                value: bind_text.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            bind,
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        })
    }
}
