//! System configuration types: persisted storage and logging.

use serde::{Deserialize, Serialize};

/// Where the local key-value store (login flag) lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the store file. Defaults to the platform data directory.
    pub path: Option<String>,
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoping the level to Argus crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "argus=debug",
            LogLevel::Info => "argus=info",
            LogLevel::Warning => "argus=warn",
            LogLevel::Error => "argus=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
