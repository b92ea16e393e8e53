//! Argus configuration system.
//!
//! TOML-based configuration with environment overrides and validation.
//! Every section uses serde defaults so a partial (or empty) file works.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let config = argus_config::load_config(None).expect("failed to load config");
//! println!("model: {:?}", config.ai.model);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, load_dotenv};
pub use schema::{AiSection, ArgusConfig, LogLevel, LoggingConfig, StorageConfig};

use std::path::Path;

use argus_common::ConfigError;

/// Load the effective configuration.
///
/// Reads `path` when given, otherwise the platform default (creating a
/// commented template there on first run), then layers environment
/// variables on top. Validation problems are logged, not fatal.
pub fn load_config(path: Option<&Path>) -> Result<ArgusConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config);

    if let Err(e) = validation::validate(&config) {
        tracing::warn!("{e}");
    }
    Ok(config)
}
