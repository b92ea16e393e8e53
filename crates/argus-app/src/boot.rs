//! Startup wiring: logging, configuration, and the services commands run on.

use std::sync::Arc;

use argus_ai::{SessionConfig, SessionConfigPatch};
use argus_config::{AiSection, ArgusConfig, LogLevel, StorageConfig};
use argus_router::{FileStore, NavigationGuard, Router, StorageError, StoredLoginState};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

pub const DEFAULT_LOG_DIRECTIVE: &str = "argus=info";

/// Lets the config file adjust the filter after logging is already up.
pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` plus `directive`; an unparseable directive falls back to the default.
pub fn env_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>())
    {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

pub fn init_logging(directive: &str) -> LogHandle {
    let (filter, handle) = reload::Layer::new(env_filter(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    handle
}

pub fn apply_log_level(handle: &LogHandle, level: LogLevel) {
    if let Err(e) = handle.reload(env_filter(level.directive())) {
        tracing::warn!("Failed to apply configured log level: {e}");
    }
}

/// Load the config, falling back to defaults (plus env) when the default
/// location is unusable. An explicit path must load.
pub fn load_config(path: Option<&std::path::Path>) -> argus_common::Result<ArgusConfig> {
    match argus_config::load_config(path) {
        Ok(config) => Ok(config),
        Err(e) if path.is_none() => {
            tracing::warn!("Config load failed, using defaults: {e}");
            let mut config = ArgusConfig::default();
            argus_config::apply_env_overrides(&mut config);
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Session settings: built-in defaults overlaid with whatever `[ai]` sets.
pub fn session_config(ai: &AiSection) -> SessionConfig {
    SessionConfig::default().merged(SessionConfigPatch {
        api_key: ai.api_key.clone(),
        base_url: ai.base_url.clone(),
        model: ai.model.clone(),
        system_prompt: ai.system_prompt.clone(),
    })
}

pub fn open_store(storage: &StorageConfig) -> Result<FileStore, StorageError> {
    let path = match storage.path.as_deref() {
        Some(path) => path.into(),
        None => FileStore::default_path()?,
    };
    Ok(FileStore::new(path))
}

pub fn build_router(store: FileStore) -> Router {
    Router::new(NavigationGuard::new(Arc::new(StoredLoginState::new(store))))
}
