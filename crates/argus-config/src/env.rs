//! Environment-variable layer over the TOML file.

use std::path::Path;

use tracing::debug;

use crate::schema::ArgusConfig;

pub const API_KEY_VAR: &str = "ARK_API_KEY";
pub const BASE_URL_VAR: &str = "AI_BASE_URL";
pub const MODEL_VAR: &str = "AI_MODEL";
pub const SYSTEM_PROMPT_VAR: &str = "AI_SYSTEM_PROMPT";

/// Load `KEY=VALUE` lines from a `.env` file into the process environment.
///
/// Variables already set are left untouched. Returns whether a file was read.
pub fn load_dotenv(path: &Path) -> bool {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return false;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
    debug!("loaded environment from {}", path.display());
    true
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .collect()
}

/// Override `[ai]` fields from the process environment.
pub fn apply_env_overrides(config: &mut ArgusConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Override `[ai]` fields from an arbitrary lookup; empty values are ignored.
pub fn apply_overrides_from(config: &mut ArgusConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(API_KEY_VAR) {
        config.ai.api_key = Some(key);
    }
    if let Some(url) = get(BASE_URL_VAR) {
        config.ai.base_url = Some(url);
    }
    if let Some(model) = get(MODEL_VAR) {
        config.ai.model = Some(model);
    }
    if let Some(prompt) = get(SYSTEM_PROMPT_VAR) {
        config.ai.system_prompt = Some(prompt);
    }
}
