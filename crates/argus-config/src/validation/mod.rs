//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` so one warning
//! lists them all.


use crate::schema::ArgusConfig;
use argus_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ArgusConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_ai(&mut errors, config);
    validate_storage(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_ai(errors: &mut Vec<String>, config: &ArgusConfig) {
    if let Some(url) = &config.ai.base_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            errors.push(format!("ai.base_url = {url:?} must start with http:// or https://"));
        }
    }
    if let Some(key) = &config.ai.api_key {
        if key.chars().any(char::is_whitespace) {
            errors.push("ai.api_key must not contain whitespace".into());
        }
    }
    if config.ai.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        errors.push("ai.model must not be blank".into());
    }
}

fn validate_storage(errors: &mut Vec<String>, config: &ArgusConfig) {
    if config.storage.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
        errors.push("storage.path must not be blank".into());
    }
}
