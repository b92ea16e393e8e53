//! Chat-completions endpoint settings.

use serde::{Deserialize, Serialize};

/// The `[ai]` section.
///
/// Every field is optional: unset fields fall through to the environment
/// and finally to the session defaults.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Replaces the built-in assistant persona.
    pub system_prompt: Option<String>,
}

impl std::fmt::Debug for AiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}
