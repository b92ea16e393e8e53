//! Session configuration.

use std::fmt;

use crate::prompt::DEFAULT_SYSTEM_PROMPT;

/// Endpoint and persona settings for one [`Session`](crate::Session).
#[derive(Clone, PartialEq)]
pub struct SessionConfig {
    pub api_key: String,
    /// Base address of the chat-completions API, e.g. `https://api.openai.com/v1`.
    /// Empty means the OpenAI default.
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("SessionConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt_len", &self.system_prompt.len())
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Overwrite every field the patch sets.
    pub fn apply(&mut self, patch: SessionConfigPatch) {
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = patch.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(prompt) = patch.system_prompt {
            self.system_prompt = prompt;
        }
    }

    pub fn merged(mut self, patch: SessionConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// A partial [`SessionConfig`]; `None` leaves the field unchanged.
#[derive(Clone, Default, PartialEq)]
pub struct SessionConfigPatch {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

impl fmt::Debug for SessionConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfigPatch")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt.is_some())
            .finish()
    }
}

impl SessionConfigPatch {
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtin_prompt() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn debug_never_prints_the_key() {
        let cfg = SessionConfig::new("sk-live-123456", "https://api.example.com/v1", "m");
        let out = format!("{cfg:?}");
        assert!(!out.contains("sk-live-123456"));
        assert!(out.contains("[REDACTED]"));

        let out = format!("{:?}", SessionConfig::default());
        assert!(out.contains("<unset>"));
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut cfg = SessionConfig::new("key", "https://a.example.com", "model-a");
        cfg.apply(SessionConfigPatch {
            base_url: Some("https://b.example.com".into()),
            ..Default::default()
        });
        assert_eq!(cfg.api_key, "key");
        assert_eq!(cfg.base_url, "https://b.example.com");
        assert_eq!(cfg.model, "model-a");
    }

    #[test]
    fn merged_layers_in_order() {
        let cfg = SessionConfig::default()
            .merged(SessionConfigPatch::model("from-file"))
            .merged(SessionConfigPatch::model("from-env"));
        assert_eq!(cfg.model, "from-env");
    }

    #[test]
    fn patch_debug_redacts_key() {
        let patch = SessionConfigPatch {
            api_key: Some("sk-abc".into()),
            ..Default::default()
        };
        assert!(!format!("{patch:?}").contains("sk-abc"));
    }
}
