//! Session struct, lifecycle, and transcript management.

use std::sync::Arc;

use argus_common::SessionId;
use tracing::{error, info};

use crate::openai::OpenAiFactory;
use crate::{AiClient, Message, SessionConfig, SessionConfigPatch};

use super::transcript::Transcript;
use super::types::{ClientFactory, SessionState};

/// A conversation with one bounded transcript.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) config: SessionConfig,
    pub(super) factory: Arc<dyn ClientFactory>,
    /// `None` when client construction failed.
    pub(super) client: Option<Arc<dyn AiClient>>,
    pub(super) transcript: Transcript,
}

impl Session {
    /// Create a session talking to the OpenAI-compatible HTTP endpoint.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_factory(config, Arc::new(OpenAiFactory))
    }

    pub fn with_factory(config: SessionConfig, factory: Arc<dyn ClientFactory>) -> Self {
        let transcript = Transcript::seeded(&config.system_prompt);
        let mut session = Self {
            id: SessionId::new(),
            config,
            factory,
            client: None,
            transcript,
        };
        session.initialize();
        session
    }

    /// (Re)build the client and reset the transcript.
    ///
    /// A construction failure is logged and leaves the session
    /// `Uninitialized`; it is never returned to the caller.
    fn initialize(&mut self) {
        self.client = match self.factory.build(&self.config) {
            Ok(client) => {
                info!(
                    session = self.id.short(),
                    api_key = %key_hint(&self.config.api_key),
                    base_url = %self.config.base_url,
                    model = %self.config.model,
                    "AI session initialized"
                );
                Some(client)
            }
            Err(e) => {
                error!(session = self.id.short(), "AI client construction failed: {e}");
                None
            }
        };
        self.clear_history();
    }

    /// Reset the transcript to the seeded system message.
    pub fn clear_history(&mut self) {
        self.transcript = Transcript::seeded(&self.config.system_prompt);
        info!(session = self.id.short(), "conversation history cleared");
    }

    /// Number of non-system messages in the transcript.
    pub fn history_len(&self) -> usize {
        self.transcript.turn_messages()
    }

    /// Merge `patch` into the configuration and re-initialize.
    ///
    /// This discards the conversation history.
    pub fn update_config(&mut self, patch: SessionConfigPatch) {
        self.config.apply(patch);
        self.initialize();
    }

    pub fn state(&self) -> SessionState {
        if self.client.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }
}

/// First eight characters of a long key, for logs. Short keys are hidden.
fn key_hint(api_key: &str) -> String {
    if api_key.is_empty() {
        return "<unset>".to_string();
    }
    if api_key.chars().count() <= 12 {
        return "[REDACTED]".to_string();
    }
    let prefix: String = api_key.chars().take(8).collect();
    format!("{prefix}...")
}
