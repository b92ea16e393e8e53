//! AI engine for Argus.
//!
//! A conversational wrapper around an OpenAI-compatible chat-completions
//! endpoint:
//! - Non-streaming and streaming (SSE) completions
//! - A bounded, role-tagged transcript with turn-level rollback
//! - Classification of upstream failures into user-facing categories

pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;
pub mod session;
pub mod streaming;

use async_trait::async_trait;

pub use config::{SessionConfig, SessionConfigPatch};
pub use error::{classify, AiError, ClientError};
pub use openai::{OpenAiClient, OpenAiFactory};
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use session::{ClientFactory, Session, SessionState, SharedSession};

/// Output budget for every chat turn.
pub const CHAT_MAX_TOKENS: u32 = 1000;

/// Sampling temperature for every chat turn.
pub const CHAT_TEMPERATURE: f64 = 0.7;

/// A chat-completions backend.
///
/// The model identifier belongs to the client; requests carry only the
/// per-call parameters.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, request: &CompletionRequest) -> Result<AiResponse, ClientError>;

    /// Stream a completion, calling `on_chunk` for every non-empty content
    /// fragment in arrival order. The returned response carries the
    /// concatenation of all fragments.
    async fn send_message_streaming(
        &self,
        request: &CompletionRequest,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<AiResponse, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One outbound completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// A chat turn with the fixed generation parameters.
    pub fn chat(messages: Vec<Message>) -> Self {
        Self {
            messages,
            max_tokens: CHAT_MAX_TOKENS,
            temperature: Some(CHAT_TEMPERATURE),
        }
    }

    /// The cheapest request that proves the endpoint accepts our credentials.
    pub fn probe() -> Self {
        Self {
            messages: vec![Message::user("test")],
            max_tokens: 1,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    /// First choice's content; `None` when the endpoint returned none.
    pub content: Option<String>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

impl From<AiError> for argus_common::ArgusError {
    fn from(e: AiError) -> Self {
        argus_common::ArgusError::Ai(e.to_string())
    }
}
