//! Session-facing error taxonomy and the translation from raw client failures.

/// Errors surfaced by [`Session`](crate::Session) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("AI service is not initialized")]
    NotInitialized,
    #[error("message must not be empty")]
    EmptyInput,
    #[error("AI service returned an empty response")]
    EmptyResponse,
    #[error("API quota exhausted, check the account balance")]
    QuotaExceeded,
    #[error("API key is invalid, check the configuration")]
    InvalidCredential,
    #[error("configured model does not exist, check the model setting")]
    ModelNotFound,
    #[error("network connection failed: {0}")]
    NetworkError(String),
    #[error("AI service call failed: {0}")]
    UpstreamError(String),
}

/// Raw failure reported by an [`AiClient`](crate::AiClient).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The endpoint answered with an error payload.
    #[error("{}", api_detail(*status, code.as_deref(), message))]
    Api {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    /// The client could not be built from its configuration.
    #[error("client configuration error: {0}")]
    Config(String),
}

fn api_detail(status: Option<u16>, code: Option<&str>, message: &str) -> String {
    match (status, code) {
        (Some(s), Some(c)) => format!("HTTP {s} ({c}): {message}"),
        (Some(s), None) => format!("HTTP {s}: {message}"),
        (None, Some(c)) => format!("{c}: {message}"),
        (None, None) => message.to_string(),
    }
}

impl ClientError {
    fn message(&self) -> &str {
        match self {
            ClientError::Api { message, .. } => message,
            ClientError::Network(m) | ClientError::Parse(m) | ClientError::Config(m) => m,
        }
    }
}

/// Map a client failure onto the user-facing categories.
///
/// Error codes take precedence; a message that mentions the network is
/// reported as a network failure even when it arrived as an API error.
pub fn classify(error: ClientError) -> AiError {
    if let ClientError::Api {
        code: Some(code), ..
    } = &error
    {
        match code.as_str() {
            "insufficient_quota" => return AiError::QuotaExceeded,
            "invalid_api_key" => return AiError::InvalidCredential,
            "model_not_found" => return AiError::ModelNotFound,
            _ => {}
        }
    }

    match error {
        ClientError::Network(message) => AiError::NetworkError(message),
        other if other.message().to_lowercase().contains("network") => {
            AiError::NetworkError(other.message().to_string())
        }
        other => AiError::UpstreamError(other.to_string()),
    }
}
