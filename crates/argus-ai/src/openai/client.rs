//! OpenAI client struct, request building, and response parsing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::session::ClientFactory;
use crate::{AiClient, AiResponse, ClientError, CompletionRequest, SessionConfig, TokenUsage};

/// Used when the configured base address is empty.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const MAX_ERROR_BODY_CHARS: usize = 200;

/// OpenAI-compatible API client.
pub struct OpenAiClient {
    pub(crate) model: String,
    pub(crate) endpoint: reqwest::Url,
    pub(crate) headers: HeaderMap,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl OpenAiClient {
    /// Build a client. Fails on a blank key, an unusable base address, or
    /// a key that cannot be sent as a header.
    pub fn new(config: &SessionConfig) -> Result<Self, ClientError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(ClientError::Config("API key is not set".into()));
        }

        let endpoint = completions_url(&config.base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ClientError::Config("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if config.model.trim().is_empty() {
            warn!("no model configured; requests will likely be rejected");
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ClientError::Config(format!("http client error: {e}")))?;

        debug!(endpoint = %endpoint, model = %config.model, "OpenAI client ready");

        Ok(Self {
            model: config.model.clone(),
            endpoint,
            headers,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Build the JSON request body for the chat-completions API.
    pub(crate) fn build_request_body(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "stream": stream,
        });

        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        body
    }
}

/// `{base}/chat/completions`, tolerating a trailing slash on `base`.
pub(crate) fn completions_url(base_url: &str) -> Result<reqwest::Url, ClientError> {
    let base = base_url.trim();
    let base = if base.is_empty() { DEFAULT_BASE_URL } else { base };
    let joined = format!("{}/chat/completions", base.trim_end_matches('/'));

    let url = reqwest::Url::parse(&joined)
        .map_err(|e| ClientError::Config(format!("invalid base URL {base:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::Config(format!(
            "unsupported URL scheme {other:?} in base URL"
        ))),
    }
}

/// Parse a non-streaming response.
pub(crate) fn parse_response(json: &serde_json::Value) -> AiResponse {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from);

    AiResponse {
        content,
        usage: parse_usage(&json["usage"]),
    }
}

pub(crate) fn parse_usage(usage: &serde_json::Value) -> TokenUsage {
    TokenUsage {
        input_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
    }
}

/// Content fragment of one streaming chunk, if any.
pub(crate) fn parse_delta(json: &serde_json::Value) -> Option<&str> {
    json["choices"][0]["delta"]["content"]
        .as_str()
        .filter(|s| !s.is_empty())
}

/// Turn an `{"error": {...}}` payload into a `ClientError`.
///
/// `status` is absent for errors delivered inside a stream.
pub(crate) fn parse_error(status: Option<u16>, body: &str) -> ClientError {
    let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let error = &json["error"];

    let code = match &error["code"] {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => error["type"].as_str().map(String::from),
    };

    let message = error["message"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() {
                "no response body".to_string()
            } else {
                text.chars().take(MAX_ERROR_BODY_CHARS).collect()
            }
        });

    ClientError::Api {
        status,
        code,
        message,
    }
}

/// Builds [`OpenAiClient`]s; the default factory for a `Session`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiFactory;

impl ClientFactory for OpenAiFactory {
    fn build(&self, config: &SessionConfig) -> Result<Arc<dyn AiClient>, ClientError> {
        Ok(Arc::new(OpenAiClient::new(config)?))
    }
}
