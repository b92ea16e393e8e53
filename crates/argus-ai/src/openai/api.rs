//! AiClient trait implementation for OpenAiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiResponse, ClientError, CompletionRequest, TokenUsage};

use super::client::{parse_delta, parse_error, parse_response, parse_usage, OpenAiClient};

impl OpenAiClient {
    async fn post(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<reqwest::Response, ClientError> {
        let body = self.build_request_body(request, stream);

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(Some(status.as_u16()), &text));
        }
        Ok(response)
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(&self, request: &CompletionRequest) -> Result<AiResponse, ClientError> {
        debug!(model = %self.model, messages = request.messages.len(), "chat completion request");

        let response = self.post(request, false).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        if json.get("error").is_some_and(|e| !e.is_null()) {
            return Err(parse_error(None, &json.to_string()));
        }

        Ok(parse_response(&json))
    }

    async fn send_message_streaming(
        &self,
        request: &CompletionRequest,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<AiResponse, ClientError> {
        debug!(model = %self.model, messages = request.messages.len(), "chat completion streaming request");

        let response = self.post(request, true).await?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();
        let mut done = false;
        let mut failure: Option<ClientError> = None;

        parse_sse_stream(response, |event: SseEvent| {
            if done || failure.is_some() {
                return;
            }
            if event.is_done() {
                done = true;
                return;
            }

            let data = match serde_json::from_str::<serde_json::Value>(&event.data) {
                Ok(data) => data,
                Err(e) => {
                    failure = Some(ClientError::Parse(format!("bad stream chunk: {e}")));
                    return;
                }
            };

            if data.get("error").is_some_and(|e| !e.is_null()) {
                failure = Some(parse_error(None, &event.data));
                return;
            }

            if let Some(text) = parse_delta(&data) {
                full_content.push_str(text);
                on_chunk(text);
            }

            // Gateways that honour stream_options report usage on the last chunk
            if data["usage"].is_object() {
                usage = parse_usage(&data["usage"]);
            }
        })
        .await?;

        if let Some(err) = failure {
            return Err(err);
        }
        if !done {
            warn!("stream ended without [DONE]");
        }

        Ok(AiResponse {
            content: (!full_content.is_empty()).then_some(full_content),
            usage,
        })
    }
}
