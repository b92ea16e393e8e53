//! Async chat methods for Session (send + streaming + status probe).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{classify, AiClient, AiError, ClientError, CompletionRequest, Message};

use super::manager::Session;

impl Session {
    /// Send one user message and return the assistant's reply.
    ///
    /// The user and assistant messages are committed together on success.
    /// On failure the transcript is exactly what it was before the call.
    pub async fn send(&mut self, message: &str) -> Result<String, AiError> {
        let (client, user) = self.begin_turn(message)?;
        let request = CompletionRequest::chat(self.transcript.context_with(&user));

        debug!(
            session = self.id.short(),
            context = request.messages.len(),
            "sending chat turn"
        );

        let response = client
            .send_message(&request)
            .await
            .map_err(|e| self.turn_failed(e))?;

        let reply = response
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| self.turn_failed_with(AiError::EmptyResponse))?;

        self.finish_turn(user, &reply, response.usage.total_tokens());
        Ok(reply)
    }

    /// Like [`send`](Self::send), but streams the reply.
    ///
    /// `on_chunk` receives each content fragment synchronously, in arrival
    /// order. Fragments already delivered stay delivered if the stream later
    /// fails; the transcript is still rolled back.
    pub async fn send_streaming(
        &mut self,
        message: &str,
        mut on_chunk: impl FnMut(&str) + Send,
    ) -> Result<String, AiError> {
        let (client, user) = self.begin_turn(message)?;
        let request = CompletionRequest::chat(self.transcript.context_with(&user));

        debug!(
            session = self.id.short(),
            context = request.messages.len(),
            "sending streaming chat turn"
        );

        let response = client
            .send_message_streaming(&request, &mut on_chunk)
            .await
            .map_err(|e| self.turn_failed(e))?;

        let reply = response
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| self.turn_failed_with(AiError::EmptyResponse))?;

        self.finish_turn(user, &reply, response.usage.total_tokens());
        Ok(reply)
    }

    /// Whether the endpoint accepts a minimal request. Never fails.
    pub async fn check_status(&self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };

        match client.send_message(&CompletionRequest::probe()).await {
            Ok(_) => true,
            Err(e) => {
                warn!(session = self.id.short(), "AI status check failed: {e}");
                false
            }
        }
    }

    fn begin_turn(&self, message: &str) -> Result<(Arc<dyn AiClient>, Message), AiError> {
        let client = self.client.clone().ok_or(AiError::NotInitialized)?;
        let content = message.trim();
        if content.is_empty() {
            return Err(AiError::EmptyInput);
        }
        Ok((client, Message::user(content)))
    }

    fn finish_turn(&mut self, user: Message, reply: &str, tokens: u64) {
        self.transcript.commit(user, Message::assistant(reply));
        debug!(
            session = self.id.short(),
            reply_chars = reply.chars().count(),
            tokens,
            history = self.history_len(),
            "chat turn committed"
        );
    }

    fn turn_failed(&self, error: ClientError) -> AiError {
        warn!(session = self.id.short(), "AI service call failed: {error}");
        classify(error)
    }

    fn turn_failed_with(&self, error: AiError) -> AiError {
        warn!(session = self.id.short(), "{error}");
        error
    }
}
