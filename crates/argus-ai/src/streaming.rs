//! Server-Sent Events (SSE) streaming parser.
//!
//! Chat-completions streams are SSE: `data:` lines carrying JSON chunks,
//! blank lines between events, and a final `data: [DONE]`.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::ClientError;

/// Data payload that terminates a chat-completions stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

impl SseEvent {
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_SENTINEL
    }
}

/// Incremental line-oriented SSE parser.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: String,
}

impl SseParser {
    /// Feed one line (without its terminator). Returns an event when the
    /// line completes one.
    pub fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            // Empty line = end of event
            let event = self.take();
            self.event = None;
            return event;
        }

        if let Some(event_type) = field_value(line, "event") {
            self.event = Some(event_type.to_string());
        } else if let Some(data) = field_value(line, "data") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
        None
    }

    /// Flush an event left open when the stream ended without a blank line.
    pub fn finish(mut self) -> Option<SseEvent> {
        self.take()
    }

    fn take(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data),
        })
    }
}

fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), ClientError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();
    let mut parser = SseParser::default();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?
    {
        if let Some(event) = parser.push_line(&line) {
            on_event(event);
        }
    }

    if let Some(event) = parser.finish() {
        on_event(event);
    }

    Ok(())
}
