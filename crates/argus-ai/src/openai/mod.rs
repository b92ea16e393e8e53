//! OpenAI-compatible chat-completions client.
//!
//! Implements the `AiClient` trait against `POST {base_url}/chat/completions`,
//! the wire format shared by OpenAI and most hosted model gateways.

mod api;
mod client;

#[cfg(test)]
mod tests;

pub use client::{OpenAiClient, OpenAiFactory, DEFAULT_BASE_URL};
