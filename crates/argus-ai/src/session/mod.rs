//! Conversation session management.
//!
//! A `Session` owns one transcript, builds its API client from a
//! `SessionConfig`, and runs chat turns against it.
//!
//! Every session method that touches the transcript takes `&mut self`, so
//! calls on one session are serialized by the borrow checker. Share a
//! session between tasks through `SharedSession`.

mod chat;
mod manager;
mod shared;
mod transcript;
mod types;


pub use manager::Session;
pub use shared::SharedSession;
pub use transcript::MAX_TRANSCRIPT_LEN;
pub use types::{ClientFactory, SessionState};
