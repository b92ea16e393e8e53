//! Session types and the client construction seam.

use std::sync::Arc;

use crate::{AiClient, ClientError, SessionConfig};

/// Builds the API client a session talks to.
///
/// Called on construction and again after every configuration update.
pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &SessionConfig) -> Result<Arc<dyn AiClient>, ClientError>;
}

impl<F> ClientFactory for F
where
    F: Fn(&SessionConfig) -> Result<Arc<dyn AiClient>, ClientError> + Send + Sync,
{
    fn build(&self, config: &SessionConfig) -> Result<Arc<dyn AiClient>, ClientError> {
        self(config)
    }
}

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No usable client: construction failed.
    Uninitialized,
    /// Client present, transcript seeded.
    Ready,
    /// Another task is running a call on the session.
    Pending,
}
