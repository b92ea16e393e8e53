//! A session shared between tasks.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{AiError, SessionConfigPatch};

use super::manager::Session;
use super::types::SessionState;

/// Cloneable handle serializing access to one [`Session`].
///
/// Calls queue behind each other; while one is in flight the handle
/// reports [`SessionState::Pending`].
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.inner.try_lock() {
            Ok(session) => session.state(),
            Err(_) => SessionState::Pending,
        }
    }

    /// Exclusive access for several operations in a row.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().await
    }

    pub async fn send(&self, message: &str) -> Result<String, AiError> {
        self.inner.lock().await.send(message).await
    }

    pub async fn send_streaming(
        &self,
        message: &str,
        on_chunk: impl FnMut(&str) + Send,
    ) -> Result<String, AiError> {
        self.inner
            .lock()
            .await
            .send_streaming(message, on_chunk)
            .await
    }

    pub async fn clear_history(&self) {
        self.inner.lock().await.clear_history();
    }

    pub async fn history_len(&self) -> usize {
        self.inner.lock().await.history_len()
    }

    pub async fn update_config(&self, patch: SessionConfigPatch) {
        self.inner.lock().await.update_config(patch);
    }

    pub async fn check_status(&self) -> bool {
        self.inner.lock().await.check_status().await
    }
}
