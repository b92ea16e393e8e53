//! Where the guard learns whether the user is logged in.

use tracing::warn;

use crate::storage::KeyValueStore;

/// Key of the persisted login flag.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";

/// Read-only view of the user's login status.
pub trait LoginState: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

/// A fixed answer, for tests and headless use.
#[derive(Debug, Clone, Copy)]
pub struct StaticLoginState(pub bool);

impl LoginState for StaticLoginState {
    fn is_logged_in(&self) -> bool {
        self.0
    }
}

/// Login flag backed by a key-value store.
///
/// Logged in only when the stored value is exactly `"true"`. A store that
/// cannot be read counts as logged out.
pub struct StoredLoginState<S> {
    store: S,
}

impl<S: KeyValueStore> StoredLoginState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> LoginState for StoredLoginState<S> {
    fn is_logged_in(&self) -> bool {
        match self.store.get_item(IS_LOGGED_IN_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("failed to read login flag: {e}");
                false
            }
        }
    }
}
