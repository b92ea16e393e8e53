//! Client-side routing for Argus.
//!
//! A static route table, a login-gate navigation guard, and the persisted
//! key-value store the guard reads its login flag from.

pub mod guard;
pub mod login_state;
pub mod router;
pub mod routes;
pub mod storage;

pub use guard::{NavigationDecision, NavigationGuard, DEFAULT_PATH, LOGIN_PATH};
pub use login_state::{LoginState, StaticLoginState, StoredLoginState, IS_LOGGED_IN_KEY};
pub use router::{Navigation, NavigationError, Router, MAX_REDIRECTS};
pub use routes::{resolve, RouteRecord, ROUTES};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

impl From<NavigationError> for argus_common::ArgusError {
    fn from(e: NavigationError) -> Self {
        argus_common::ArgusError::Navigation(e.to_string())
    }
}

impl From<StorageError> for argus_common::ArgusError {
    fn from(e: StorageError) -> Self {
        argus_common::ArgusError::Storage(e.to_string())
    }
}
