use std::sync::Arc;

use tracing::debug;

use crate::login_state::LoginState;
use crate::routes::normalize;

// =============================================================================
// LOGIN GATE
// =============================================================================

/// The login page.
pub const LOGIN_PATH: &str = "/login";

/// Where a logged-in user lands instead of the login page.
pub const DEFAULT_PATH: &str = "/index";

/// Outcome of the pre-navigation hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(&'static str),
}

/// Global pre-navigation hook.
///
/// Logged-out users can only reach the login page; logged-in users are
/// bounced off it. There are no per-route rules.
#[derive(Clone)]
pub struct NavigationGuard {
    state: Arc<dyn LoginState>,
}

impl NavigationGuard {
    pub fn new(state: Arc<dyn LoginState>) -> Self {
        Self { state }
    }

    /// Decide whether navigation to `path` may proceed.
    ///
    /// The login flag is re-read on every call.
    pub fn check(&self, path: &str) -> NavigationDecision {
        let logged_in = self.state.is_logged_in();
        let decision = decide(normalize(path), logged_in);
        debug!(path, logged_in, ?decision, "navigation guard");
        decision
    }
}

fn decide(path: &str, logged_in: bool) -> NavigationDecision {
    match (path == LOGIN_PATH, logged_in) {
        (true, true) => NavigationDecision::Redirect(DEFAULT_PATH),
        (true, false) | (false, true) => NavigationDecision::Allow,
        (false, false) => NavigationDecision::Redirect(LOGIN_PATH),
    }
}

// =============================================================================
// TESTS
// =============================================================================
