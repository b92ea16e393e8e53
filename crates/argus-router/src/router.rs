//! Navigation: record redirects, then the guard, until the path settles.

use tracing::{debug, info};

use crate::guard::{NavigationDecision, NavigationGuard};
use crate::routes::{normalize, resolve, RouteRecord};

/// Redirect hops allowed in a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect loop navigating to {requested} (hops: {})", hops.join(" -> "))]
    RedirectLoop {
        requested: String,
        hops: Vec<String>,
    },
}

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path the caller asked for.
    pub requested: String,
    /// Final path after all redirects.
    pub path: String,
    /// Matched records for `path`, outermost first. Empty means not found.
    pub matched: Vec<&'static RouteRecord>,
    /// Intermediate paths that were redirected away from.
    pub redirected: Vec<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirected.is_empty()
    }

    pub fn is_not_found(&self) -> bool {
        self.matched.is_empty()
    }

    /// Innermost matched record (the page actually shown).
    pub fn page(&self) -> Option<&'static RouteRecord> {
        self.matched.last().copied()
    }
}

#[derive(Clone)]
pub struct Router {
    guard: NavigationGuard,
}

impl Router {
    pub fn new(guard: NavigationGuard) -> Self {
        Self { guard }
    }

    pub fn navigate(&self, requested: &str) -> Result<Navigation, NavigationError> {
        let mut path = normalize(requested).to_string();
        let mut redirected = Vec::new();

        loop {
            let matched = resolve(&path);

            let next = match matched.last().and_then(|r| r.redirect) {
                Some(target) => target,
                None => match self.guard.check(&path) {
                    NavigationDecision::Allow => {
                        info!(requested, path = %path, "navigated");
                        return Ok(Navigation {
                            requested: requested.to_string(),
                            path,
                            matched,
                            redirected,
                        });
                    }
                    NavigationDecision::Redirect(target) => target,
                },
            };

            debug!(from = %path, to = next, "redirect");
            redirected.push(std::mem::replace(&mut path, next.to_string()));
            if redirected.len() > MAX_REDIRECTS {
                return Err(NavigationError::RedirectLoop {
                    requested: requested.to_string(),
                    hops: redirected,
                });
            }
        }
    }
}
