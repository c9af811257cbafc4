//! Access guard for protected surfaces.
//!
//! The guard is the Rust rendition of the console's protected-route
//! wrapper: protected content only renders after the session check passes,
//! and unauthorized traffic is redirected away instead of receiving an
//! error.

use std::sync::Arc;

use crate::auth::session::Session;

/// Navigation targets the guard and the HTTP client redirect to. Both are
/// opaque to the core; the embedding surface decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login screen.
    Login,
    /// The unauthenticated home screen.
    Home,
}

/// Performs client-side redirects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Destination);
}

/// Per-check guard configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardConfig {
    /// Require the admin role on top of a valid session.
    pub admin_only: bool,
}

/// Guard state for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No evaluation has happened yet for this navigation.
    Unchecked,
    /// The session passed the check; protected content may render.
    Authorized,
    /// The session failed the check; a redirect has been issued.
    Redirecting(Destination),
}

pub struct RouteGuard {
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Evaluate the guard for one navigation.
    ///
    /// Runs the full check every time it is called; nothing is memoized
    /// between navigations, so a route change re-evaluates by simply
    /// calling `evaluate` again. A failed check issues the redirect before
    /// returning.
    pub fn evaluate(&self, config: GuardConfig) -> GuardState {
        if !self.session.is_authenticated() {
            self.navigator.navigate(Destination::Login);
            return GuardState::Redirecting(Destination::Login);
        }

        if config.admin_only && !self.session.is_admin() {
            tracing::warn!("access denied: admins only");
            self.navigator.navigate(Destination::Home);
            return GuardState::Redirecting(Destination::Home);
        }

        GuardState::Authorized
    }

    /// Run `render` only when the session passes the check. Protected
    /// content is never produced while redirecting.
    pub fn protect<T>(&self, config: GuardConfig, render: impl FnOnce() -> T) -> Option<T> {
        match self.evaluate(config) {
            GuardState::Authorized => Some(render()),
            GuardState::Unchecked | GuardState::Redirecting(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::tests::make_token;
    use crate::auth::store::{MemoryTokenStore, TokenStore};
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Mutex<Vec<Destination>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, to: Destination) {
            self.visits.lock().unwrap().push(to);
        }
    }

    fn guard_with(token: Option<&str>) -> (RouteGuard, Arc<RecordingNavigator>) {
        let store = MemoryTokenStore::new();
        if let Some(token) = token {
            store.set(token);
        }
        let navigator = Arc::new(RecordingNavigator::default());
        let session = Session::new(Arc::new(store));
        (RouteGuard::new(session, navigator.clone()), navigator)
    }

    #[test]
    fn no_token_redirects_to_login() {
        let (guard, navigator) = guard_with(None);
        let rendered = guard.protect(GuardConfig { admin_only: false }, || "children");
        assert_eq!(rendered, None);
        assert_eq!(*navigator.visits.lock().unwrap(), vec![Destination::Login]);
    }

    #[test]
    fn non_admin_on_admin_route_redirects_home() {
        let token = make_token("Customer", Utc::now().timestamp() + 600);
        let (guard, navigator) = guard_with(Some(&token));
        let state = guard.evaluate(GuardConfig { admin_only: true });
        assert_eq!(state, GuardState::Redirecting(Destination::Home));
        assert_eq!(*navigator.visits.lock().unwrap(), vec![Destination::Home]);
    }

    #[test]
    fn admin_on_admin_route_is_authorized() {
        let token = make_token("Admin", Utc::now().timestamp() + 600);
        let (guard, navigator) = guard_with(Some(&token));
        let rendered = guard.protect(GuardConfig { admin_only: true }, || "children");
        assert_eq!(rendered, Some("children"));
        assert!(navigator.visits.lock().unwrap().is_empty());
    }

    #[test]
    fn expired_token_redirects_to_login() {
        let token = make_token("Admin", Utc::now().timestamp() - 600);
        let (guard, navigator) = guard_with(Some(&token));
        let state = guard.evaluate(GuardConfig { admin_only: true });
        assert_eq!(state, GuardState::Redirecting(Destination::Login));
        assert_eq!(*navigator.visits.lock().unwrap(), vec![Destination::Login]);
    }

    #[test]
    fn non_admin_on_plain_route_is_authorized() {
        let token = make_token("Customer", Utc::now().timestamp() + 600);
        let (guard, _) = guard_with(Some(&token));
        assert_eq!(
            guard.evaluate(GuardConfig { admin_only: false }),
            GuardState::Authorized
        );
    }
}
