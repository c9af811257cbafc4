//! Session evaluation derived from the stored token.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::claims::{self, Claims};
use crate::auth::store::TokenStore;

/// Role literal granting access to the administration surface. The match is
/// exact and case-sensitive.
pub const ADMIN_ROLE: &str = "Admin";

/// Derives authentication state and role from the token store, without
/// network calls.
///
/// Every check re-reads and re-decodes the token rather than caching the
/// claims, so a token cleared or rotated by a concurrent flow is observed
/// on the very next check. Checks run once per navigation or request, so
/// correctness wins over micro-efficiency here.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Claims of the currently stored token, or `None` when no token is
    /// stored or the stored value does not decode.
    pub fn claims(&self) -> Option<Claims> {
        self.store
            .get()
            .and_then(|token| claims::decode_claims(&token))
    }

    /// True iff a token is stored, decodes, and its `exp` lies strictly in
    /// the future. An expired token is treated like an absent one but is
    /// not deleted here; only logout or a 401 purges it.
    pub fn is_authenticated(&self) -> bool {
        match self.claims() {
            Some(claims) => claims.exp > Utc::now().timestamp(),
            None => false,
        }
    }

    /// True iff the stored token decodes and carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.claims().is_some_and(|claims| claims.role == ADMIN_ROLE)
    }
}
