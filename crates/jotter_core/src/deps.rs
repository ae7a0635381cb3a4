//! Per-request capability bundle handed to services.
//!
//! # Invariants
//! - `auth_user_id` is the raw identity from the authentication collaborator;
//!   services validate it through their contracts before use.
//! - `Deps` borrows the pool and never owns it.

use crate::db::DbPool;

/// Data-access handle plus the authenticated caller, if any.
#[derive(Debug, Clone)]
pub struct Deps<'a> {
    db: &'a DbPool,
    auth_user_id: Option<String>,
}

impl<'a> Deps<'a> {
    /// Deps for unauthenticated operations.
    pub fn public(db: &'a DbPool) -> Self {
        Self {
            db,
            auth_user_id: None,
        }
    }

    /// Deps carrying the session's user id.
    pub fn authenticated(db: &'a DbPool, user_id: impl Into<String>) -> Self {
        Self {
            db,
            auth_user_id: Some(user_id.into()),
        }
    }

    pub fn db(&self) -> &'a DbPool {
        self.db
    }

    pub fn auth_user_id(&self) -> Option<&str> {
        self.auth_user_id.as_deref()
    }
}
