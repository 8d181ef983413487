//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use user_stub_data::UserCount;

use crate::domain::ports::UsersQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Port producing synthetic users.
    pub users: Arc<dyn UsersQuery>,
    /// Largest count a single request may ask for.
    pub max_count: UserCount,
}

impl HttpState {
    /// Construct state from a users port and a request ceiling.
    pub fn new(users: Arc<dyn UsersQuery>, max_count: UserCount) -> Self {
        Self { users, max_count }
    }
}
