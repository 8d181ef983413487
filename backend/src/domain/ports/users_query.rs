//! Driving port for synthetic user queries.
//!
//! Inbound adapters (HTTP handlers) use this port to obtain generated users
//! without knowing how randomness is sourced. Production backs it with
//! [`crate::domain::SyntheticUsers`]; tests can use the fixed
//! [`FixtureUsersQuery`].

use user_stub_data::{UserCount, UserRecord};
use uuid::Uuid;

use crate::domain::Error;

/// Domain use-case port for generating users.
pub trait UsersQuery: Send + Sync {
    /// Produce exactly `count` users in generation order.
    fn generate(&self, count: UserCount) -> Result<Vec<UserRecord>, Error>;
}

/// Deterministic users query returning the same record shape every time.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

impl FixtureUsersQuery {
    const DISPLAY_NAME: &'static str = "Ada Lovelace";
    const AVATAR: &'static str = "https://avatars.githubusercontent.com/u/1";
    const DEPARTMENT: &'static str = "Hardware";
}

impl UsersQuery for FixtureUsersQuery {
    fn generate(&self, count: UserCount) -> Result<Vec<UserRecord>, Error> {
        let users = (0..count.get())
            .map(|index| UserRecord {
                name: Self::DISPLAY_NAME.to_owned(),
                avatar: Self::AVATAR.to_owned(),
                departments: vec![Self::DEPARTMENT.to_owned()],
                user_id: Uuid::from_u128(index as u128 + 1),
            })
            .collect();
        Ok(users)
    }
}
