//! Domain ports defining the edges of the hexagon.
//!
//! Inbound adapters depend on these traits rather than on concrete
//! generators, so tests can substitute deterministic or failing
//! implementations.

mod users_query;

pub use users_query::{FixtureUsersQuery, UsersQuery};
