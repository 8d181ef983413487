//! Synthetic user record generation for stub APIs and demonstrations.
//!
//! This crate fabricates believable but fictitious users. Each record carries
//! a display name, an avatar URL, one to three departments sampled from a
//! fixed catalogue, and a UUID v4 identifier. Nothing is persisted.
//!
//! All generation functions take an explicit random number generator, so a
//! seeded RNG yields reproducible output while an entropy-backed RNG yields
//! fresh data on every call.
//!
//! # Example
//!
//! ```
//! use user_stub_data::{DepartmentCatalogue, UserCount, generate_users_seeded};
//!
//! let catalogue = DepartmentCatalogue::standard();
//! let count = UserCount::new(3).expect("non-zero count");
//! let users = generate_users_seeded(42, count, &catalogue);
//!
//! assert_eq!(users.len(), 3);
//! assert!(users.iter().all(|user| !user.departments.is_empty()));
//! ```

mod catalogue;
mod count;
mod error;
pub mod generate_cli;
mod generator;
mod record;
mod sampler;

pub use catalogue::{DEPARTMENTS, DepartmentCatalogue};
pub use count::UserCount;
pub use error::{CatalogueError, CountError};
pub use generator::{generate_single_user, generate_users, generate_users_seeded};
pub use record::UserRecord;
pub use sampler::{MAX_DEPARTMENTS, MIN_DEPARTMENTS, sample_departments};
