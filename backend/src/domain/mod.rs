//! Domain primitives, services, and ports.
//!
//! Purpose: keep the HTTP layer thin. Handlers translate requests into
//! calls on [`ports::UsersQuery`] and map [`Error`] values onto responses.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - SyntheticUsers: production implementation of the users port.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod synthetic_users;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::synthetic_users::{RngSource, SyntheticUsers};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

