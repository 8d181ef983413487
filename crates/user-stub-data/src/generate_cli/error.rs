//! Error types for the user generation CLI.

use thiserror::Error;

use crate::error::CountError;

/// Errors surfaced by CLI parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The user count was not supplied.
    #[error("missing required flag: --count")]
    MissingCount,
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The requested count was zero.
    #[error("invalid --count: {source}")]
    InvalidCount {
        /// Underlying count validation error.
        #[from]
        #[source]
        source: CountError,
    },
    /// The generated users could not be rendered as JSON.
    #[error("failed to render users as JSON: {message}")]
    Render {
        /// Serialiser error message.
        message: String,
    },
}
