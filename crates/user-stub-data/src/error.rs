//! Error types for the user-stub-data crate.

use thiserror::Error;

/// Errors raised when building a [`crate::DepartmentCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue contains no labels.
    #[error("department catalogue must contain at least one label")]
    Empty,

    /// A label is empty or whitespace-only.
    #[error("department label at index {index} must not be blank")]
    BlankLabel {
        /// Position of the blank label.
        index: usize,
    },

    /// The same label appears more than once.
    #[error("department label '{label}' appears more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

/// Errors raised when constructing a [`crate::UserCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CountError {
    /// Zero users were requested.
    #[error("user count must be at least 1")]
    Zero,
}
