//! Positive user count accepted by the generator.

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::CountError;

/// Number of users to generate; always at least one.
///
/// # Examples
///
/// ```
/// use user_stub_data::{CountError, UserCount};
///
/// let count = UserCount::new(5).expect("non-zero");
/// assert_eq!(count.get(), 5);
/// assert_eq!(UserCount::new(0), Err(CountError::Zero));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserCount(NonZeroUsize);

impl UserCount {
    /// A single user.
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    /// Validate and construct a count.
    ///
    /// # Errors
    ///
    /// Returns [`CountError::Zero`] when `value` is zero.
    pub fn new(value: usize) -> Result<Self, CountError> {
        NonZeroUsize::new(value).map(Self).ok_or(CountError::Zero)
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for UserCount {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl TryFrom<usize> for UserCount {
    type Error = CountError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_one() {
        assert_eq!(UserCount::ONE.get(), 1);
    }

    #[test]
    fn try_from_rejects_zero() {
        assert_eq!(UserCount::try_from(0), Err(CountError::Zero));
    }

    #[test]
    fn orders_by_value() {
        let small = UserCount::new(2).expect("non-zero");
        let large = UserCount::new(20).expect("non-zero");
        assert!(small < large);
    }

    #[test]
    fn displays_plain_integer() {
        let count = UserCount::new(42).expect("non-zero");
        assert_eq!(count.to_string(), "42");
    }
}
