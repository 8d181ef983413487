//! Request validation for the users endpoint.
//!
//! Counts arrive as raw path segments. Validation runs before any
//! generation so malformed requests never touch the RNG.

use user_stub_data::UserCount;

use crate::domain::Error;

/// Message returned for non-numeric, zero, or negative counts.
pub const INVALID_COUNT_MESSAGE: &str = "Invalid count. Please provide a positive integer.";

/// Message returned for counts above the configured maximum.
pub fn count_too_large_message(max: UserCount) -> String {
    format!("Invalid count. Please request at most {max} users.")
}

/// Parse a raw path segment into a bounded [`UserCount`].
///
/// Leading whitespace and an optional sign are skipped, then the leading run
/// of decimal digits is taken as the value; anything after it is ignored, so
/// `3abc` reads as 3 and `1.5` as 1. Segments without leading digits, or with
/// a value below one, are rejected with [`INVALID_COUNT_MESSAGE`]. Values
/// above `max` are rejected with [`count_too_large_message`].
///
/// # Examples
/// ```
/// use user_stub_api::inbound::http::validation::parse_count;
/// use user_stub_data::UserCount;
///
/// let max = UserCount::new(1000).expect("non-zero");
/// assert_eq!(parse_count("3", max).expect("valid").get(), 3);
/// assert_eq!(parse_count("3abc", max).expect("valid").get(), 3);
/// assert!(parse_count("abc", max).is_err());
/// ```
pub fn parse_count(raw: &str, max: UserCount) -> Result<UserCount, Error> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digit_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let (digits, _) = unsigned.split_at(digit_len);

    // A signed zero or any negative value falls below the minimum.
    if digits.is_empty() || negative {
        return Err(Error::invalid_request(INVALID_COUNT_MESSAGE));
    }

    // Only overflow can fail once the input is a non-empty digit run.
    let value = digits
        .parse::<usize>()
        .map_err(|_| Error::invalid_request(count_too_large_message(max)))?;
    let count =
        UserCount::new(value).map_err(|_| Error::invalid_request(INVALID_COUNT_MESSAGE))?;

    if count.get() > max.get() {
        return Err(Error::invalid_request(count_too_large_message(max)));
    }
    Ok(count)
}
