//! Argument guards used at construction boundaries.
//!
//! Every guard returns `Ok(())` when the argument is acceptable and a
//! [`CandyError`] naming the offending argument otherwise, so callers can
//! chain them with `?`.

use crate::error::CandyError;

/// Fails with [`CandyError::InvalidArgument`] when `value` is empty.
///
/// # Examples
///
/// ```
/// use candy_rs::guard;
///
/// assert!(guard::not_empty("abc", "pool").is_ok());
/// assert!(guard::not_empty("", "pool").is_err());
/// ```
pub fn not_empty(value: &str, name: &str) -> Result<(), CandyError> {
    if value.is_empty() {
        return Err(CandyError::invalid_argument(name, "cannot be empty string"));
    }
    Ok(())
}

/// Fails with [`CandyError::InvalidArgument`] when `value` is zero.
pub fn not_zero(value: usize, name: &str) -> Result<(), CandyError> {
    if value == 0 {
        return Err(CandyError::invalid_argument(name, "must be greater than zero"));
    }
    Ok(())
}

/// Fails with [`CandyError::OutOfRange`] when `value` is below `min`.
pub fn at_least(value: usize, min: usize, name: &str) -> Result<(), CandyError> {
    if value < min {
        return Err(CandyError::OutOfRange {
            name: name.to_string(),
            value,
            min,
        });
    }
    Ok(())
}
