use log::trace;
use serde::Serialize;

use super::pool::is_special;
use crate::{error::CandyError, guard};

/// Minimal length for a password to get a non-zero score.
pub const MIN_SCORED_LENGTH: usize = 9;

/// Counters collected while scanning a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub length: usize,
    pub uppercase: usize,
    pub lowercase: usize,
    pub digits: usize,
    pub special: usize,
    /// Digits that are neither the first nor the last character.
    pub middle_digits: usize,
    /// Number of character groups (upper, lower, digit, special) present.
    pub requirements_met: usize,
    pub score: u32,
}

/// Scans `password` once and computes its strength report.
///
/// The score is four points per character, forced down to zero when the
/// password is shorter than nine characters or does not mix all four
/// groups. `middle_digits` is reported but does not change the score.
///
/// # Errors
///
/// Returns [`CandyError::InvalidArgument`] for an empty password.
pub fn analyze_password(password: &str) -> Result<StrengthReport, CandyError> {
    guard::not_empty(password, "password")?;

    let length = password.chars().count();
    let mut report = StrengthReport {
        length,
        uppercase: 0,
        lowercase: 0,
        digits: 0,
        special: 0,
        middle_digits: 0,
        requirements_met: 0,
        score: 0,
    };

    for (i, c) in password.chars().enumerate() {
        if c.is_uppercase() {
            report.uppercase += 1;
        }
        if c.is_lowercase() {
            report.lowercase += 1;
        }
        if c.is_ascii_digit() {
            report.digits += 1;
            if i > 0 && i + 1 < length {
                report.middle_digits += 1;
            }
        }
        if is_special(c) {
            report.special += 1;
        }
    }

    report.requirements_met = [
        report.uppercase,
        report.lowercase,
        report.digits,
        report.special,
    ]
    .iter()
    .filter(|count| **count > 0)
    .count();

    let score = u32::try_from(length.saturating_mul(4)).unwrap_or(u32::MAX);
    report.score = if length < MIN_SCORED_LENGTH || report.requirements_met <= 3 {
        0
    } else {
        score
    };

    trace!("Password strength: {:?}", report);
    Ok(report)
}

/// Estimates password strength.
///
/// # Examples
///
/// ```
/// use candy_rs::password::estimate_password_strength;
///
/// assert_eq!(estimate_password_strength("1111").unwrap(), 0);
/// assert_eq!(estimate_password_strength("AA11bb00__").unwrap(), 40);
/// assert!(estimate_password_strength("").is_err());
/// ```
pub fn estimate_password_strength(password: &str) -> Result<u32, CandyError> {
    analyze_password(password).map(|report| report.score)
}
