use std::fmt;

use zeroize::Zeroizing;

use crate::error::CandyError;

/// Password buffer wiped from memory when dropped.
///
/// Characters are appended one at a time while the password is generated.
/// Once sealed with [`SecurePassword::make_read_only`] the buffer rejects any
/// further modification.
#[derive(Default)]
pub struct SecurePassword {
    value: Zeroizing<String>,
    read_only: bool,
}

impl SecurePassword {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            value: Zeroizing::new(String::with_capacity(capacity)),
            read_only: false,
        }
    }

    /// Appends a character.
    ///
    /// # Errors
    ///
    /// Returns [`CandyError::InvalidOperation`] when the password is read only.
    pub fn push(&mut self, c: char) -> Result<(), CandyError> {
        if self.read_only {
            return Err(CandyError::InvalidOperation(
                "secure password is read only".to_string(),
            ));
        }
        self.value.push(c);
        Ok(())
    }

    pub fn make_read_only(&mut self) {
        self.read_only = true;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Borrows the clear text.
    pub fn expose(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Debug for SecurePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurePassword")
            .field("len", &self.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}
