use thiserror::Error;

#[derive(Error, Debug)]
/// Candy error
pub enum CandyError {
    #[error("Invalid argument \"{name}\": {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Argument \"{name}\" is out of range: {value} is below the minimum of {min}")]
    OutOfRange {
        name: String,
        value: usize,
        min: usize,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Source from: {0}")]
    Source(String),

    #[error("Settings from: {0}")]
    Settings(#[from] serde_json::Error),
}

impl CandyError {
    pub(crate) fn invalid_argument(name: &str, reason: &str) -> Self {
        CandyError::InvalidArgument {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
