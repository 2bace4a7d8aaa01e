use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to serialize a [`RedactedSecret`](crate::RedactedSecret).
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Serialization Error: '{label}' {message} {location}")]
    Serialization {
        label: &'static str,
        message: String,
        location: ErrorLocation,
    },
}
