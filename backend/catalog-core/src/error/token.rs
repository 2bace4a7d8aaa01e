//! Errors raised by the Twitch credential exchange.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TokenError {
    #[error("Token Exchange Error: HTTP {status_code} - {message} {location}")]
    Exchange {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("Token Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl TokenError {
    #[track_caller]
    pub fn exchange(status_code: u16, body: impl Into<String>) -> Self {
        TokenError::Exchange {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        TokenError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error, keeping timeouts distinguishable.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_decode() {
            return TokenError::decode(error.to_string());
        }

        if let Some(status) = error.status() {
            return TokenError::exchange(status.as_u16(), error.to_string());
        }

        TokenError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TokenError::Exchange { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}
