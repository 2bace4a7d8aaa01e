use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures inside a storefront lookup.
///
/// These never reach the HTTP client; [`StoreChecker`](crate::store::StoreChecker)
/// implementations log them and answer `{found: false}`.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Store Request Error: {message} {location}")]
    Request {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("Store Status Error: HTTP {status_code} {location}")]
    Status {
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Store Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store URL Error: {message} {location}")]
    Url {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn status(status_code: u16) -> Self {
        StoreError::Status {
            status_code: HttpStatusCode(status_code),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return StoreError::Decode {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        StoreError::Request {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for StoreError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        StoreError::Url {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
