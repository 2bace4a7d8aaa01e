//! Errors for the search and details pipelines.
//!
//! Every variant knows the HTTP status it is reported with, so the request
//! handler boundary never has to inspect messages:
//!
//! | Variant      | Status |
//! |--------------|--------|
//! | `Validation` | 400    |
//! | `NotFound`   | 404    |
//! | `Upstream`   | 500    |
//! | `Network`    | 500    |
//! | `Internal`   | 500    |
//! | `Auth`       | 503    |
//! | `Timeout`    | 504    |

use super::token::TokenError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Auth Error: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Error: HTTP {status_code} - {message} {location}")]
    Upstream {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: no response within {timeout_secs}s {location}")]
    Timeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Not Found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal Error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl CatalogError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth(message: impl Into<String>) -> Self {
        CatalogError::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn upstream(status_code: u16, body: impl Into<String>) -> Self {
        CatalogError::Upstream {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(timeout: Duration) -> Self {
        CatalogError::Timeout {
            timeout_secs: timeout.as_secs(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        CatalogError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        CatalogError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    ///
    /// `timeout` is the limit the request was sent with; it only shows up in
    /// the message.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            return CatalogError::timeout(timeout);
        }

        if error.is_decode() {
            return CatalogError::internal(format!("Undecodable IGDB response: {error}"));
        }

        if let Some(status) = error.status() {
            return CatalogError::upstream(status.as_u16(), error.to_string());
        }

        CatalogError::Network {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Status code the HTTP surface reports this error with.
    pub fn http_status(&self) -> u16 {
        match self {
            CatalogError::Validation { .. } => 400,
            CatalogError::NotFound { .. } => 404,
            CatalogError::Upstream { .. } => 500,
            CatalogError::Network { .. } => 500,
            CatalogError::Internal { .. } => 500,
            CatalogError::Auth { .. } => 503,
            CatalogError::Timeout { .. } => 504,
        }
    }

    /// Message safe to hand back to the browser (no locations, no upstream bodies).
    pub fn client_message(&self) -> String {
        match self {
            CatalogError::Validation { message, .. } => message.clone(),
            CatalogError::NotFound { message, .. } => message.clone(),
            CatalogError::Auth { .. } => String::from("Authentication with IGDB failed"),
            CatalogError::Upstream { .. } | CatalogError::Network { .. } => {
                String::from("Failed to fetch data from IGDB")
            }
            CatalogError::Timeout { .. } => String::from("Request to IGDB timed out"),
            CatalogError::Internal { .. } => String::from("Internal server error"),
        }
    }

    /// Short category name for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            CatalogError::Validation { .. } => "validation",
            CatalogError::Auth { .. } => "auth",
            CatalogError::Upstream { status_code, .. } if status_code.is_client_error() => "upstream_client_error",
            CatalogError::Upstream { status_code, .. } if status_code.is_server_error() => "upstream_server_error",
            CatalogError::Upstream { .. } => "upstream",
            CatalogError::Network { .. } => "network",
            CatalogError::Timeout { .. } => "timeout",
            CatalogError::NotFound { .. } => "not_found",
            CatalogError::Internal { .. } => "internal",
        }
    }

    /// Upstream HTTP status, if the error came from a catalog response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}

impl From<TokenError> for CatalogError {
    #[track_caller]
    fn from(error: TokenError) -> Self {
        CatalogError::Auth {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for CatalogError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        CatalogError::Internal {
            message: format!("URL Parse Error: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
