//! Process-level errors and the HTTP error boundary.

use catalog_core::error::{CatalogError, ConfigError, CoreError};

use common::ErrorLocation;

use std::panic::Location;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;

/// Errors that stop the process from starting or serving.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Startup Error: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ProxyError {
    #[track_caller]
    pub fn startup(message: impl Into<String>) -> Self {
        ProxyError::Startup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        ProxyError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for ProxyError {
    fn from(error: ConfigError) -> Self {
        ProxyError::Core(CoreError::Config(error))
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler-side wrapper that renders a [`CatalogError`] as `{"error": ...}`.
///
/// The client sees [`CatalogError::client_message`]; the full error, location
/// included, only goes to the log.
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("[{}] {} -> HTTP {}", self.0.error_category(), self.0, status.as_u16());
        } else {
            warn!("[{}] {} -> HTTP {}", self.0.error_category(), self.0, status.as_u16());
        }

        let body = ErrorBody {
            error: self.0.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
