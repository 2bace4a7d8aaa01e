use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Missing Variable Error: {key} is not set {location}")]
    MissingVar {
        location: ErrorLocation,
        key: &'static str,
    },

    #[error("Config Parse Error: {key}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        key: &'static str,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn missing_var(key: &'static str) -> Self {
        ConfigError::MissingVar {
            location: ErrorLocation::from(Location::caller()),
            key,
        }
    }

    #[track_caller]
    pub fn parse(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            key,
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: reason.into(),
        }
    }
}
