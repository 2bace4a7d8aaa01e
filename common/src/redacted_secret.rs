//! Credentials and bearer tokens with redacted Debug/Display output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A secret string (client secret, access token) that never shows up in logs.
///
/// The label names what the secret is so log lines stay useful:
/// `RedactedSecret(client_secret, [REDACTED])`.
#[derive(Clone)]
pub struct RedactedSecret {
    label: &'static str,
    inner: String,
}

impl RedactedSecret {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            inner: value.into(),
        }
    }

    /// The raw value, for building the outgoing request only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Length of the secret (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedSecret({}, [REDACTED])", self.label)
    }
}

impl fmt::Display for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {}]", self.label)
    }
}

impl Drop for RedactedSecret {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedSecret {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            label: self.label,
            message: String::from("cannot be serialized, use expose() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
