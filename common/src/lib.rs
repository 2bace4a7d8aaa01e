//! Shared primitives for the IGDB proxy workspace.
//!
//! Nothing in here knows about IGDB, Twitch or GOG. These are the small
//! building blocks every other crate leans on:
//!
//! - [`ErrorLocation`]: file/line/column captured at error construction
//! - [`HttpStatusCode`]: upstream status classification
//! - [`RedactedSecret`]: credentials and tokens that never reach a log line
//!
//! ## Architecture
//!
//! - **common** (this crate): Shared primitives
//! - **catalog-core**: Token cache, upstream client, normalization
//! - **igdb-proxy**: HTTP surface wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
