//! Process configuration read from the environment.
//!
//! The two Twitch credentials are required; everything else has a default.
//! A `.env` file in the working directory (or next to the executable) is
//! loaded first when present.

use crate::error::ConfigError;
use crate::{GOG_CATALOG_BASE_URL, IGDB_API_BASE_URL, TWITCH_TOKEN_URL};

use common::RedactedSecret;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

pub const ENV_CLIENT_ID: &str = "TWITCH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "TWITCH_CLIENT_SECRET";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_IGDB_API_URL: &str = "IGDB_API_URL";
pub const ENV_TWITCH_TOKEN_URL: &str = "TWITCH_TOKEN_URL";
pub const ENV_GOG_CATALOG_URL: &str = "GOG_CATALOG_URL";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LOG_DIR: &str = "logs";

// ============================================
// CONFIG STRUCTS
// ============================================

/// Twitch application credentials used for the client-credentials exchange.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: RedactedSecret,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: RedactedSecret::new("client_secret", client_secret),
        }
    }
}

/// Per-call upstream limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub search: Duration,
    pub details: Duration,
    pub token: Duration,
    pub store: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(15),
            details: Duration::from_secs(10),
            token: Duration::from_secs(10),
            store: Duration::from_secs(10),
        }
    }
}

/// Upstream endpoints. Overridable so tests can point everything at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub igdb_api: Url,
    pub twitch_token: Url,
    pub gog_catalog: Url,
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub credentials: Credentials,
    pub bind_address: String,
    pub port: u16,
    pub endpoints: Endpoints,
    pub timeouts: Timeouts,
    pub log_dir: PathBuf,
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ProxyConfig {
    /// Load config from `.env` (if present) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when either credential is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !try_load_dotenv() {
            debug!("No .env file found - using process environment only");
        }

        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                warn!("Env var {key} contains invalid unicode, ignoring it");
                None
            }
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required key is missing, a value fails to
    /// parse, or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = required(&lookup, ENV_CLIENT_ID)?;
        let client_secret = required(&lookup, ENV_CLIENT_SECRET)?;

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::parse(ENV_PORT, e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let config = Self {
            credentials: Credentials::new(client_id, client_secret),
            bind_address: lookup(ENV_BIND_ADDRESS).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            endpoints: Endpoints {
                igdb_api: url_or_default(&lookup, ENV_IGDB_API_URL, IGDB_API_BASE_URL)?,
                twitch_token: url_or_default(&lookup, ENV_TWITCH_TOKEN_URL, TWITCH_TOKEN_URL)?,
                gog_catalog: url_or_default(&lookup, ENV_GOG_CATALOG_URL, GOG_CATALOG_BASE_URL)?,
            },
            timeouts: Timeouts::default(),
            log_dir: PathBuf::from(lookup(ENV_LOG_DIR).unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
        };

        config.validate()?;

        info!(
            "Config loaded (client id {} chars, secret {} chars, port {})",
            config.credentials.client_id.len(),
            config.credentials.client_secret.len(),
            config.port
        );
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.client_id.trim().is_empty() {
            return Err(ConfigError::validation(format!("{ENV_CLIENT_ID} cannot be empty")));
        }

        if self.credentials.client_secret.is_empty() {
            return Err(ConfigError::validation(format!("{ENV_CLIENT_SECRET} cannot be empty")));
        }

        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::validation(format!("{ENV_BIND_ADDRESS} cannot be empty")));
        }

        for url in [
            &self.endpoints.igdb_api,
            &self.endpoints.twitch_token,
            &self.endpoints.gog_catalog,
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::validation(format!("Invalid URL scheme: {url}")));
            }
        }

        Ok(())
    }

    /// `host:port` the HTTP server binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Log directory from `.env` / the environment, resolved before the rest of
/// the config so the logger is up when config errors are reported.
pub fn log_dir_from_env() -> PathBuf {
    try_load_dotenv();
    env::var(ENV_LOG_DIR)
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::missing_var(key)),
    }
}

fn url_or_default<F>(lookup: &F, key: &'static str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());

    // Url::join drops the last path segment unless the base ends in '/'
    let raw = if key == ENV_TWITCH_TOKEN_URL || raw.ends_with('/') {
        raw
    } else {
        format!("{raw}/")
    };

    Url::parse(&raw).map_err(|e| ConfigError::parse(key, e.to_string()))
}

/// Attempts to load .env from the working directory, then the executable directory.
fn try_load_dotenv() -> bool {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return true;
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return true;
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    false
}
