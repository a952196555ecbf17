//! Client configuration.
//!
//! [`ClientConfig`] is built once and handed to
//! [`CinebotApiClient::new`](crate::api::CinebotApiClient::new); the client
//! never mutates it afterwards.
//!
//! ```rust,ignore
//! use cinebot::api::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("https://1.2.3.4:8443", 2, "secretpasskey")?
//!     .with_timeout(Duration::from_secs(10))
//!     .with_traffic_logging(true);
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::api::error::{ApiError, ApiResult};
use crate::network::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

/// Environment variable holding the base URL.
pub const ENV_URL: &str = "CINEBOT_URL";
/// Environment variable holding the remote-system identifier.
pub const ENV_ID: &str = "CINEBOT_ID";
/// Environment variable holding the passkey.
pub const ENV_PASSKEY: &str = "CINEBOT_PASSKEY";
/// Environment variable holding the total timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CINEBOT_TIMEOUT_SECS";
/// Environment variable holding the connect timeout in seconds.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "CINEBOT_CONNECT_TIMEOUT_SECS";
/// Environment variable enabling TLS verification (`true`/`false`).
pub const ENV_VERIFY_TLS: &str = "CINEBOT_VERIFY_TLS";

/// Immutable configuration of a Cinebot client.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    remote_id: String,
    passkey: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    verify_tls: bool,
    log_traffic: bool,
}

impl ClientConfig {
    /// Create a configuration for the given server and remote client credentials.
    ///
    /// # Arguments
    ///
    /// * `base_url` - `http[s]://host:port`, e.g. `https://1.2.3.4:8443`
    /// * `remote_id` - Remote client number registered on the system
    /// * `passkey` - Remote client password
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if `base_url` is not an absolute
    /// http(s) URL with a host.
    pub fn new(
        base_url: impl AsRef<str>,
        remote_id: impl fmt::Display,
        passkey: impl Into<String>,
    ) -> ApiResult<Self> {
        let base_url = validate_base_url(base_url.as_ref())?;
        Ok(Self {
            base_url,
            remote_id: remote_id.to_string(),
            passkey: passkey.into(),
            timeout: None,
            connect_timeout: None,
            verify_tls: false,
            log_traffic: false,
        })
    }

    /// Load the configuration from `CINEBOT_*` environment variables.
    ///
    /// `CINEBOT_URL`, `CINEBOT_ID` and `CINEBOT_PASSKEY` are required;
    /// `CINEBOT_TIMEOUT_SECS`, `CINEBOT_CONNECT_TIMEOUT_SECS` and
    /// `CINEBOT_VERIFY_TLS` are optional.
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::new(
            required_env(ENV_URL)?,
            required_env(ENV_ID)?,
            required_env(ENV_PASSKEY)?,
        )?;

        if let Some(secs) = optional_env(ENV_TIMEOUT_SECS)? {
            config.timeout = Some(Duration::from_secs(parse_env(ENV_TIMEOUT_SECS, &secs)?));
        }
        if let Some(secs) = optional_env(ENV_CONNECT_TIMEOUT_SECS)? {
            config.connect_timeout = Some(Duration::from_secs(parse_env(
                ENV_CONNECT_TIMEOUT_SECS,
                &secs,
            )?));
        }
        if let Some(flag) = optional_env(ENV_VERIFY_TLS)? {
            config.verify_tls = parse_env(ENV_VERIFY_TLS, &flag)?;
        }

        Ok(config)
    }

    /// Set the total request timeout used when a call gives no override.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enable or disable TLS certificate and hostname verification.
    ///
    /// Verification is **disabled by default**: on-premise fiscal devices
    /// serve self-signed certificates. Turn it on whenever the server has a
    /// certificate that chains to a trusted root.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Emit `tracing` records for every request and raw response.
    pub fn with_traffic_logging(mut self, enabled: bool) -> Self {
        self.log_traffic = enabled;
        self
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn remote_id(&self) -> &str {
        &self.remote_id
    }

    pub(crate) fn passkey(&self) -> &str {
        &self.passkey
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn log_traffic(&self) -> bool {
        self.log_traffic
    }

    /// Timeouts in effect for a call with the given override.
    pub fn timeouts(&self, override_timeout: Option<Duration>) -> Timeouts {
        Timeouts::resolve(override_timeout, self.timeout, self.connect_timeout)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("remote_id", &self.remote_id)
            .field("passkey", &"***")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("verify_tls", &self.verify_tls)
            .field("log_traffic", &self.log_traffic)
            .finish()
    }
}

/// Effective timeouts for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Whole-request timeout
    pub total: Duration,
    /// Connection establishment timeout.
    ///
    /// Set on the `reqwest::Client` when the client is built. reqwest has no
    /// per-request connect timeout, so a per-call override is enforced through
    /// `total`, which bounds the connect phase too; with an override both
    /// fields hold the override.
    pub connect: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            total: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Timeouts {
    /// Resolve timeouts: per-call override, then configured value, then hard default.
    ///
    /// The connect timeout falls back to the configured total timeout before
    /// the hard default, as the server's reference client does.
    pub fn resolve(
        override_timeout: Option<Duration>,
        configured: Option<Duration>,
        configured_connect: Option<Duration>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            total: override_timeout.or(configured).unwrap_or(defaults.total),
            connect: override_timeout
                .or(configured_connect)
                .or(configured)
                .unwrap_or(defaults.connect),
        }
    }
}

fn validate_base_url(raw: &str) -> ApiResult<String> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::Configuration(format!("Invalid base URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Configuration(format!(
            "Invalid base URL '{}': scheme must be http or https",
            raw
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ApiError::Configuration(format!(
            "Invalid base URL '{}': missing host",
            raw
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn required_env(name: &str) -> ApiResult<String> {
    optional_env(name)?
        .ok_or_else(|| ApiError::Configuration(format!("Missing environment variable {}", name)))
}

fn optional_env(name: &str) -> ApiResult<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ApiError::Configuration(format!("{}: {}", name, e))),
    }
}

fn parse_env<T>(name: &str, value: &str) -> ApiResult<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| ApiError::Configuration(format!("Invalid {} '{}': {}", name, value, e)))
}
