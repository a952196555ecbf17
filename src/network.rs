//! Wire constants for the Cinebot remote API.

/// Client version reported in the `User-Agent` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product token of the `User-Agent` header.
pub const USER_AGENT_PRODUCT: &str = "CinebotApiClient-Rust";

/// Path segment every remote endpoint lives under (`{base_url}/remote/{path}`).
pub const REMOTE_PREFIX: &str = "remote";

/// Exception class the server reports for business-rule failures.
///
/// Compared as an exact string; any other value (or none) is a generic failure.
pub const LOGICAL_EXCEPTION: &str = "com.cinebot.exception.LogicalException";

/// Default total request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Server-side lifetime of a pre-issued ticket or subscription, in seconds.
///
/// The server owns the timer. The client never extends a lease on its own.
pub const PREEMISSIONE_LEASE_SECS: u64 = 300;

/// Full `User-Agent` header value.
pub fn user_agent() -> String {
    format!("{}/{}", USER_AGENT_PRODUCT, CLIENT_VERSION)
}
