//! Cinebot remote API client module.
//!
//! This module provides a typed HTTP client for the Cinebot fiscal
//! ticketing server: programming, seat maps, availability, bookings and the
//! two-phase ticket issuance protocol.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cinebot::api::{CinebotApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CinebotApiClient::new(ClientConfig::new(
//!         "https://1.2.3.4:8443",
//!         2,
//!         "secretpasskey",
//!     )?)?;
//!
//!     if client.is_ready(None).await? {
//!         let stato = client.get_stato_evento(5).await?;
//!         println!("{} free seats", stato.posti_liberi().count());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Two-Phase Issuance
//!
//! ```rust,ignore
//! use cinebot::api::*;
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//!
//! let request = PreemissioneRequest::new(
//!     5,
//!     Anagrafica::new("Rossi", "Mario", "mario@example.com"),
//!     Ingresso::new(1, Decimal::new(95, 1)).with_qta(2),
//!     1,
//!     "203.0.113.7",
//!     "order-8812",
//!     Utc::now(),
//! );
//!
//! let ids = client.preemissione(&request).await?;
//! // ... collect payment, renewing before five minutes elapse ...
//! client.rinnova_preemissione(ids.clone(), Vec::new()).await?;
//! let conferma = client.emissione(ids, Vec::new(), "card", Utc::now()).await?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`.
//! Business-rule failures are reported as [`ApiError::Logical`]:
//!
//! ```rust,ignore
//! match client.emissione(ids, Vec::new(), "card", Utc::now()).await {
//!     Ok(conferma) => println!("Issued: {}", conferma),
//!     Err(ApiError::Logical(msg)) => println!("Rejected: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::CinebotApiClient;
pub use config::{ClientConfig, Timeouts};
pub use envelope::{decode, Envelope};
pub use error::{ApiError, ApiResult};
pub use transport::{authorization_header, PostBody, Transport};
pub use types::*;
