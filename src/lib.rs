//! # Cinebot Rust SDK
//!
//! A Rust client for the Cinebot remote API: the box-office and fiscal
//! ticketing server that front-end sales systems talk to.
//!
//! ## Modules
//!
//! - [`api`]: Typed HTTP client for programming, seat maps, availability,
//!   bookings, holds and two-phase ticket issuance
//! - [`blocking`]: Synchronous facade over the async client (feature `blocking`)
//! - [`shared`]: Normalization and serde helpers shared by request and response types
//! - [`network`]: Wire constants (paths, user agent, default timeouts)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cinebot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://1.2.3.4:8443", 2, "secretpasskey")?
//!         .with_traffic_logging(true);
//!     let client = CinebotApiClient::new(config)?;
//!
//!     let status = client.ping(None).await?;
//!     println!("System {} ready: {}", status.codicesistema, status.ready);
//!
//!     let programmazione = client.get_programmazione().await?;
//!     for (titolo, evento) in programmazione.eventi() {
//!         println!("{} @ {}", titolo.titolo, evento.inizio);
//!     }
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Shared helpers: one-or-many normalization, epoch-millisecond timestamps.
pub mod shared;

/// Wire constants.
pub mod network;

/// Remote API client module.
#[cfg(feature = "http")]
pub mod api;

/// Blocking client for non-async callers.
#[cfg(feature = "blocking")]
pub mod blocking;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use cinebot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::shared::{IdList, OneOrMany, PreemissioneId};

    pub use crate::network::{LOGICAL_EXCEPTION, PREEMISSIONE_LEASE_SECS};

    #[cfg(feature = "http")]
    pub use crate::api::{
        ApiError, ApiResult, CinebotApiClient, ClientConfig, Timeouts,
        // Data shapes
        Abbonamento, Anagrafica, Ingresso,
        // Responses
        Esito, Evento, Posto, Prezzo, Programmazione, Settore, StatoEvento, StatoPosto,
        StatoPostoAbbonamento, StatoSettore, StatoSlot, StatoTipoAbbonamento, SystemStatus,
        TipoAbbonamento, TipoPrezzo, Titolo,
        // Requests
        BloccoRequest, EmissioneRequest, PreemissioneIds, PreemissioneRequest,
        PrenotazioneRequest, VerificaAbbonatoRequest,
    };

    #[cfg(feature = "blocking")]
    pub use crate::blocking::BlockingClient;
}
