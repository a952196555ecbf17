//! Request and response types for the Cinebot remote API.
//!
//! Field names follow the server's wire format.

pub mod abbonamento;
pub mod anagrafica;
pub mod ingresso;
pub mod mappa;
pub mod programmazione;
pub mod sistema;
pub mod stato;
pub mod vendita;

pub use abbonamento::*;
pub use anagrafica::*;
pub use ingresso::*;
pub use mappa::*;
pub use programmazione::*;
pub use sistema::*;
pub use stato::*;
pub use vendita::*;
