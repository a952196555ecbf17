//! Shared helpers used by request and response types.

pub mod serde_util;
pub mod types;

pub use types::*;
