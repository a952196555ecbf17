//! Ticket entry line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ticket entry line ("ingresso") for bookings, holds and pre-issuances.
///
/// Owned by the caller and serialized as-is; the client never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingresso {
    /// Server-assigned entry id, present on entries echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Sector id
    pub settore: i64,
    /// Unit price; may be omitted for holds
    pub prezzo: Option<Decimal>,
    /// Subscription code this entry is charged to; `None` for a paid ticket
    pub abbonamento: Option<String>,
    /// Number of entries, default 1
    pub qta: u32,
    /// Specific seat ids; empty means unassigned (general admission)
    #[serde(default)]
    pub posti: Vec<i64>,
}

impl Ingresso {
    /// One paid entry in a sector at the given price.
    pub fn new(settore: i64, prezzo: Decimal) -> Self {
        Self {
            id: None,
            settore,
            prezzo: Some(prezzo),
            abbonamento: None,
            qta: 1,
            posti: Vec::new(),
        }
    }

    /// An entry without a price, as used by holds.
    pub fn senza_prezzo(settore: i64) -> Self {
        Self {
            id: None,
            settore,
            prezzo: None,
            abbonamento: None,
            qta: 1,
            posti: Vec::new(),
        }
    }

    pub fn with_qta(mut self, qta: u32) -> Self {
        self.qta = qta;
        self
    }

    /// Charge the entry to a subscription entitlement.
    pub fn with_abbonamento(mut self, abbonamento: impl Into<String>) -> Self {
        self.abbonamento = Some(abbonamento.into());
        self
    }

    /// Assign specific seats.
    pub fn with_posti(mut self, posti: impl IntoIterator<Item = i64>) -> Self {
        self.posti = posti.into_iter().collect();
        self
    }

    /// Whether this entry consumes a subscription entitlement.
    pub fn uses_abbonamento(&self) -> bool {
        self.abbonamento.is_some()
    }

    /// Whether the entry names specific seats.
    pub fn is_numbered(&self) -> bool {
        !self.posti.is_empty()
    }
}
