//! Subscription purchase line for pre-issuance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A subscription to be sold in a pre-issuance ("abbonamento").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abbonamento {
    /// Subscription type id, as listed in the programming's `tipiabbonamenti`
    pub tipoabbonamento: i64,
    /// Gross price; `None` lets the server apply the type's list price
    pub importo: Option<Decimal>,
    /// Number of subscriptions, default 1
    pub qta: u32,
    /// Seats for numbered subscription types
    #[serde(default)]
    pub posti: Vec<i64>,
}

impl Abbonamento {
    pub fn new(tipoabbonamento: i64) -> Self {
        Self {
            tipoabbonamento,
            importo: None,
            qta: 1,
            posti: Vec::new(),
        }
    }

    pub fn with_importo(mut self, importo: Decimal) -> Self {
        self.importo = Some(importo);
        self
    }

    pub fn with_qta(mut self, qta: u32) -> Self {
        self.qta = qta;
        self
    }

    pub fn with_posti(mut self, posti: impl IntoIterator<Item = i64>) -> Self {
        self.posti = posti.into_iter().collect();
        self
    }
}
