//! Availability status types: event status and subscription-type seat status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// State of a seat for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum StatoPosto {
    Libero = 0,
    Occupato = 1,
    /// Reserved for a subscriber
    RiservatoAbbonato = 2,
    Prenotato = 3,
    Bloccato = 4,
    /// Subscriber seat not reserved for this event
    AbbonatoNonRiservato = 5,
}

impl StatoPosto {
    /// Whether the seat can be sold right now.
    pub fn is_free(self) -> bool {
        self == Self::Libero
    }
}

/// Error returned when a seat state code is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatoPostoError(pub i32);

impl std::fmt::Display for InvalidStatoPostoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid seat state: {} (expected 0-5)", self.0)
    }
}

impl std::error::Error for InvalidStatoPostoError {}

impl TryFrom<i32> for StatoPosto {
    type Error = InvalidStatoPostoError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Libero),
            1 => Ok(Self::Occupato),
            2 => Ok(Self::RiservatoAbbonato),
            3 => Ok(Self::Prenotato),
            4 => Ok(Self::Bloccato),
            5 => Ok(Self::AbbonatoNonRiservato),
            _ => Err(InvalidStatoPostoError(value)),
        }
    }
}

impl From<StatoPosto> for i32 {
    fn from(stato: StatoPosto) -> Self {
        stato as i32
    }
}

/// State of a seat for a numbered subscription type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum StatoPostoAbbonamento {
    /// Outside the subscription's sectors
    FuoriSettore = -1,
    Libero = 0,
    Occupato = 1,
}

/// Error returned when a subscription seat state code is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatoPostoAbbonamentoError(pub i32);

impl std::fmt::Display for InvalidStatoPostoAbbonamentoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid subscription seat state: {} (expected -1, 0 or 1)", self.0)
    }
}

impl std::error::Error for InvalidStatoPostoAbbonamentoError {}

impl TryFrom<i32> for StatoPostoAbbonamento {
    type Error = InvalidStatoPostoAbbonamentoError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::FuoriSettore),
            0 => Ok(Self::Libero),
            1 => Ok(Self::Occupato),
            _ => Err(InvalidStatoPostoAbbonamentoError(value)),
        }
    }
}

impl From<StatoPostoAbbonamento> for i32 {
    fn from(stato: StatoPostoAbbonamento) -> Self {
        stato as i32
    }
}

/// Capacity of one slot of a slot-managed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatoSlot {
    pub capienza: i64,
    /// Residue available for online sale
    pub residui: i64,
    /// Whether the slot has a capacity limit for online sales
    #[serde(default)]
    pub limiteremoto: bool,
}

/// Capacity of a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatoSettore {
    pub capienza: i64,
    /// Residue available for online sale
    pub residui: i64,
    /// Whether the sector has a capacity limit
    #[serde(default)]
    pub limitecapienza: bool,
    /// Whether the sector has a capacity limit for online sales
    #[serde(default)]
    pub limiteremoto: bool,
    /// Per-slot capacity, only for slot-managed events
    #[serde(default)]
    pub slots: Option<BTreeMap<i64, StatoSlot>>,
}

impl StatoSettore {
    /// Whether `qta` more entries fit in the online residue.
    ///
    /// Sectors without any limit always fit.
    pub fn has_residue(&self, qta: i64) -> bool {
        if !self.limitecapienza && !self.limiteremoto {
            return true;
        }
        self.residui >= qta
    }
}

/// Response value of `GET remote/statoevento`.
///
/// ```json
/// {"idevento":5,"mappa":1,"posti":{"1":1,"11":0},
///  "settori":{"1":{"capienza":100,"residui":99,"limitecapienza":true}}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatoEvento {
    pub idevento: i64,
    /// Seat map id for numbered events
    #[serde(default)]
    pub mappa: Option<i64>,
    /// Event state code
    #[serde(default)]
    pub stato: Option<i32>,
    /// Seat id → state
    #[serde(default)]
    pub posti: BTreeMap<i64, StatoPosto>,
    /// Sector id → capacity
    #[serde(default)]
    pub settori: BTreeMap<i64, StatoSettore>,
}

impl StatoEvento {
    /// Seat ids currently free.
    pub fn posti_liberi(&self) -> impl Iterator<Item = i64> + '_ {
        self.posti
            .iter()
            .filter(|(_, stato)| stato.is_free())
            .map(|(id, _)| *id)
    }

    pub fn settore(&self, id: i64) -> Option<&StatoSettore> {
        self.settori.get(&id)
    }
}

/// Response value of `GET remote/statotipoabbonamento`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatoTipoAbbonamento {
    #[serde(default)]
    pub idtipoabbonamento: Option<i64>,
    #[serde(default)]
    pub mappa: Option<i64>,
    /// Seat id → state
    #[serde(default)]
    pub posti: BTreeMap<i64, StatoPostoAbbonamento>,
}
