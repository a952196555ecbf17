//! Programming catalog types (`GET remote/programmazione`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::serde_util::{timestamp_ms, timestamp_ms_opt};

/// Publication state of an event or subscription type.
///
/// Informational only: codes this client does not know are kept in
/// [`StatoPubblicazione::Altro`] so the rest of the catalog still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum StatoPubblicazione {
    /// Visible, not yet on sale
    Pubblicato,
    /// Open for bookings
    Prenotabile,
    /// Open for sale
    Vendibile,
    /// Any other server code
    Altro(i32),
}

impl StatoPubblicazione {
    pub fn code(self) -> i32 {
        self.into()
    }

    /// Whether tickets can be booked or sold.
    pub fn is_on_sale(self) -> bool {
        matches!(self, Self::Prenotabile | Self::Vendibile)
    }
}

impl From<i32> for StatoPubblicazione {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Pubblicato,
            2 => Self::Prenotabile,
            3 => Self::Vendibile,
            other => Self::Altro(other),
        }
    }
}

impl From<StatoPubblicazione> for i32 {
    fn from(stato: StatoPubblicazione) -> Self {
        match stato {
            StatoPubblicazione::Pubblicato => 1,
            StatoPubblicazione::Prenotabile => 2,
            StatoPubblicazione::Vendibile => 3,
            StatoPubblicazione::Altro(code) => code,
        }
    }
}

/// Price kind: full, reduced or complimentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoPrezzo {
    /// Intero
    #[serde(rename = "I")]
    Intero,
    /// Ridotto
    #[serde(rename = "R")]
    Ridotto,
    /// Omaggio
    #[serde(rename = "O")]
    Omaggio,
}

/// A price tier of a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prezzo {
    pub id: i64,
    /// Description
    pub prezzo: String,
    pub tipo: TipoPrezzo,
    /// Gross amount, presale included
    pub importo: Decimal,
    /// Presale share of `importo`
    #[serde(default)]
    pub prevendita: Option<Decimal>,
    /// VAT rate (0.1 = 10%)
    #[serde(default)]
    pub iva: Option<Decimal>,
}

/// A sector of an event with its price tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settore {
    pub id: i64,
    /// Sector name; older servers send it as `settore`
    #[serde(alias = "settore")]
    pub nome: String,
    #[serde(default)]
    pub prezzi: Vec<Prezzo>,
}

/// A scheduled event (show) of a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evento {
    pub id: i64,
    /// Start time
    #[serde(with = "timestamp_ms")]
    pub inizio: DateTime<Utc>,
    /// Venue id
    #[serde(default)]
    pub localeid: Option<i64>,
    /// Venue name
    #[serde(default)]
    pub locale: Option<String>,
    /// Seat map id, for numbered seating
    #[serde(default)]
    pub mappa: Option<i64>,
    /// 1 when access is managed by time slots
    #[serde(default)]
    pub slot: Option<i32>,
    #[serde(default)]
    pub stato: Option<StatoPubblicazione>,
    #[serde(default)]
    pub settori: Vec<Settore>,
}

impl Evento {
    /// Whether access to the event is managed by slots.
    pub fn is_slot(&self) -> bool {
        self.slot == Some(1)
    }

    /// Whether the event uses numbered seating.
    pub fn is_numbered(&self) -> bool {
        self.mappa.is_some()
    }
}

/// A title (film, show) with its events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Titolo {
    pub id: i64,
    pub titolo: String,
    #[serde(default)]
    pub autore: Option<String>,
    /// Performer
    #[serde(default)]
    pub esecutore: Option<String>,
    #[serde(default)]
    pub distributore: Option<String>,
    /// Duration in minutes
    #[serde(default)]
    pub durata: Option<i64>,
    /// Description or plot
    #[serde(default)]
    pub descrizione: Option<String>,
    /// Base64-encoded JPEG poster
    #[serde(default)]
    pub locandina: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub eventi: Vec<Evento>,
}

/// A subscription type on sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipoAbbonamento {
    pub id: i64,
    pub nome: String,
    /// Alphanumeric code
    pub codice: String,
    #[serde(default)]
    pub descrizione: Option<String>,
    /// Absolute expiry; `None` means relative expiry
    #[serde(default, with = "timestamp_ms_opt")]
    pub scadenza: Option<DateTime<Utc>>,
    /// Relative expiry amount
    #[serde(default)]
    pub scadenzarelval: Option<i64>,
    /// Relative expiry unit
    #[serde(default)]
    pub scadenzarelunt: Option<String>,
    /// Number of entries
    #[serde(default)]
    pub entrate: Option<i64>,
    /// Gross amount, presale included
    pub importo: Decimal,
    #[serde(default)]
    pub iva: Option<Decimal>,
    #[serde(default)]
    pub prevendita: Option<Decimal>,
    /// Organizer tax code
    #[serde(default)]
    pub organizzatorecf: Option<String>,
    #[serde(default)]
    pub stato: Option<StatoPubblicazione>,
}

/// Full catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programmazione {
    /// Programming revision counter
    pub stepprog: i64,
    #[serde(default)]
    pub titoli: Vec<Titolo>,
    #[serde(default)]
    pub tipiabbonamenti: Vec<TipoAbbonamento>,
}

impl Programmazione {
    /// Iterate every event of every title.
    pub fn eventi(&self) -> impl Iterator<Item = (&Titolo, &Evento)> {
        self.titoli
            .iter()
            .flat_map(|titolo| titolo.eventi.iter().map(move |evento| (titolo, evento)))
    }

    /// Find an event by id.
    pub fn evento(&self, id: i64) -> Option<(&Titolo, &Evento)> {
        self.eventi().find(|(_, evento)| evento.id == id)
    }
}
