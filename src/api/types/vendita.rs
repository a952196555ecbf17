//! Request payloads for subscription checks, bookings, holds and the
//! two-phase issuance protocol.
//!
//! Two-phase issuance runs on the server:
//!
//! ```text
//! preemissione ──► PREEMESSO ──rinnovapreemissione──► PREEMESSO (timer reset)
//!                      │
//!                      ├──emissione──────────► EMESSO   (issued)
//!                      ├──liberaPreemissione─► LIBERATO (released)
//!                      └──5 min, no renewal──► expired  (server side, no call)
//! ```
//!
//! The client keeps no lease state; callers track elapsed time and renew.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::api::types::{Abbonamento, Anagrafica, Ingresso};
use crate::shared::serde_util::{timestamp_ms, timestamp_ms_opt};
use crate::shared::{IdList, OneOrMany};

/// Request for `POST remote/verificaAbbonato`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificaAbbonatoRequest {
    /// Subscription type code
    pub codiceabbonamento: String,
    /// Subscription sequence number
    pub progressivoabbonamento: i64,
    /// Entries to check, default 1
    pub qta: u32,
}

impl VerificaAbbonatoRequest {
    pub fn new(codiceabbonamento: impl Into<String>, progressivoabbonamento: i64) -> Self {
        Self {
            codiceabbonamento: codiceabbonamento.into(),
            progressivoabbonamento,
            qta: 1,
        }
    }

    pub fn with_qta(mut self, qta: u32) -> Self {
        self.qta = qta;
        self
    }
}

/// Request for a booking (`POST remote/prenotazione` with a customer profile).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrenotazioneRequest {
    pub evento: i64,
    /// Slot id, `None` for events not managed by slots
    pub slot: Option<i64>,
    pub anagrafica: Option<Anagrafica>,
    pub ingressi: OneOrMany<Ingresso>,
}

impl PrenotazioneRequest {
    pub fn new(evento: i64, ingressi: impl Into<OneOrMany<Ingresso>>) -> Self {
        Self {
            evento,
            slot: None,
            anagrafica: None,
            ingressi: ingressi.into(),
        }
    }

    pub fn with_slot(mut self, slot: i64) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_anagrafica(mut self, anagrafica: Anagrafica) -> Self {
        self.anagrafica = Some(anagrafica);
        self
    }
}

/// Request for a hold (`POST remote/prenotazione` without a customer profile).
///
/// The server tells a hold from a booking by the missing `anagrafica` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloccoRequest {
    pub evento: i64,
    pub slot: Option<i64>,
    /// Entries to hold; prices may be omitted
    pub ingressi: OneOrMany<Ingresso>,
}

impl BloccoRequest {
    pub fn new(evento: i64, ingressi: impl Into<OneOrMany<Ingresso>>) -> Self {
        Self {
            evento,
            slot: None,
            ingressi: ingressi.into(),
        }
    }

    pub fn with_slot(mut self, slot: i64) -> Self {
        self.slot = Some(slot);
        self
    }
}

/// Request for `POST remote/preemissione`.
///
/// Pre-issued items expire after five minutes unless renewed with
/// `rinnova_preemissione`. Using this endpoint requires the integration to
/// be certified by the system owner.
#[derive(Debug, Clone, PartialEq)]
pub struct PreemissioneRequest {
    /// Event id; required when `ingressi` is not empty
    pub evento: Option<i64>,
    pub slot: Option<i64>,
    pub anagrafica: Anagrafica,
    pub ingressi: OneOrMany<Ingresso>,
    pub abbonamenti: OneOrMany<Abbonamento>,
    /// Payment type code
    pub tipopagamento: i32,
    /// Buyer IP of the transaction
    pub iptransazione: String,
    /// Front-end transaction reference
    pub transazione: String,
    /// Checkout time
    pub datacheckout: DateTime<Utc>,
}

impl PreemissioneRequest {
    /// Pre-issue tickets for an event.
    pub fn new(
        evento: i64,
        anagrafica: Anagrafica,
        ingressi: impl Into<OneOrMany<Ingresso>>,
        tipopagamento: i32,
        iptransazione: impl Into<String>,
        transazione: impl Into<String>,
        datacheckout: DateTime<Utc>,
    ) -> Self {
        Self {
            evento: Some(evento),
            slot: None,
            anagrafica,
            ingressi: ingressi.into(),
            abbonamenti: OneOrMany::empty(),
            tipopagamento,
            iptransazione: iptransazione.into(),
            transazione: transazione.into(),
            datacheckout,
        }
    }

    /// Pre-issue subscriptions only, with no event.
    pub fn abbonamenti(
        anagrafica: Anagrafica,
        abbonamenti: impl Into<OneOrMany<Abbonamento>>,
        tipopagamento: i32,
        iptransazione: impl Into<String>,
        transazione: impl Into<String>,
        datacheckout: DateTime<Utc>,
    ) -> Self {
        Self {
            evento: None,
            slot: None,
            anagrafica,
            ingressi: OneOrMany::empty(),
            abbonamenti: abbonamenti.into(),
            tipopagamento,
            iptransazione: iptransazione.into(),
            transazione: transazione.into(),
            datacheckout,
        }
    }

    pub fn with_slot(mut self, slot: i64) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Add subscriptions to sell together with the tickets.
    pub fn with_abbonamenti(mut self, abbonamenti: impl Into<OneOrMany<Abbonamento>>) -> Self {
        self.abbonamenti = abbonamenti.into();
        self
    }
}

/// Wire shape of a pre-issuance: the request plus the customer's contact and
/// registration fields repeated at top level.
#[derive(Serialize)]
struct PreemissionePayload<'a> {
    evento: Option<i64>,
    slot: Option<i64>,
    anagrafica: &'a Anagrafica,
    ingressi: &'a OneOrMany<Ingresso>,
    abbonamenti: &'a OneOrMany<Abbonamento>,
    tipopagamento: i32,
    iptransazione: &'a str,
    transazione: &'a str,
    #[serde(with = "timestamp_ms")]
    datacheckout: DateTime<Utc>,
    email: &'a str,
    telefono: Option<&'a str>,
    autenticazione: Option<&'a str>,
    #[serde(with = "timestamp_ms_opt")]
    registrazione: Option<DateTime<Utc>>,
    ipregistrazione: Option<&'a str>,
}

impl Serialize for PreemissioneRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PreemissionePayload {
            evento: self.evento,
            slot: self.slot,
            anagrafica: &self.anagrafica,
            ingressi: &self.ingressi,
            abbonamenti: &self.abbonamenti,
            tipopagamento: self.tipopagamento,
            iptransazione: &self.iptransazione,
            transazione: &self.transazione,
            datacheckout: self.datacheckout,
            email: &self.anagrafica.email,
            telefono: self.anagrafica.telefono.as_deref(),
            autenticazione: self.anagrafica.autenticazione.as_deref(),
            registrazione: self.anagrafica.registrazione,
            ipregistrazione: self.anagrafica.ipregistrazione.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Pre-issued entry and subscription ids, as sent to
/// `rinnovapreemissione` and `liberaPreemissione`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreemissioneIds {
    pub ingressi: IdList,
    pub abbonamenti: IdList,
}

impl PreemissioneIds {
    pub fn new(ingressi: impl Into<IdList>, abbonamenti: impl Into<IdList>) -> Self {
        Self {
            ingressi: ingressi.into(),
            abbonamenti: abbonamenti.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingressi.is_empty() && self.abbonamenti.is_empty()
    }
}

/// Request for `POST remote/emissione`: confirm pre-issued items as paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissioneRequest {
    pub ingressi: IdList,
    pub abbonamenti: IdList,
    /// Payment method
    pub pagamento: String,
    /// Payment time
    #[serde(with = "timestamp_ms")]
    pub datapagamento: DateTime<Utc>,
}

impl EmissioneRequest {
    pub fn new(
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
        pagamento: impl Into<String>,
        datapagamento: DateTime<Utc>,
    ) -> Self {
        Self {
            ingressi: ingressi.into(),
            abbonamenti: abbonamenti.into(),
            pagamento: pagamento.into(),
            datapagamento,
        }
    }
}
