//! Customer profile sent with bookings and pre-issuances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::serde_util::timestamp_ms_opt;

/// Customer profile ("anagrafica").
///
/// Surname, first name and email are required; everything else is optional.
/// The client never stores it: build one per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anagrafica {
    /// Surname
    pub cognome: String,
    /// First name
    pub nome: String,
    pub email: String,
    pub telefono: Option<String>,
    /// Street address
    pub indirizzo: Option<String>,
    /// Postal code
    pub cap: Option<String>,
    pub citta: Option<String>,
    /// Birthplace
    pub luogonascita: Option<String>,
    /// Birth date, as entered by the customer
    pub datanascita: Option<String>,
    pub note: Option<String>,
    /// When the customer registered on the selling front-end
    #[serde(default, with = "timestamp_ms_opt")]
    pub registrazione: Option<DateTime<Utc>>,
    /// IP address the customer registered from
    pub ipregistrazione: Option<String>,
    /// Reference to the front-end authentication (account id, provider token)
    pub autenticazione: Option<String>,
    /// Marketing consent
    #[serde(default)]
    pub marketing: bool,
    pub riferi1: Option<String>,
    pub riferi2: Option<String>,
    pub riferi3: Option<String>,
}

impl Anagrafica {
    /// Create a profile with the required fields.
    pub fn new(
        cognome: impl Into<String>,
        nome: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            cognome: cognome.into(),
            nome: nome.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_telefono(mut self, telefono: impl Into<String>) -> Self {
        self.telefono = Some(telefono.into());
        self
    }

    /// Set street address, postal code and city.
    pub fn with_indirizzo(
        mut self,
        indirizzo: impl Into<String>,
        cap: impl Into<String>,
        citta: impl Into<String>,
    ) -> Self {
        self.indirizzo = Some(indirizzo.into());
        self.cap = Some(cap.into());
        self.citta = Some(citta.into());
        self
    }

    /// Set birthplace and birth date.
    pub fn with_nascita(mut self, luogo: impl Into<String>, data: impl Into<String>) -> Self {
        self.luogonascita = Some(luogo.into());
        self.datanascita = Some(data.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set registration time and IP.
    pub fn with_registrazione(mut self, at: DateTime<Utc>, ip: impl Into<String>) -> Self {
        self.registrazione = Some(at);
        self.ipregistrazione = Some(ip.into());
        self
    }

    pub fn with_autenticazione(mut self, autenticazione: impl Into<String>) -> Self {
        self.autenticazione = Some(autenticazione.into());
        self
    }

    pub fn with_marketing(mut self, consent: bool) -> Self {
        self.marketing = consent;
        self
    }

    /// Set up to three referral fields; `None` leaves a slot empty.
    pub fn with_riferimenti(
        mut self,
        riferi1: Option<String>,
        riferi2: Option<String>,
        riferi3: Option<String>,
    ) -> Self {
        self.riferi1 = riferi1;
        self.riferi2 = riferi2;
        self.riferi3 = riferi3;
        self
    }
}
