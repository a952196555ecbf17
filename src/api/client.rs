//! Cinebot remote API client implementation.
//!
//! The [`CinebotApiClient`] exposes one method per remote operation. Every
//! call is a single request/response with no retry and no caching: failures
//! surface immediately and the caller decides what to do.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinebot::api::{CinebotApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://1.2.3.4:8443", 2, "secretpasskey")?;
//!     let client = CinebotApiClient::new(config)?;
//!
//!     let programmazione = client.get_programmazione().await?;
//!     println!("{} titles on the programme", programmazione.titoli.len());
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::config::ClientConfig;
use crate::api::envelope::decode_value;
use crate::api::error::ApiResult;
use crate::api::transport::{PostBody, Transport};
use crate::api::types::*;
use crate::shared::{IdList, OneOrMany, PreemissioneId};

/// Cinebot remote API client.
///
/// Holds only immutable configuration and a pooled HTTP client, so one
/// instance can be cloned and shared across concurrent tasks.
#[derive(Debug, Clone)]
pub struct CinebotApiClient {
    transport: Transport,
}

impl CinebotApiClient {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Create a client from `CINEBOT_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.transport.config().base_url()
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> ApiResult<T> {
        let value = self.transport.get(path, params, None).await?;
        self.typed(path, value)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        let value = self.transport.post(path, body, None).await?;
        self.typed(path, value)
    }

    fn typed<T: DeserializeOwned>(&self, path: &str, value: Value) -> ApiResult<T> {
        decode_value(value).map_err(|e| {
            if self.config().log_traffic() {
                tracing::error!(path, error = %e, "Unexpected response value");
            }
            e
        })
    }

    // =========================================================================
    // System endpoints
    // =========================================================================

    /// Get system status: fiscal code, user, readiness, version and revision counters.
    ///
    /// `timeout` overrides the configured timeout for this call only.
    pub async fn ping(&self, timeout: Option<Duration>) -> ApiResult<SystemStatus> {
        let value = self.transport.get("ping", &[], timeout).await?;
        self.typed("ping", value)
    }

    /// Whether the system is up and ready to issue tickets.
    ///
    /// Transport and server failures are returned as errors, not as `false`.
    pub async fn is_ready(&self, timeout: Option<Duration>) -> ApiResult<bool> {
        Ok(self.ping(timeout).await?.ready)
    }

    /// Verify a local user session for single sign-on with the portal.
    ///
    /// # Arguments
    ///
    /// * `userid` - Reference to the local user
    /// * `session` - Reference to the local session
    pub async fn verify_sso(&self, userid: &str, session: &str) -> ApiResult<Esito> {
        self.get(
            "sso",
            &[("userid", userid.to_string()), ("session", session.to_string())],
        )
        .await
    }

    // =========================================================================
    // Catalog endpoints
    // =========================================================================

    /// Get the full programming: titles with events, sectors and prices, plus
    /// subscription types.
    pub async fn get_programmazione(&self) -> ApiResult<Programmazione> {
        self.get("programmazione", &[]).await
    }

    /// Get the seats of a numbered-seating map.
    pub async fn get_mappa(&self, idmappa: i64) -> ApiResult<Vec<Posto>> {
        self.get("mappa", &[("mappa", idmappa.to_string())]).await
    }

    /// Get an event's status: per-seat state for numbered events and per-sector
    /// (and per-slot) capacity.
    pub async fn get_stato_evento(&self, idevento: i64) -> ApiResult<StatoEvento> {
        self.get("statoevento", &[("evento", idevento.to_string())]).await
    }

    /// Get seat occupation for a numbered subscription type.
    pub async fn get_stato_tipoabbonamento(
        &self,
        idtipoabbonamento: i64,
    ) -> ApiResult<StatoTipoAbbonamento> {
        self.get(
            "statotipoabbonamento",
            &[("tipoabbonamento", idtipoabbonamento.to_string())],
        )
        .await
    }

    // =========================================================================
    // Subscription and booking endpoints
    // =========================================================================

    /// Check that a subscription has at least one entry left.
    pub async fn verifica_abbonato(
        &self,
        codiceabbonamento: &str,
        progressivoabbonamento: i64,
    ) -> ApiResult<Esito> {
        self.verifica_abbonato_qta(codiceabbonamento, progressivoabbonamento, 1)
            .await
    }

    /// Check that a subscription has at least `qta` entries left.
    pub async fn verifica_abbonato_qta(
        &self,
        codiceabbonamento: &str,
        progressivoabbonamento: i64,
        qta: u32,
    ) -> ApiResult<Esito> {
        let request = VerificaAbbonatoRequest::new(codiceabbonamento, progressivoabbonamento)
            .with_qta(qta);
        self.post("verificaAbbonato", &request).await
    }

    /// Register a booking.
    ///
    /// # Arguments
    ///
    /// * `evento` - Event id
    /// * `slot` - Slot id, `None` for events not managed by slots
    /// * `anagrafica` - Optional customer profile
    /// * `ingressi` - One entry or a list of entries
    pub async fn prenotazione(
        &self,
        evento: i64,
        slot: Option<i64>,
        anagrafica: Option<Anagrafica>,
        ingressi: impl Into<OneOrMany<Ingresso>>,
    ) -> ApiResult<Value> {
        let request = PrenotazioneRequest {
            evento,
            slot,
            anagrafica,
            ingressi: ingressi.into(),
        };
        self.post("prenotazione", &request).await
    }

    /// Register a hold: a booking without customer profile, prices optional.
    pub async fn blocco(
        &self,
        evento: i64,
        slot: Option<i64>,
        ingressi: impl Into<OneOrMany<Ingresso>>,
    ) -> ApiResult<Value> {
        let request = BloccoRequest {
            evento,
            slot,
            ingressi: ingressi.into(),
        };
        self.post("prenotazione", &request).await
    }

    // =========================================================================
    // Two-phase issuance endpoints
    // =========================================================================

    /// Pre-issue tickets and/or subscriptions. Returns the pre-issued ids.
    ///
    /// The items expire on the server five minutes after this call unless
    /// renewed with [`rinnova_preemissione`](Self::rinnova_preemissione).
    /// Requires a certified integration.
    pub async fn preemissione(
        &self,
        request: &PreemissioneRequest,
    ) -> ApiResult<Vec<PreemissioneId>> {
        self.post("preemissione", request).await
    }

    /// Renew pre-issued items, restarting their expiry window.
    pub async fn rinnova_preemissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
    ) -> ApiResult<Esito> {
        let ids = PreemissioneIds::new(ingressi, abbonamenti);
        self.post("rinnovapreemissione", &ids).await
    }

    /// Confirm pre-issued items, issuing the tickets and subscriptions.
    ///
    /// # Arguments
    ///
    /// * `ingressi` - Pre-issued entry ids to confirm
    /// * `abbonamenti` - Pre-issued subscription ids to confirm
    /// * `pagamento` - Payment method
    /// * `datapagamento` - Payment time
    pub async fn emissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
        pagamento: &str,
        datapagamento: DateTime<Utc>,
    ) -> ApiResult<Value> {
        let request = EmissioneRequest::new(ingressi, abbonamenti, pagamento, datapagamento);
        self.post("emissione", &request).await
    }

    /// Cancel pre-issued items, returning seats and entitlements to the pool.
    pub async fn libera_preemissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
    ) -> ApiResult<Esito> {
        let ids = PreemissioneIds::new(ingressi, abbonamenti);
        self.post("liberaPreemissione", &ids).await
    }

    // =========================================================================
    // Raw endpoints
    // =========================================================================

    /// GET an arbitrary remote path and return the decoded envelope value.
    pub async fn get_raw(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.transport.get(path, params, timeout).await
    }

    /// POST a JSON body to an arbitrary remote path.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.transport.post(path, body, timeout).await
    }

    /// POST form fields (no JSON encoding) to an arbitrary remote path.
    pub async fn post_form(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.transport
            .post_body(path, PostBody::Form(fields), timeout)
            .await
    }
}
