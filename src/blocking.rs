//! Synchronous facade over [`CinebotApiClient`].
//!
//! For callers without an async runtime. Each call blocks the current thread
//! until the response is decoded. Must not be used from inside an async
//! context: the private runtime panics when nested in another one.
//!
//! ```rust,ignore
//! use cinebot::blocking::BlockingClient;
//! use cinebot::api::ClientConfig;
//!
//! let client = BlockingClient::new(ClientConfig::new("https://1.2.3.4:8443", 2, "key")?)?;
//! let ready = client.is_ready(None)?;
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::api::types::*;
use crate::api::{ApiError, ApiResult, CinebotApiClient, ClientConfig};
use crate::shared::{IdList, OneOrMany, PreemissioneId};

/// Blocking Cinebot client.
#[derive(Debug)]
pub struct BlockingClient {
    inner: CinebotApiClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Create a blocking client for the given configuration.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            inner: CinebotApiClient::new(config)?,
            runtime,
        })
    }

    /// The async client this facade drives.
    pub fn async_client(&self) -> &CinebotApiClient {
        &self.inner
    }

    pub fn ping(&self, timeout: Option<Duration>) -> ApiResult<SystemStatus> {
        self.runtime.block_on(self.inner.ping(timeout))
    }

    pub fn is_ready(&self, timeout: Option<Duration>) -> ApiResult<bool> {
        self.runtime.block_on(self.inner.is_ready(timeout))
    }

    pub fn verify_sso(&self, userid: &str, session: &str) -> ApiResult<Esito> {
        self.runtime.block_on(self.inner.verify_sso(userid, session))
    }

    pub fn get_programmazione(&self) -> ApiResult<Programmazione> {
        self.runtime.block_on(self.inner.get_programmazione())
    }

    pub fn get_mappa(&self, idmappa: i64) -> ApiResult<Vec<Posto>> {
        self.runtime.block_on(self.inner.get_mappa(idmappa))
    }

    pub fn get_stato_evento(&self, idevento: i64) -> ApiResult<StatoEvento> {
        self.runtime.block_on(self.inner.get_stato_evento(idevento))
    }

    pub fn get_stato_tipoabbonamento(&self, idtipoabbonamento: i64) -> ApiResult<StatoTipoAbbonamento> {
        self.runtime
            .block_on(self.inner.get_stato_tipoabbonamento(idtipoabbonamento))
    }

    pub fn verifica_abbonato(
        &self,
        codiceabbonamento: &str,
        progressivoabbonamento: i64,
    ) -> ApiResult<Esito> {
        self.runtime.block_on(
            self.inner
                .verifica_abbonato(codiceabbonamento, progressivoabbonamento),
        )
    }

    pub fn verifica_abbonato_qta(
        &self,
        codiceabbonamento: &str,
        progressivoabbonamento: i64,
        qta: u32,
    ) -> ApiResult<Esito> {
        self.runtime.block_on(self.inner.verifica_abbonato_qta(
            codiceabbonamento,
            progressivoabbonamento,
            qta,
        ))
    }

    pub fn prenotazione(
        &self,
        evento: i64,
        slot: Option<i64>,
        anagrafica: Option<Anagrafica>,
        ingressi: impl Into<OneOrMany<Ingresso>>,
    ) -> ApiResult<Value> {
        self.runtime
            .block_on(self.inner.prenotazione(evento, slot, anagrafica, ingressi))
    }

    pub fn blocco(
        &self,
        evento: i64,
        slot: Option<i64>,
        ingressi: impl Into<OneOrMany<Ingresso>>,
    ) -> ApiResult<Value> {
        self.runtime.block_on(self.inner.blocco(evento, slot, ingressi))
    }

    pub fn preemissione(&self, request: &PreemissioneRequest) -> ApiResult<Vec<PreemissioneId>> {
        self.runtime.block_on(self.inner.preemissione(request))
    }

    pub fn rinnova_preemissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
    ) -> ApiResult<Esito> {
        self.runtime
            .block_on(self.inner.rinnova_preemissione(ingressi, abbonamenti))
    }

    pub fn emissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
        pagamento: &str,
        datapagamento: DateTime<Utc>,
    ) -> ApiResult<Value> {
        self.runtime.block_on(
            self.inner
                .emissione(ingressi, abbonamenti, pagamento, datapagamento),
        )
    }

    pub fn libera_preemissione(
        &self,
        ingressi: impl Into<IdList>,
        abbonamenti: impl Into<IdList>,
    ) -> ApiResult<Esito> {
        self.runtime
            .block_on(self.inner.libera_preemissione(ingressi, abbonamenti))
    }

    pub fn get_raw(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.runtime.block_on(self.inner.get_raw(path, params, timeout))
    }

    pub fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.runtime.block_on(self.inner.post_raw(path, body, timeout))
    }

    pub fn post_form(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        self.runtime.block_on(self.inner.post_form(path, fields, timeout))
    }
}
