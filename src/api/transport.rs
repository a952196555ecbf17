//! HTTP transport for the Cinebot remote API.
//!
//! Builds `{base_url}/remote/{path}` requests with Basic authentication and
//! the client `User-Agent`, sends them, and hands the raw body to the
//! envelope decoder.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::api::config::ClientConfig;
use crate::api::envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::network::{user_agent, REMOTE_PREFIX};

/// Query parameter carrying the remote identifier on GET requests.
const LEGACY_ID_PARAM: &str = "id";
/// Query parameter carrying the passkey on GET requests.
const LEGACY_PASSKEY_PARAM: &str = "passkey";

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded` key/value pairs
    Form(Vec<(String, String)>),
}

/// Low-level HTTP transport: one configured `reqwest::Client` plus credentials.
#[derive(Debug, Clone)]
pub struct Transport {
    config: ClientConfig,
    http_client: Client,
}

impl Transport {
    /// Build the transport for a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let defaults = config.timeouts(None);

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&authorization_header(
            config.remote_id(),
            config.passkey(),
        ))
        .map_err(|e| ApiError::Configuration(format!("Invalid credentials: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent())
                .map_err(|e| ApiError::Configuration(format!("Invalid user agent: {}", e)))?,
        );

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(defaults.total)
            .connect_timeout(defaults.connect)
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of a remote endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url(),
            REMOTE_PREFIX,
            path.trim_start_matches('/')
        )
    }

    /// Query parameters of a GET request, with the legacy credential pair appended.
    // Removable once every server deployment reads the Authorization header only.
    pub fn get_query(&self, params: &[(&str, String)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .chain([
                (LEGACY_ID_PARAM.to_string(), self.config.remote_id().to_string()),
                (LEGACY_PASSKEY_PARAM.to_string(), self.config.passkey().to_string()),
            ])
            .collect()
    }

    /// Execute a GET request and decode the envelope.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        let url = self.endpoint_url(path);
        let query = self.get_query(params);
        let shown_url = self.redacted_url(&url, &query);

        if self.config.log_traffic() {
            tracing::debug!(method = "GET", url = %shown_url, "GET >>");
        }

        let request = self
            .http_client
            .request(Method::GET, &url)
            .query(&query);
        let body = self.send(request, timeout, &shown_url).await?;
        self.decode("GET", &body)
    }

    /// Execute a POST request with a JSON body and decode the envelope.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Protocol(format!("Failed to encode request body: {}", e)))?;
        self.post_body(path, PostBody::Json(json), timeout).await
    }

    /// Execute a POST request with an explicit body encoding.
    pub async fn post_body(
        &self,
        path: &str,
        body: PostBody,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        let url = self.endpoint_url(path);
        let mut request = self.http_client.request(Method::POST, &url);

        match &body {
            PostBody::Json(json) => {
                let encoded = json.to_string();
                if self.config.log_traffic() {
                    tracing::debug!(method = "POST", url = %url, body = %encoded, "POST >>");
                }
                request = request
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(encoded);
            }
            PostBody::Form(fields) => {
                if self.config.log_traffic() {
                    tracing::debug!(method = "POST", url = %url, fields = fields.len(), "POST >>");
                }
                request = request.form(fields);
            }
        }

        let body = self.send(request, timeout, &url).await?;
        self.decode("POST", &body)
    }

    /// Send a request and read its body.
    ///
    /// reqwest errors embed the request URL, which on GET carries the passkey;
    /// it is stripped and `shown_url` (already redacted) reported instead.
    async fn send(
        &self,
        request: RequestBuilder,
        timeout: Option<Duration>,
        shown_url: &str,
    ) -> ApiResult<String> {
        // The override's connect part rides on the request timeout.
        let request = match timeout {
            Some(_) => request.timeout(self.config.timeouts(timeout).total),
            None => request,
        };

        let result = match request.send().await {
            Ok(response) => response.text().await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            let e = e.without_url();
            if self.config.log_traffic() {
                tracing::error!(error = %e, url = %shown_url, "Cinebot call failed");
            }
            ApiError::Connection(format!("{} ({})", e, shown_url))
        })
    }

    fn decode(&self, method: &str, body: &str) -> ApiResult<Value> {
        if self.config.log_traffic() {
            tracing::debug!(method, body, "{} <<", method);
        }

        envelope::decode(body).map_err(|e| {
            if self.config.log_traffic() {
                tracing::error!(error = %e, "Cinebot response error");
            }
            e
        })
    }

    fn redacted_url(&self, url: &str, query: &[(String, String)]) -> String {
        let rendered: Vec<String> = query
            .iter()
            .map(|(k, v)| {
                if k == LEGACY_PASSKEY_PARAM {
                    format!("{}=***", k)
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect();
        format!("{}?{}", url, rendered.join("&"))
    }
}

/// `Authorization` header value: `Basic base64(id:passkey)`.
pub fn authorization_header(remote_id: &str, passkey: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", remote_id, passkey)))
}
