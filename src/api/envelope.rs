//! Response envelope decoding.
//!
//! Every Cinebot response has the same shape:
//!
//! ```json
//! {"success": true, "value": ..., "error": null, "exception": null}
//! ```
//!
//! [`decode`] unwraps it into the `value` payload or a classified [`ApiError`].
//! The HTTP status code plays no part: the envelope alone decides.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::network::LOGICAL_EXCEPTION;

/// The server's response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome flag; any truthy JSON value counts as success
    #[serde(deserialize_with = "truthy")]
    pub success: bool,
    /// Operation-specific payload, present on success
    #[serde(default)]
    pub value: Value,
    /// Human-readable failure message; non-string values are kept in JSON form
    #[serde(default, deserialize_with = "lenient_message")]
    pub error: Option<String>,
    /// Server exception class, used only to tell logical failures apart
    #[serde(default)]
    pub exception: Option<String>,
}

impl Envelope {
    /// Parse a raw response body into an envelope.
    ///
    /// Empty bodies, non-JSON bodies, JSON that is not an object, and objects
    /// without a `success` key are all `Protocol` errors.
    pub fn parse(body: &str) -> ApiResult<Self> {
        let parsed: Value = serde_json::from_str(body.trim())
            .map_err(|e| ApiError::Protocol(format!("invalid response: {}", e)))?;

        if !parsed.is_object() {
            return Err(ApiError::Protocol(format!(
                "invalid response: expected an envelope object, got {}",
                json_kind(&parsed)
            )));
        }

        serde_json::from_value(parsed)
            .map_err(|e| ApiError::Protocol(format!("invalid response envelope: {}", e)))
    }

    /// Whether the failure was flagged as a business-rule violation.
    ///
    /// Exact string comparison; an absent discriminator is not logical.
    pub fn is_logical_failure(&self) -> bool {
        !self.success && self.exception.as_deref() == Some(LOGICAL_EXCEPTION)
    }

    /// Turn the envelope into its `value` or the classified failure.
    pub fn into_result(self) -> ApiResult<Value> {
        if self.success {
            return Ok(self.value);
        }

        let logical = self.is_logical_failure();
        let message = self.error.unwrap_or_default();
        if logical {
            Err(ApiError::Logical(message))
        } else {
            Err(ApiError::Remote(message))
        }
    }
}

/// Decode a raw response body into the success `value`, unmodified.
pub fn decode(body: &str) -> ApiResult<Value> {
    Envelope::parse(body)?.into_result()
}

/// Convert a success `value` into the operation's typed result.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Protocol(format!("unexpected value shape: {}", e)))
}

/// Loose truthiness of the `success` flag: `false`, `null`, zero, `""`, `"0"`
/// and `[]` are falsy, everything else is truthy.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    })
}

fn lenient_message<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
