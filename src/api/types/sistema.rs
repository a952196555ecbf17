//! System status and generic outcome types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response value of `GET remote/ping`.
///
/// ```json
/// {"codicesistema":"00012345","utente":"test@cinebot.it","password":null,"ready":true,
///  "versione":"2.1.0 1 1111","stepprog":0,"stepabb":0,"stepupdate":0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Fiscal system code
    pub codicesistema: String,
    /// Active system user
    #[serde(default)]
    pub utente: Option<String>,
    /// Whether the system is ready to issue tickets
    pub ready: bool,
    /// Space-separated fiscal version, database version and build
    #[serde(default)]
    pub versione: String,
    /// Programming revision counter
    #[serde(default)]
    pub stepprog: i64,
    /// Subscription revision counter
    #[serde(default)]
    pub stepabb: i64,
    /// System update revision counter
    #[serde(default)]
    pub stepupdate: i64,
}

/// Components of [`SystemStatus::versione`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    pub fiscale: String,
    pub database: Option<String>,
    pub build: Option<String>,
}

impl SystemStatus {
    /// Split `versione` into fiscal version, database version and build.
    pub fn version_parts(&self) -> VersionParts {
        let mut parts = self.versione.split_whitespace().map(str::to_string);
        VersionParts {
            fiscale: parts.next().unwrap_or_default(),
            database: parts.next(),
            build: parts.next(),
        }
    }
}

/// Outcome of a check or acknowledgement whose value is a flag or a detail object.
///
/// Used by SSO verification, subscription residue checks and lease
/// renew/release acknowledgements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Esito {
    /// Plain boolean answer
    Flag(bool),
    /// Any other value (detail object, residue count, null ack)
    Dettaglio(Value),
}

impl Esito {
    /// Whether the outcome reads as positive.
    ///
    /// A flag is taken as-is. Details are positive unless null, zero, an
    /// empty string or an empty array.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Dettaglio(Value::Null) => false,
            Self::Dettaglio(Value::Bool(b)) => *b,
            Self::Dettaglio(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
            Self::Dettaglio(Value::String(s)) => !s.is_empty() && s != "0",
            Self::Dettaglio(Value::Array(items)) => !items.is_empty(),
            Self::Dettaglio(Value::Object(_)) => true,
        }
    }

    /// The detail value, if the server sent more than a flag.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Flag(_) => None,
            Self::Dettaglio(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_status_deserialize() {
        let json = r#"{"codicesistema":"00012345","utente":"test@cinebot.it","password":null,
            "ready":true,"versione":"2.1.0 1 1111","stepprog":3,"stepabb":1,"stepupdate":0}"#;
        let status: SystemStatus = serde_json::from_str(json).unwrap();

        assert!(status.ready);
        assert_eq!(status.codicesistema, "00012345");
        assert_eq!(status.stepprog, 3);
        assert_eq!(
            status.version_parts(),
            VersionParts {
                fiscale: "2.1.0".to_string(),
                database: Some("1".to_string()),
                build: Some("1111".to_string()),
            }
        );
    }

    #[test]
    fn test_esito_flag_and_details() {
        let flag: Esito = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag, Esito::Flag(true));
        assert!(flag.is_positive());
        assert!(flag.details().is_none());

        let residue: Esito = serde_json::from_value(json!({"residuo": 4})).unwrap();
        assert!(residue.is_positive());
        assert_eq!(residue.details().unwrap()["residuo"], 4);

        let zero: Esito = serde_json::from_value(json!(0)).unwrap();
        assert!(!zero.is_positive());

        let null: Esito = serde_json::from_value(Value::Null).unwrap();
        assert!(!null.is_positive());
    }
}
