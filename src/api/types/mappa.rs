//! Seat map types.

use serde::{Deserialize, Serialize};

/// A seat of a numbered-seating map (`GET remote/mappa`).
///
/// ```json
/// {"id":1,"nome":"A1","settore":1,"sottosettore":"1","x":167,"y":80,"classe":0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posto {
    /// Seat id
    pub id: i64,
    /// Seat label
    pub nome: String,
    /// Sector the seat belongs to
    pub settore: i64,
    /// Sub-sector description
    #[serde(default)]
    pub sottosettore: Option<String>,
    pub x: i64,
    pub y: i64,
    /// Seat class, 0 by default
    #[serde(default)]
    pub classe: i32,
}
