//! Token types - the atomic units of formula content

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a token
///
/// Issued from a process-wide counter so two tokens never compare equal
/// by accident, even across stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(u64);

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

impl TokenId {
    fn next() -> Self {
        TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What kind of content a token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Reference to a sensor in the directory
    Sensor,
    /// Operator symbol picked from the `#` menu
    Operator,
    /// Free text committed from the pending buffer
    Text,
}

/// A sensor directory record (external, read-only to this core)
///
/// `path` is a dotted namespace locator, distinct from `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub id: String,
    pub name: String,
    pub path: String,
}

impl SensorRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One atomic unit of formula content
///
/// Tokens are immutable once created: edits replace a token, they never
/// mutate it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    /// Canonical value: sensor id, operator symbol, or raw text
    pub value: String,
    /// Human-readable label shown on the chip
    pub display: String,
    /// Full sensor record (Sensor tokens only)
    pub metadata: Option<SensorRecord>,
}

impl Token {
    /// Create a sensor token from a directory record
    ///
    /// The canonical value is the sensor id; the display label is the
    /// human-readable name.
    pub fn sensor(record: SensorRecord) -> Self {
        Self {
            id: TokenId::next(),
            kind: TokenKind::Sensor,
            value: record.id.clone(),
            display: record.name.clone(),
            metadata: Some(record),
        }
    }

    /// Create an operator token from its symbol
    pub fn operator(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            id: TokenId::next(),
            kind: TokenKind::Operator,
            value: symbol.clone(),
            display: symbol,
            metadata: None,
        }
    }

    /// Create a free-text token
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: TokenId::next(),
            kind: TokenKind::Text,
            value: text.clone(),
            display: text,
            metadata: None,
        }
    }

    /// Render this token the way the serialized formula does
    ///
    /// Sensor tokens always render as `@<id>`, never `@<display name>`.
    pub fn render(&self) -> String {
        match self.kind {
            TokenKind::Sensor => format!("@{}", self.value),
            TokenKind::Operator | TokenKind::Text => self.value.clone(),
        }
    }
}
