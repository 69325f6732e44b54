//! Snapshot codec for the full item sequence.
//!
//! The snapshot is a JSON array of `{ "id", "title", "isCompleted" }` records,
//! matching what earlier versions of the app stored.

use crate::model::item::{ItemId, TodoItem};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum CodecError {
    /// Malformed JSON, wrong shape, or an item failing validation.
    Json(serde_json::Error),
    /// Two records share one id.
    DuplicateId(ItemId),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid item snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate item id in snapshot: {id}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the whole sequence, preserving order.
pub fn encode_items(items: &[TodoItem]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(items)?)
}

/// Parses a snapshot blob back into an ordered sequence.
pub fn decode_items(bytes: &[u8]) -> Result<Vec<TodoItem>, CodecError> {
    let items: Vec<TodoItem> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(CodecError::DuplicateId(item.id));
        }
    }
    Ok(items)
}
