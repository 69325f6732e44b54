//! Persistence layer for the list snapshot.
//!
//! # Responsibility
//! - Define the local key-value storage contract the store writes through.
//! - Encode and decode the full item sequence as one snapshot blob.
//!
//! # Invariants
//! - A slot holds exactly one snapshot; writes overwrite it whole.
//! - Decoding never yields items that violate `TodoItem::validate()` or
//!   duplicate ids.

pub mod item_codec;
pub mod kv_repo;
