//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the item record owned by the list store.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Ids are never reused after an item is deleted.

pub mod item;
