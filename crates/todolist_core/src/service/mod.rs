//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory list and route every mutation through persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod todo_store;
