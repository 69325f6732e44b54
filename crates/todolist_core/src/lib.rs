//! Core of the to-do list app: item model, list store and local persistence.
//! Presentation layers call into `TodoStore` and re-render on its notifications.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::item::{ItemId, ItemValidationError, TodoItem};
pub use repo::item_codec::{decode_items, encode_items, CodecError};
pub use repo::kv_repo::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use service::todo_store::{
    seed_items, ListenerId, LoadSource, PersistError, PersistStatus, StoreConfig, TodoStore,
    TODOS_DATA_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
