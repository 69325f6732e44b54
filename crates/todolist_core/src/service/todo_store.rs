//! List store: sole owner and mutation path of the to-do sequence.
//!
//! # Responsibility
//! - Load the sequence from the configured slot, or fall back to the seed.
//! - Apply add/toggle/delete/move intents from the presentation layer.
//! - Persist the whole sequence and notify listeners after every change.
//!
//! # Invariants
//! - Item ids are unique within the sequence at all times.
//! - New items are inserted at position 0.
//! - Each effective mutation causes exactly one snapshot write attempt,
//!   issued before listeners are notified.
//! - Invalid arguments are silent no-ops: no write, no notification.
//! - Persistence failures are logged and recorded, never returned.

use crate::model::item::{ItemId, TodoItem};
use crate::repo::item_codec::{decode_items, encode_items, CodecError};
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Slot name used by earlier versions of the app.
pub const TODOS_DATA_KEY: &str = "todosDataKey";

const SEED_TITLES: [(&str, bool); 2] = [("Learn MVVM pattern", false), ("Refactor code", true)];

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the slot holding the snapshot.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: TODOS_DATA_KEY.to_string(),
        }
    }
}

/// Where the sequence came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the stored snapshot.
    Persisted,
    /// Snapshot missing or unreadable; seed sample used.
    Seed,
}

/// Failure while reading or writing a snapshot.
#[derive(Debug)]
pub enum PersistError {
    Codec(CodecError),
    Storage(KvError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<CodecError> for PersistError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<KvError> for PersistError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of the most recent snapshot write.
#[derive(Debug)]
pub enum PersistStatus {
    NotAttempted,
    Saved,
    Failed(PersistError),
}

/// Handle returned by `TodoStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&[TodoItem])>;

/// Owner of the ordered item sequence.
pub struct TodoStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    items: Vec<TodoItem>,
    load_source: LoadSource,
    last_persist: PersistStatus,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Loads the store from the default `todosDataKey` slot.
    pub fn load(storage: S) -> Self {
        Self::load_with_config(storage, &StoreConfig::default())
    }

    /// Loads the store from the configured slot.
    ///
    /// # Side effects
    /// - Falls back to `seed_items()` when the slot is missing or unreadable.
    /// - Writes the loaded sequence back once, so a first launch persists
    ///   the seed.
    pub fn load_with_config(storage: S, config: &StoreConfig) -> Self {
        let started_at = Instant::now();
        let (items, load_source) = match read_snapshot(&storage, &config.storage_key) {
            Ok(Some(items)) => (items, LoadSource::Persisted),
            Ok(None) => {
                info!("event=store_load module=store status=fallback reason=missing");
                (seed_items(), LoadSource::Seed)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback reason=unreadable error={}",
                    err
                );
                (seed_items(), LoadSource::Seed)
            }
        };

        let mut store = Self {
            storage,
            storage_key: config.storage_key.clone(),
            items,
            load_source,
            last_persist: PersistStatus::NotAttempted,
            listeners: Vec::new(),
            next_listener_id: 0,
        };
        info!(
            "event=store_load module=store status=ok source={:?} count={} duration_ms={}",
            store.load_source,
            store.items.len(),
            started_at.elapsed().as_millis()
        );
        store.persist("load");
        store
    }

    /// Current sequence, newest first.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn last_persist(&self) -> &PersistStatus {
        &self.last_persist
    }

    /// Backing storage, for inspection by embedders and tests.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds an open item at position 0.
    ///
    /// Returns the new id, or `None` when `title` is the empty string.
    /// Whitespace-only titles are accepted as-is.
    pub fn add(&mut self, title: impl Into<String>) -> Option<ItemId> {
        let item = TodoItem::new(title).ok()?;
        let id = item.id;
        self.items.insert(0, item);
        self.commit("add");
        Some(id)
    }

    /// Flips completion of the item with `id`.
    ///
    /// Returns `false` when no such item exists.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!("event=store_toggle module=store status=skipped reason=not_found");
            return false;
        };
        item.toggle();
        self.commit("toggle");
        true
    }

    /// Removes the items at `positions`, all resolved against the current order.
    ///
    /// Out-of-range positions are ignored. Returns the number removed.
    pub fn delete(&mut self, positions: &BTreeSet<usize>) -> usize {
        let before = self.items.len();
        let mut position = 0;
        self.items.retain(|_| {
            let keep = !positions.contains(&position);
            position += 1;
            keep
        });

        let removed = before - self.items.len();
        if removed == 0 {
            debug!("event=store_delete module=store status=skipped reason=no_valid_positions");
            return 0;
        }
        self.commit("delete");
        removed
    }

    /// Moves the items at `from` so they sit before the item originally at `to`.
    ///
    /// `to` ranges over `0..=len` of the pre-move order and is clamped to
    /// `len`. Moved items keep their relative order. Returns `false` when the
    /// order did not change.
    pub fn move_items(&mut self, from: &BTreeSet<usize>, to: usize) -> bool {
        let len = self.items.len();
        if from.range(..len).next().is_none() {
            return false;
        }
        let to = to.min(len);
        let insert_at = to - from.range(..to).count();

        let original_order: Vec<ItemId> = self.items.iter().map(|item| item.id).collect();
        let (moved, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .enumerate()
            .partition(|(position, _)| from.contains(position));

        let mut reordered: Vec<TodoItem> = kept.into_iter().map(|(_, item)| item).collect();
        let tail = reordered.split_off(insert_at);
        reordered.extend(moved.into_iter().map(|(_, item)| item));
        reordered.extend(tail);
        self.items = reordered;

        let unchanged = self
            .items
            .iter()
            .map(|item| item.id)
            .eq(original_order.iter().copied());
        if unchanged {
            return false;
        }
        self.commit("move");
        true
    }

    /// Registers a listener called with the sequence after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[TodoItem]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, operation: &str) {
        self.persist(operation);
        for (_, listener) in &mut self.listeners {
            listener(&self.items);
        }
    }

    fn persist(&mut self, operation: &str) {
        let started_at = Instant::now();
        let result = encode_items(&self.items)
            .map_err(PersistError::from)
            .and_then(|bytes| {
                self.storage
                    .write(&self.storage_key, &bytes)
                    .map_err(PersistError::from)
            });

        self.last_persist = match result {
            Ok(()) => {
                debug!(
                    "event=store_persist module=store status=ok op={} count={} duration_ms={}",
                    operation,
                    self.items.len(),
                    started_at.elapsed().as_millis()
                );
                PersistStatus::Saved
            }
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=error op={} count={} error={}",
                    operation,
                    self.items.len(),
                    err
                );
                PersistStatus::Failed(err)
            }
        };
    }
}

/// Fixed sample used when no readable snapshot exists.
pub fn seed_items() -> Vec<TodoItem> {
    SEED_TITLES
        .iter()
        .map(|(title, is_completed)| TodoItem {
            id: Uuid::new_v4(),
            title: (*title).to_string(),
            is_completed: *is_completed,
        })
        .collect()
}

fn read_snapshot<S: KeyValueStore>(
    storage: &S,
    key: &str,
) -> Result<Option<Vec<TodoItem>>, PersistError> {
    match storage.read(key)? {
        Some(bytes) => Ok(Some(decode_items(&bytes)?)),
        None => Ok(None),
    }
}
