//! To-do item domain model.
//!
//! # Responsibility
//! - Define the single record type shown as one row of the list.
//! - Validate identity and title before an item enters the store.
//!
//! # Invariants
//! - `id` is generated at creation and never changes afterwards.
//! - `title` is never the empty string. Whitespace-only titles are allowed.
//! - Deserialized items pass the same validation as constructed ones.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one to-do item.
pub type ItemId = Uuid;

/// Validation failures for `TodoItem` construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Nil UUID cannot identify an item.
    NilId,
    /// Title is the empty string.
    EmptyTitle,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::EmptyTitle => write!(f, "item title must not be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One entry of the to-do list.
///
/// Wire names follow the stored snapshot format (`id`, `title`, `isCompleted`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoItemRecord")]
pub struct TodoItem {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl TodoItem {
    /// Creates an open item with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Result<Self, ItemValidationError> {
        Self::with_id(Uuid::new_v4(), title, false)
    }

    /// Creates an item with a caller-provided id.
    ///
    /// Used by seed and import paths where identity already exists.
    pub fn with_id(
        id: ItemId,
        title: impl Into<String>,
        is_completed: bool,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            title: title.into(),
            is_completed,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the item invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        // Only the literal empty string is rejected.
        if self.title.is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

#[derive(Deserialize)]
struct TodoItemRecord {
    id: ItemId,
    title: String,
    #[serde(rename = "isCompleted")]
    is_completed: bool,
}

impl TryFrom<TodoItemRecord> for TodoItem {
    type Error = ItemValidationError;

    fn try_from(record: TodoItemRecord) -> Result<Self, Self::Error> {
        Self::with_id(record.id, record.title, record.is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemValidationError, TodoItem};

    #[test]
    fn whitespace_title_is_accepted() {
        let item = TodoItem::new("   ").expect("whitespace-only title is valid");
        assert_eq!(item.title, "   ");
    }

    #[test]
    fn empty_title_is_rejected() {
        assert_eq!(
            TodoItem::new("").unwrap_err(),
            ItemValidationError::EmptyTitle
        );
    }

    #[test]
    fn toggle_flips_completion() {
        let mut item = TodoItem::new("water plants").unwrap();
        item.toggle();
        assert!(item.is_completed);
        item.toggle();
        assert!(!item.is_completed);
    }
}
