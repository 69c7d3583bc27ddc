//! Storage seams for items and review history.
//!
//! The engine never holds ambient state: callers hand it a repository and
//! own persistence. [`InMemoryRepository`] backs tests and short-lived tools.

use std::collections::HashMap;

use crate::error::{EngineError, Result, ValidationError};
use crate::types::{ReviewEvent, ReviewItem};

/// Item storage.
pub trait ItemRepository {
    fn get_item(&self, item_id: &str) -> Result<Option<ReviewItem>>;

    /// All items in a stable order.
    fn list_items(&self) -> Result<Vec<ReviewItem>>;

    fn upsert_item(&mut self, item: ReviewItem) -> Result<()>;
}

/// Append-only review history storage.
pub trait HistoryRepository {
    /// Events for one item in chronological order; empty if none.
    fn get_history(&self, item_id: &str) -> Result<Vec<ReviewEvent>>;

    /// Append an event. Rejects events dated before the item's latest one.
    fn append_event(&mut self, event: ReviewEvent) -> Result<()>;

    /// Every item's history, keyed by item id.
    fn all_history(&self) -> Result<HashMap<String, Vec<ReviewEvent>>>;
}

/// Reject `event` if it predates the last event in `history`.
pub fn ensure_chronological(history: &[ReviewEvent], event: &ReviewEvent) -> Result<()> {
    match history.last() {
        Some(last) if event.date < last.date => Err(EngineError::Validation(
            ValidationError::OutOfOrderEvent {
                item_id: event.item_id.clone(),
                date: event.date,
                last: last.date,
            },
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    items: Vec<ReviewItem>,
    history: HashMap<String, Vec<ReviewEvent>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(items: Vec<ReviewItem>, history: HashMap<String, Vec<ReviewEvent>>) -> Self {
        Self { items, history }
    }
}

impl ItemRepository for InMemoryRepository {
    fn get_item(&self, item_id: &str) -> Result<Option<ReviewItem>> {
        Ok(self.items.iter().find(|item| item.id == item_id).cloned())
    }

    fn list_items(&self) -> Result<Vec<ReviewItem>> {
        Ok(self.items.clone())
    }

    fn upsert_item(&mut self, item: ReviewItem) -> Result<()> {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        Ok(())
    }
}

impl HistoryRepository for InMemoryRepository {
    fn get_history(&self, item_id: &str) -> Result<Vec<ReviewEvent>> {
        Ok(self.history.get(item_id).cloned().unwrap_or_default())
    }

    fn append_event(&mut self, event: ReviewEvent) -> Result<()> {
        let history = self.history.entry(event.item_id.clone()).or_default();
        ensure_chronological(history, &event)?;
        history.push(event);
        Ok(())
    }

    fn all_history(&self) -> Result<HashMap<String, Vec<ReviewEvent>>> {
        Ok(self.history.clone())
    }
}
