//! JSON file storage for items and review history.
//!
//! Layout under the data directory:
//! - `items.json`: array of item records
//! - `history.json`: object mapping item id to its reviews
//! - `pending-save.json`: present only while a save is being applied
//!
//! Every file is replaced by writing a sibling temp file and renaming it.
//! A save stages the full state in the pending file first; opening a store
//! whose pending file survived a crash finishes applying it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use review_engine::{
    HistoryRepository, InMemoryRepository, ItemRepository, Quality, RawReviewItem, ReviewEvent,
    ReviewItem,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, ToolError};

pub const ITEMS_FILE: &str = "items.json";
pub const HISTORY_FILE: &str = "history.json";
pub const PENDING_FILE: &str = "pending-save.json";

/// Review as written to `history.json`; the item id is the map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredReview {
    date: NaiveDate,
    quality: Quality,
}

/// Complete store state, staged before the data files are replaced.
#[derive(Debug, Serialize, Deserialize)]
struct PendingSave {
    items: Vec<ReviewItem>,
    history: BTreeMap<String, Vec<StoredReview>>,
}

impl PendingSave {
    /// Replace both data files, then drop the pending file.
    fn apply(&self, dir: &Path) -> Result<()> {
        write_json(&dir.join(ITEMS_FILE), &self.items)?;
        write_json(&dir.join(HISTORY_FILE), &self.history)?;
        let pending = dir.join(PENDING_FILE);
        fs::remove_file(&pending).map_err(|source| ToolError::Io {
            path: pending,
            source,
        })
    }
}

/// File-backed repository. Reads everything on open, writes on [`JsonStore::save`].
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    inner: InMemoryRepository,
}

impl JsonStore {
    /// Open the store in `dir`. Missing files are treated as empty.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        let pending: Option<PendingSave> = read_json(&dir.join(PENDING_FILE))?;
        if let Some(pending) = pending {
            tracing::warn!(dir = %dir.display(), "completing interrupted save");
            pending.apply(&dir)?;
        }

        let raw_items: Vec<RawReviewItem> = read_json(&dir.join(ITEMS_FILE))?.unwrap_or_default();
        let items = raw_items
            .into_iter()
            .map(RawReviewItem::validate)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let stored: HashMap<String, Vec<StoredReview>> =
            read_json(&dir.join(HISTORY_FILE))?.unwrap_or_default();
        let history = stored
            .into_iter()
            .map(|(item_id, mut reviews)| {
                reviews.sort_by_key(|review| review.date);
                let events = reviews
                    .into_iter()
                    .map(|review| ReviewEvent {
                        item_id: item_id.clone(),
                        date: review.date,
                        quality: review.quality,
                    })
                    .collect();
                (item_id, events)
            })
            .collect();

        tracing::debug!(dir = %dir.display(), "opened review store");

        Ok(Self {
            dir,
            inner: InMemoryRepository::with_data(items, history),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write items and history back to disk as one commit.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| ToolError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let staged = self.staged()?;
        write_json(&self.dir.join(PENDING_FILE), &staged)?;
        staged.apply(&self.dir)?;

        tracing::debug!(
            dir = %self.dir.display(),
            items = staged.items.len(),
            "saved review store"
        );
        Ok(())
    }

    fn staged(&self) -> Result<PendingSave> {
        let history = self
            .inner
            .all_history()?
            .into_iter()
            .map(|(item_id, events)| {
                let reviews = events
                    .into_iter()
                    .map(|event| StoredReview {
                        date: event.date,
                        quality: event.quality,
                    })
                    .collect();
                (item_id, reviews)
            })
            .collect();
        Ok(PendingSave {
            items: self.inner.list_items()?,
            history,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ToolError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` to a temp file beside `path`, then rename it into place.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_error = |source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}

impl ItemRepository for JsonStore {
    fn get_item(&self, item_id: &str) -> review_engine::Result<Option<ReviewItem>> {
        self.inner.get_item(item_id)
    }

    fn list_items(&self) -> review_engine::Result<Vec<ReviewItem>> {
        self.inner.list_items()
    }

    fn upsert_item(&mut self, item: ReviewItem) -> review_engine::Result<()> {
        self.inner.upsert_item(item)
    }
}

impl HistoryRepository for JsonStore {
    fn get_history(&self, item_id: &str) -> review_engine::Result<Vec<ReviewEvent>> {
        self.inner.get_history(item_id)
    }

    fn append_event(&mut self, event: ReviewEvent) -> review_engine::Result<()> {
        self.inner.append_event(event)
    }

    fn all_history(&self) -> review_engine::Result<HashMap<String, Vec<ReviewEvent>>> {
        self.inner.all_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_engine::{Difficulty, Priority};

    #[test]
    fn missing_files_open_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("fresh")).unwrap();
        assert!(store.list_items().unwrap().is_empty());
        assert!(store.all_history().unwrap().is_empty());
    }

    #[test]
    fn save_then_open_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path()).unwrap();
        let mut item = ReviewItem::new(
            "a",
            "Capital of France",
            "geo",
            Difficulty::new(3).unwrap(),
            Priority::High,
        );
        item.last_review = NaiveDate::from_ymd_opt(2024, 3, 10);
        store.upsert_item(item.clone()).unwrap();
        store
            .append_event(ReviewEvent {
                item_id: "a".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                quality: Quality::new(4).unwrap(),
            })
            .unwrap();
        store.save().unwrap();

        let reopened = JsonStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item("a").unwrap(), Some(item));
        assert_eq!(reopened.get_history("a").unwrap().len(), 1);
        assert_eq!(reopened.get_history("a").unwrap()[0].item_id, "a");
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn unreviewed_item() -> ReviewItem {
        ReviewItem::new("a", "q", "geo", Difficulty::new(3).unwrap(), Priority::High)
    }

    fn reviewed_store(dir: &Path) -> JsonStore {
        let mut store = JsonStore::open(dir).unwrap();
        let mut item = unreviewed_item();
        item.last_review = NaiveDate::from_ymd_opt(2024, 3, 10);
        store.upsert_item(item).unwrap();
        store
            .append_event(ReviewEvent {
                item_id: "a".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                quality: Quality::new(5).unwrap(),
            })
            .unwrap();
        store
    }

    #[test]
    fn save_leaves_only_data_files() {
        let dir = tempfile::tempdir().unwrap();
        reviewed_store(dir.path()).save().unwrap();
        reviewed_store(dir.path()).save().unwrap();
        assert_eq!(file_names(dir.path()), vec![HISTORY_FILE, ITEMS_FILE]);
    }

    #[test]
    fn interrupted_save_is_completed_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut before = JsonStore::open(dir.path()).unwrap();
        before.upsert_item(unreviewed_item()).unwrap();
        before.save().unwrap();

        // staged but never applied
        let staged = reviewed_store(dir.path()).staged().unwrap();
        write_json(&dir.path().join(PENDING_FILE), &staged).unwrap();
        let on_disk = fs::read_to_string(dir.path().join(ITEMS_FILE)).unwrap();
        assert!(!on_disk.contains("2024-03-10"));

        let store = JsonStore::open(dir.path()).unwrap();
        let item = store.get_item("a").unwrap().unwrap();
        assert_eq!(item.last_review, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(store.get_history("a").unwrap().len(), 1);
        assert_eq!(file_names(dir.path()), vec![HISTORY_FILE, ITEMS_FILE]);
    }

    #[test]
    fn history_is_sorted_on_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(HISTORY_FILE),
            r#"{"a": [
                {"date": "2024-03-12", "quality": 5},
                {"date": "2024-03-01", "quality": 2}
            ]}"#,
        )
        .unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let history = store.get_history("a").unwrap();
        assert_eq!(history[0].quality.value(), 2);
        assert_eq!(history[1].quality.value(), 5);
    }

    #[test]
    fn invalid_item_record_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ITEMS_FILE),
            r#"[{"id": "a", "difficulty": 14, "priority": "high"}]"#,
        )
        .unwrap();
        let err = JsonStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidData(_)));
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ITEMS_FILE), "[{").unwrap();
        let err = JsonStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, ToolError::Json { .. }));
        assert!(err.to_string().contains(ITEMS_FILE));
    }
}
