//! Review service: the engine's operations over an injected repository.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::apply_review;
use crate::error::{DataIntegrityWarning, EngineError, Result, ValidationError};
use crate::mastery::{self, ItemPerformance, ReviewStats};
use crate::plan::{self, DailyPlan};
use crate::repository::{HistoryRepository, ItemRepository};
use crate::scheduler::{self, ReviewSchedule};
use crate::types::{EngineSettings, MasteryLevel, NewItem, Quality, ReviewEvent, ReviewItem};

/// Item state after a recorded review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedItem {
    pub item_id: String,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub next_review: NaiveDate,
    pub mastery_level: MasteryLevel,
}

pub struct ReviewService<R> {
    repo: R,
    settings: EngineSettings,
}

impl<R> ReviewService<R>
where
    R: ItemRepository + HistoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self::with_settings(repo, EngineSettings::default())
    }

    pub fn with_settings(repo: R, settings: EngineSettings) -> Self {
        Self { repo, settings }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Create a never-reviewed item with default scheduling state.
    pub fn create_item(&mut self, new_item: NewItem) -> Result<ReviewItem> {
        if new_item.id.trim().is_empty() {
            return Err(ValidationError::EmptyItemId.into());
        }
        if self.repo.get_item(&new_item.id)?.is_some() {
            return Err(ValidationError::DuplicateItem(new_item.id).into());
        }

        let item = ReviewItem::new(
            new_item.id,
            new_item.content,
            new_item.subject,
            new_item.difficulty,
            new_item.priority,
        );
        self.repo.upsert_item(item.clone())?;
        tracing::info!(item_id = %item.id, subject = %item.subject, "created review item");
        Ok(item)
    }

    /// Record a review of `item_id` with raw `quality` on `today`.
    ///
    /// Nothing is written unless the quality is valid, the item exists and
    /// the review does not predate the item's history. The item is written
    /// before the event; if the append fails the previous item is restored.
    pub fn record_review(
        &mut self,
        item_id: &str,
        quality: i64,
        today: NaiveDate,
    ) -> Result<UpdatedItem> {
        let quality = Quality::new(quality)?;
        let item = self
            .repo
            .get_item(item_id)?
            .ok_or_else(|| EngineError::not_found(item_id))?;
        let mut history = self.repo.get_history(item_id)?;

        let result = apply_review(&item, &history, quality, today)?;

        self.repo.upsert_item(result.item.clone())?;
        if let Err(err) = self.repo.append_event(result.event.clone()) {
            if let Err(restore) = self.repo.upsert_item(item) {
                tracing::error!(
                    item_id,
                    error = %restore,
                    "failed to restore item after history append failed"
                );
            }
            return Err(err);
        }
        history.push(result.event);

        let updated = UpdatedItem {
            item_id: result.item.id,
            ease_factor: result.item.ease_factor,
            interval_days: result.item.interval_days,
            next_review: result.next_review,
            mastery_level: mastery::classify(&history),
        };

        tracing::info!(
            item_id = %updated.item_id,
            quality = quality.value(),
            interval_days = updated.interval_days,
            next_review = %updated.next_review,
            mastery = updated.mastery_level.as_str(),
            "recorded review"
        );

        Ok(updated)
    }

    /// Bucket every item relative to `today`.
    pub fn schedule_reviews(&self, today: NaiveDate) -> Result<ReviewSchedule> {
        let (items, _) = self.snapshot()?;
        Ok(scheduler::bucket(&items, today))
    }

    /// Daily plan bounded by `max_items`, or the configured limit.
    pub fn daily_plan(&self, today: NaiveDate, max_items: Option<usize>) -> Result<DailyPlan> {
        let (items, history) = self.snapshot()?;
        let settings = EngineSettings {
            max_items: max_items.unwrap_or(self.settings.max_items),
            ..self.settings.clone()
        };
        Ok(plan::build_with_settings(&items, &history, today, &settings))
    }

    pub fn item_performance(&self, item_id: &str) -> Result<ItemPerformance> {
        if self.repo.get_item(item_id)?.is_none() {
            return Err(EngineError::not_found(item_id));
        }
        let history = self.repo.get_history(item_id)?;
        Ok(mastery::item_performance(&history))
    }

    pub fn review_stats(&self, today: NaiveDate) -> Result<ReviewStats> {
        let history = self.repo.all_history()?;
        Ok(mastery::review_stats(&history, today))
    }

    pub fn due_items(&self, today: NaiveDate) -> Result<Vec<ReviewItem>> {
        let (items, _) = self.snapshot()?;
        Ok(scheduler::due_items(&items, today))
    }

    /// Items and history, with integrity warnings logged for items that have
    /// history but no `last_review`. Such items stay due now.
    fn snapshot(&self) -> Result<(Vec<ReviewItem>, HashMap<String, Vec<ReviewEvent>>)> {
        let items = self.repo.list_items()?;
        let history = self.repo.all_history()?;

        for item in items.iter().filter(|item| item.last_review.is_none()) {
            if history.get(&item.id).is_some_and(|events| !events.is_empty()) {
                DataIntegrityWarning::MissingLastReview {
                    item_id: item.id.clone(),
                }
                .log();
            }
        }

        Ok((items, history))
    }
}
