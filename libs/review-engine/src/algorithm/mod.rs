//! Spaced repetition scheduling for a single item.

pub mod ease;
pub mod interval;

use chrono::{Days, NaiveDate};

use crate::error::ValidationError;
use crate::types::{Quality, ReviewEvent, ReviewItem};

pub use ease::next_ease_factor;
pub use interval::{base_interval, next_interval};

pub const DEFAULT_EASE: f64 = 2.5;
pub const MIN_EASE: f64 = 1.3;
pub const MIN_INTERVAL_DAYS: u32 = 1;
pub const MAX_INTERVAL_DAYS: u32 = 60;

/// Result of scheduling an item after a review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub item: ReviewItem,
    pub event: ReviewEvent,
    pub next_review: NaiveDate,
}

/// Apply a review of `quality` on `today` to `item`.
///
/// `history` is the item's recorded events in chronological order, not
/// including this review. The interval is computed with the ease held before
/// the review; the ease is updated afterwards. The input item is untouched.
pub fn apply_review(
    item: &ReviewItem,
    history: &[ReviewEvent],
    quality: Quality,
    today: NaiveDate,
) -> Result<SchedulingResult, ValidationError> {
    if let Some(last) = history.last() {
        if today < last.date {
            return Err(ValidationError::OutOfOrderEvent {
                item_id: item.id.clone(),
                date: today,
                last: last.date,
            });
        }
    }

    let qualities: Vec<Quality> = history
        .iter()
        .map(|event| event.quality)
        .chain(std::iter::once(quality))
        .collect();

    let interval_days = next_interval(&qualities, item.ease_factor, item.difficulty, item.priority);
    let ease_factor = next_ease_factor(item.ease_factor, quality);
    let next_review = today
        .checked_add_days(Days::new(u64::from(interval_days)))
        .ok_or_else(|| ValidationError::ReviewDateOutOfRange {
            item_id: item.id.clone(),
            date: today,
            interval_days,
        })?;

    tracing::debug!(
        item_id = %item.id,
        quality = quality.value(),
        review = qualities.len(),
        ease_before = item.ease_factor,
        ease_after = ease_factor,
        interval_days,
        "scheduled review"
    );

    let updated = ReviewItem {
        ease_factor,
        interval_days,
        last_review: Some(today),
        ..item.clone()
    };

    Ok(SchedulingResult {
        item: updated,
        event: ReviewEvent {
            item_id: item.id.clone(),
            date: today,
            quality,
        },
        next_review,
    })
}
