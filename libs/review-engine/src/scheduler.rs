//! Partition of review items into time buckets relative to a day.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Priority, ReviewItem};

/// Time window an item's next review falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Later,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::NextWeek,
        Self::Later,
    ];

    /// Bucket for an item due in `days_until` days. Overdue items are due today.
    pub fn for_days_until(days_until: i64) -> Self {
        match days_until {
            i64::MIN..=0 => Self::Today,
            1 => Self::Tomorrow,
            2..=7 => Self::ThisWeek,
            8..=14 => Self::NextWeek,
            _ => Self::Later,
        }
    }
}

/// Item placed in a bucket, with its derived review date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    #[serde(flatten)]
    pub item: ReviewItem,
    /// `None` when the item has never been reviewed.
    pub next_review: Option<NaiveDate>,
    pub days_until: i64,
}

impl ScheduledItem {
    pub fn new(item: ReviewItem, today: NaiveDate) -> Self {
        let next_review = item.next_review();
        let days_until = next_review.map_or(0, |next| (next - today).num_days());
        Self {
            item,
            next_review,
            days_until,
        }
    }
}

/// Item counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityDistribution {
    pub fn record(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

impl<'a> FromIterator<&'a ReviewItem> for PriorityDistribution {
    fn from_iter<I: IntoIterator<Item = &'a ReviewItem>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for item in iter {
            distribution.record(item.priority);
        }
        distribution
    }
}

/// Items partitioned into the five buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub today: Vec<ScheduledItem>,
    pub tomorrow: Vec<ScheduledItem>,
    pub this_week: Vec<ScheduledItem>,
    pub next_week: Vec<ScheduledItem>,
    pub later: Vec<ScheduledItem>,
    pub priority_distribution: PriorityDistribution,
}

impl ReviewSchedule {
    pub fn bucket(&self, bucket: Bucket) -> &[ScheduledItem] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Tomorrow => &self.tomorrow,
            Bucket::ThisWeek => &self.this_week,
            Bucket::NextWeek => &self.next_week,
            Bucket::Later => &self.later,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<ScheduledItem> {
        match bucket {
            Bucket::Today => &mut self.today,
            Bucket::Tomorrow => &mut self.tomorrow,
            Bucket::ThisWeek => &mut self.this_week,
            Bucket::NextWeek => &mut self.next_week,
            Bucket::Later => &mut self.later,
        }
    }

    /// Number of items across all buckets.
    pub fn total_items(&self) -> usize {
        Bucket::ALL.iter().map(|&b| self.bucket(b).len()).sum()
    }
}

/// Surfacing order inside a bucket: priority first, then difficulty, both descending.
pub fn surfacing_order(a: &ReviewItem, b: &ReviewItem) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.difficulty.cmp(&a.difficulty))
}

/// Partition `items` into buckets relative to `today`.
///
/// Every item lands in exactly one bucket. Buckets are stably sorted by
/// [`surfacing_order`].
pub fn bucket(items: &[ReviewItem], today: NaiveDate) -> ReviewSchedule {
    let mut schedule = ReviewSchedule::default();

    for item in items {
        let scheduled = ScheduledItem::new(item.clone(), today);
        schedule.priority_distribution.record(item.priority);
        schedule
            .bucket_mut(Bucket::for_days_until(scheduled.days_until))
            .push(scheduled);
    }

    for b in Bucket::ALL {
        schedule
            .bucket_mut(b)
            .sort_by(|x, y| surfacing_order(&x.item, &y.item));
    }

    tracing::debug!(
        total = items.len(),
        today = schedule.today.len(),
        tomorrow = schedule.tomorrow.len(),
        this_week = schedule.this_week.len(),
        next_week = schedule.next_week.len(),
        later = schedule.later.len(),
        "bucketed review items"
    );

    schedule
}

/// Items due on or before `today`, earliest first; never-reviewed items lead.
pub fn due_items(items: &[ReviewItem], today: NaiveDate) -> Vec<ReviewItem> {
    let mut due: Vec<(Option<NaiveDate>, &ReviewItem)> = items
        .iter()
        .map(|item| (item.next_review(), item))
        .filter(|(next, _)| next.map_or(true, |date| date <= today))
        .collect();
    due.sort_by_key(|(next, _)| *next);
    due.into_iter().map(|(_, item)| item.clone()).collect()
}
