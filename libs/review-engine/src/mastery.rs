//! Mastery classification and review statistics.
//!
//! Mastery depends only on the quality history, never on the current
//! interval: a lapse resets the interval but not the mastery level.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{MasteryLevel, ReviewEvent};

/// Mean quality over `history`, or 0.0 when empty.
pub fn average_quality(history: &[ReviewEvent]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let sum: u32 = history.iter().map(|e| u32::from(e.quality.value())).sum();
    f64::from(sum) / history.len() as f64
}

/// Classify an item's mastery from its review history.
pub fn classify(history: &[ReviewEvent]) -> MasteryLevel {
    let count = history.len();
    let average = average_quality(history);

    if count >= 5 && average >= 4.5 {
        MasteryLevel::Mastered
    } else if count >= 3 && average >= 4.0 {
        MasteryLevel::Proficient
    } else if count >= 2 && average >= 3.0 {
        MasteryLevel::Familiar
    } else if count >= 1 {
        MasteryLevel::Beginner
    } else {
        MasteryLevel::NotStarted
    }
}

/// Summary of a single item's review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPerformance {
    pub review_count: usize,
    /// Rounded to two decimals.
    pub average_quality: f64,
    pub mastery_level: MasteryLevel,
    pub last_review: Option<NaiveDate>,
}

pub fn item_performance(history: &[ReviewEvent]) -> ItemPerformance {
    ItemPerformance {
        review_count: history.len(),
        average_quality: (average_quality(history) * 100.0).round() / 100.0,
        mastery_level: classify(history),
        last_review: history.last().map(|e| e.date),
    }
}

/// Aggregate statistics over every item's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub mastery_levels: BTreeMap<MasteryLevel, usize>,
    /// Consecutive review days ending today, or yesterday if today has none yet.
    pub streak: usize,
    pub longest_streak: usize,
}

pub fn review_stats(
    history_by_item: &HashMap<String, Vec<ReviewEvent>>,
    today: NaiveDate,
) -> ReviewStats {
    let mut mastery_levels: BTreeMap<MasteryLevel, usize> =
        MasteryLevel::ALL.iter().map(|&level| (level, 0)).collect();
    let mut review_days = BTreeSet::new();
    let mut total_reviews = 0;

    for history in history_by_item.values() {
        total_reviews += history.len();
        *mastery_levels.entry(classify(history)).or_insert(0) += 1;
        review_days.extend(history.iter().map(|e| e.date));
    }

    ReviewStats {
        total_reviews,
        mastery_levels,
        streak: current_streak(&review_days, today),
        longest_streak: longest_streak(&review_days),
    }
}

fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> usize {
    let anchor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| days.contains(yesterday))
    };
    let Some(mut cursor) = anchor else {
        return 0;
    };

    let mut streak = 1;
    while let Some(previous) = cursor.pred_opt().filter(|day| days.contains(day)) {
        streak += 1;
        cursor = previous;
    }
    streak
}

fn longest_streak(days: &BTreeSet<NaiveDate>) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}
