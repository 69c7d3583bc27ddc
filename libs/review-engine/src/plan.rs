//! Size-bounded daily review plan.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mastery::classify;
use crate::scheduler::{self, Bucket, PriorityDistribution, ScheduledItem};
use crate::types::{EngineSettings, MasteryLevel, ReviewEvent, ReviewItem};

/// Buckets a plan may draw from, in draining order.
const PLAN_BUCKETS: [Bucket; 3] = [Bucket::Today, Bucket::Tomorrow, Bucket::ThisWeek];

/// Subject key for items that carry no subject.
pub const UNSPECIFIED_SUBJECT: &str = "other";

/// An item selected for today's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedItem {
    #[serde(flatten)]
    pub scheduled: ScheduledItem,
    pub bucket: Bucket,
    pub mastery_level: MasteryLevel,
}

impl PlannedItem {
    pub fn id(&self) -> &str {
        &self.scheduled.item.id
    }

    fn subject_key(&self) -> String {
        let subject = self.scheduled.item.subject.trim();
        if subject.is_empty() {
            UNSPECIFIED_SUBJECT.to_string()
        } else {
            subject.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total_items: usize,
    pub subjects_count: usize,
    pub priority_distribution: PriorityDistribution,
    pub estimated_minutes: u32,
}

/// Review plan for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub items: Vec<PlannedItem>,
    pub by_subject: BTreeMap<String, Vec<PlannedItem>>,
    pub stats: PlanStats,
}

/// Build a plan of at most `max_items` items for `today`.
pub fn build(
    items: &[ReviewItem],
    history_by_item: &HashMap<String, Vec<ReviewEvent>>,
    today: NaiveDate,
    max_items: usize,
) -> DailyPlan {
    let settings = EngineSettings {
        max_items,
        ..EngineSettings::default()
    };
    build_with_settings(items, history_by_item, today, &settings)
}

/// Build a plan using the limits in `settings`.
///
/// Today's bucket is drained first, then tomorrow's, then the rest of the
/// week; items further out are never pulled forward.
pub fn build_with_settings(
    items: &[ReviewItem],
    history_by_item: &HashMap<String, Vec<ReviewEvent>>,
    today: NaiveDate,
    settings: &EngineSettings,
) -> DailyPlan {
    let schedule = scheduler::bucket(items, today);

    let selected: Vec<PlannedItem> = PLAN_BUCKETS
        .iter()
        .flat_map(|&b| schedule.bucket(b).iter().map(move |s| (b, s)))
        .take(settings.max_items)
        .map(|(bucket, scheduled)| {
            let history = history_by_item
                .get(&scheduled.item.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            PlannedItem {
                scheduled: scheduled.clone(),
                bucket,
                mastery_level: classify(history),
            }
        })
        .collect();

    let mut by_subject: BTreeMap<String, Vec<PlannedItem>> = BTreeMap::new();
    for planned in &selected {
        by_subject
            .entry(planned.subject_key())
            .or_default()
            .push(planned.clone());
    }

    let stats = PlanStats {
        total_items: selected.len(),
        subjects_count: by_subject.len(),
        priority_distribution: selected.iter().map(|p| &p.scheduled.item).collect(),
        estimated_minutes: (selected.len() as u32).saturating_mul(settings.minutes_per_item),
    };

    tracing::info!(
        date = %today,
        total_items = stats.total_items,
        subjects = stats.subjects_count,
        estimated_minutes = stats.estimated_minutes,
        "built daily review plan"
    );

    DailyPlan {
        date: today,
        items: selected,
        by_subject,
        stats,
    }
}
