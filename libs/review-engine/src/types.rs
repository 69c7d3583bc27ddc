//! Core types for the review engine.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::algorithm::{DEFAULT_EASE, MAX_INTERVAL_DAYS, MIN_EASE, MIN_INTERVAL_DAYS};
use crate::error::{DataIntegrityWarning, ValidationError};

/// Review priority assigned by the study plan.
///
/// Declaration order gives `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    /// Interval multiplier: higher priority is reviewed sooner.
    pub fn factor(self) -> f64 {
        match self {
            Self::High => 0.7,
            Self::Medium => 1.0,
            Self::Low => 1.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ValidationError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recall quality of a single review, 0 (total lapse) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::QualityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Quality below 3 is a failed recall.
    pub fn is_lapse(self) -> bool {
        self.0 < 3
    }
}

impl TryFrom<i64> for Quality {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Item difficulty, 1 (easy) to 10 (hardest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (1..=10).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::DifficultyOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Interval multiplier: harder items get shorter intervals.
    pub fn factor(self) -> f64 {
        1.0 - f64::from(self.0) / 10.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

/// A learned item under review scheduling.
///
/// `ease_factor`, `interval_days` and `last_review` only change through
/// [`crate::algorithm::apply_review`]. Deserialization goes through
/// [`RawReviewItem::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReviewItem")]
pub struct ReviewItem {
    pub id: String,
    pub content: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub priority: Priority,
    pub ease_factor: f64,
    pub interval_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review: Option<NaiveDate>,
}

impl ReviewItem {
    /// Create a never-reviewed item with default scheduling state.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        subject: impl Into<String>,
        difficulty: Difficulty,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            subject: subject.into(),
            difficulty,
            priority,
            ease_factor: DEFAULT_EASE,
            interval_days: MIN_INTERVAL_DAYS,
            last_review: None,
        }
    }

    /// Date of the next review, or `None` when the item is due now.
    ///
    /// A next review past the last representable date is logged as a
    /// [`DataIntegrityWarning`] and the item is due now.
    pub fn next_review(&self) -> Option<NaiveDate> {
        let last = self.last_review?;
        let next = last.checked_add_days(Days::new(u64::from(self.interval_days)));
        if next.is_none() {
            DataIntegrityWarning::NextReviewOutOfRange {
                item_id: self.id.clone(),
                last_review: last,
                interval_days: self.interval_days,
            }
            .log();
        }
        next
    }

    /// Days from `today` until the next review; never-reviewed items are due today.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        match self.next_review() {
            Some(next) => (next - today).num_days(),
            None => 0,
        }
    }
}

/// Loosely-typed item record as supplied by upstream storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReviewItem {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_raw_difficulty")]
    pub difficulty: i64,
    #[serde(default = "default_raw_priority")]
    pub priority: String,
    #[serde(default)]
    pub ease_factor: Option<f64>,
    #[serde(default)]
    pub interval_days: Option<i64>,
    #[serde(default)]
    pub last_review: Option<String>,
}

fn default_raw_difficulty() -> i64 {
    5
}

fn default_raw_priority() -> String {
    Priority::Medium.as_str().to_string()
}

impl RawReviewItem {
    /// Validate into a typed [`ReviewItem`].
    ///
    /// A malformed `last_review` is not an error: it is logged as a
    /// [`DataIntegrityWarning`] and the item becomes due now.
    pub fn validate(self) -> Result<ReviewItem, ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyItemId);
        }
        let difficulty = Difficulty::new(self.difficulty)?;
        let priority: Priority = self.priority.parse()?;

        let ease_factor = match self.ease_factor {
            Some(ease) if ease.is_nan() || ease < MIN_EASE => {
                return Err(ValidationError::EaseBelowFloor(ease))
            }
            Some(ease) => ease,
            None => DEFAULT_EASE,
        };

        let interval_days = match self.interval_days {
            Some(days)
                if days < i64::from(MIN_INTERVAL_DAYS) || days > i64::from(MAX_INTERVAL_DAYS) =>
            {
                return Err(ValidationError::IntervalOutOfRange(days))
            }
            Some(days) => days as u32,
            None => MIN_INTERVAL_DAYS,
        };

        let last_review = match self.last_review.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    DataIntegrityWarning::MalformedLastReview {
                        item_id: self.id.clone(),
                        value: value.to_string(),
                    }
                    .log();
                    None
                }
            },
        };

        Ok(ReviewItem {
            id: self.id,
            content: self.content,
            subject: self.subject,
            difficulty,
            priority,
            ease_factor,
            interval_days,
            last_review,
        })
    }
}

impl TryFrom<RawReviewItem> for ReviewItem {
    type Error = ValidationError;

    fn try_from(raw: RawReviewItem) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// Request to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub id: String,
    pub content: String,
    pub subject: String,
    pub difficulty: Difficulty,
    pub priority: Priority,
}

/// A single recorded review. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub item_id: String,
    pub date: NaiveDate,
    pub quality: Quality,
}

/// Long-term retention classification derived from review history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    NotStarted,
    Beginner,
    Familiar,
    Proficient,
    Mastered,
}

impl Default for MasteryLevel {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 5] = [
        Self::Mastered,
        Self::Proficient,
        Self::Familiar,
        Self::Beginner,
        Self::NotStarted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Beginner => "beginner",
            Self::Familiar => "familiar",
            Self::Proficient => "proficient",
            Self::Mastered => "mastered",
        }
    }
}

/// Engine-wide planning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub max_items: usize,
    pub minutes_per_item: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_items: 20,
            minutes_per_item: 3,
        }
    }
}
