//! Error types for review-engine.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Input rejected at the engine boundary.
///
/// Always local to a single operation: no item state is touched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("quality must be between 0 and 5, got {0}")]
    QualityOutOfRange(i64),

    #[error("difficulty must be between 1 and 10, got {0}")]
    DifficultyOutOfRange(i64),

    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    #[error("ease factor must be at least 1.3, got {0}")]
    EaseBelowFloor(f64),

    #[error("interval must be between 1 and 60 days, got {0}")]
    IntervalOutOfRange(i64),

    #[error("item id must not be empty")]
    EmptyItemId,

    #[error("item {0} already exists")]
    DuplicateItem(String),

    #[error("review on {date} for item {item_id} predates its last review on {last}")]
    OutOfOrderEvent {
        item_id: String,
        date: chrono::NaiveDate,
        last: chrono::NaiveDate,
    },

    #[error("review on {date} for item {item_id} schedules past the last representable date")]
    ReviewDateOutOfRange {
        item_id: String,
        date: chrono::NaiveDate,
        interval_days: u32,
    },
}

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("item not found: {item_id}")]
    NotFound { item_id: String },

    #[error("repository error: {0}")]
    Repository(String),
}

impl EngineError {
    pub fn not_found(item_id: impl Into<String>) -> Self {
        Self::NotFound {
            item_id: item_id.into(),
        }
    }
}

/// Non-fatal data problem found while deriving a schedule.
///
/// The affected item is treated as due now; the warning is logged, never
/// returned as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataIntegrityWarning {
    #[error("item {item_id} has malformed last_review {value:?}; treating as due now")]
    MalformedLastReview { item_id: String, value: String },

    #[error("item {item_id} has review history but no last_review; treating as due now")]
    MissingLastReview { item_id: String },

    #[error(
        "item {item_id} reviewed on {last_review} with a {interval_days}-day interval has no \
         representable next review; treating as due now"
    )]
    NextReviewOutOfRange {
        item_id: String,
        last_review: chrono::NaiveDate,
        interval_days: u32,
    },
}

impl DataIntegrityWarning {
    /// Emit the warning through tracing.
    pub fn log(&self) {
        tracing::warn!(warning = %self, "data integrity warning");
    }
}
