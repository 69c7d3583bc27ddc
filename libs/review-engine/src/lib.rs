//! Adaptive review scheduling engine.
//!
//! Provides:
//! - SM-2 derived ease and interval calculation with difficulty/priority scaling
//! - Bucketing of a review backlog into time windows
//! - Mastery classification and review statistics
//! - Size-bounded daily review plans
//! - A service facade over injected item and history repositories

pub mod algorithm;
pub mod error;
pub mod mastery;
pub mod plan;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod types;

pub use algorithm::{apply_review, next_ease_factor, next_interval, SchedulingResult};
pub use error::{DataIntegrityWarning, EngineError, Result, ValidationError};
pub use mastery::{classify, ItemPerformance, ReviewStats};
pub use plan::{DailyPlan, PlanStats, PlannedItem};
pub use repository::{HistoryRepository, InMemoryRepository, ItemRepository};
pub use scheduler::{Bucket, PriorityDistribution, ReviewSchedule, ScheduledItem};
pub use service::{ReviewService, UpdatedItem};
pub use types::{
    Difficulty, EngineSettings, MasteryLevel, NewItem, Priority, Quality, RawReviewItem,
    ReviewEvent, ReviewItem,
};
