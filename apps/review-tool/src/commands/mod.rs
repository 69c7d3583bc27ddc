//! Tool subcommands.

pub mod item;
pub mod plan;
pub mod review;
pub mod schedule;
pub mod stats;

use review_engine::ReviewService;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::store::JsonStore;

pub type Service = ReviewService<JsonStore>;

pub(crate) fn to_output<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
