//! Review statistics.

use chrono::NaiveDate;
use serde_json::Value;

use super::{to_output, Service};
use crate::error::Result;

pub fn run(service: &Service, today: NaiveDate) -> Result<Value> {
    let stats = service.review_stats(today)?;
    to_output(&stats)
}
