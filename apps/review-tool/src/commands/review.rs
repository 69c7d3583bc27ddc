//! Record a review.

use chrono::NaiveDate;
use serde_json::Value;

use super::{to_output, Service};
use crate::error::Result;

pub fn run(service: &mut Service, item_id: &str, quality: i64, today: NaiveDate) -> Result<Value> {
    let updated = service.record_review(item_id, quality, today)?;
    service.repository().save()?;
    to_output(&updated)
}
