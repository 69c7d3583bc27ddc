//! Backlog bucketing and due-item listing.

use chrono::NaiveDate;
use serde_json::{json, Value};

use super::{to_output, Service};
use crate::error::Result;

pub fn run(service: &Service, today: NaiveDate) -> Result<Value> {
    let schedule = service.schedule_reviews(today)?;
    to_output(&schedule)
}

pub fn due(service: &Service, today: NaiveDate) -> Result<Value> {
    let items = service.due_items(today)?;
    Ok(json!({
        "date": today,
        "count": items.len(),
        "items": items,
    }))
}
