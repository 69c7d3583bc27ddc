//! Daily review plan.

use chrono::NaiveDate;
use serde_json::Value;

use super::{to_output, Service};
use crate::error::Result;

pub fn run(service: &Service, today: NaiveDate, max_items: Option<usize>) -> Result<Value> {
    let plan = service.daily_plan(today, max_items)?;
    to_output(&plan)
}
