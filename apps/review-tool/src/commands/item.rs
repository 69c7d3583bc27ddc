//! Item creation and inspection.

use clap::Args;
use review_engine::{Difficulty, EngineError, ItemRepository, NewItem, Priority};
use serde_json::{json, Value};

use super::{to_output, Service};
use crate::error::Result;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Item identifier
    #[arg(long)]
    pub id: String,
    /// Question or topic text
    #[arg(long)]
    pub content: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    /// 1 (easy) to 10 (hardest)
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub difficulty: i64,
    /// high, medium or low
    #[arg(long, default_value = "medium")]
    pub priority: String,
}

/// Create an item and persist it.
pub fn add(service: &mut Service, args: AddArgs) -> Result<Value> {
    let difficulty = Difficulty::new(args.difficulty).map_err(EngineError::from)?;
    let priority: Priority = args.priority.parse().map_err(EngineError::from)?;

    let item = service.create_item(NewItem {
        id: args.id,
        content: args.content,
        subject: args.subject,
        difficulty,
        priority,
    })?;
    service.repository().save()?;
    to_output(&item)
}

/// Item record together with its performance summary.
pub fn show(service: &Service, item_id: &str) -> Result<Value> {
    let performance = service.item_performance(item_id)?;
    let item = service.repository().get_item(item_id)?;
    Ok(json!({
        "item": item,
        "performance": performance,
    }))
}
