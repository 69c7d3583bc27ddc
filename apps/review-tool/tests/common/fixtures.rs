//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Raw item record as upstream storage would write it.
///
/// # Arguments
/// * `last_review` - `YYYY-MM-DD`, or `None` for a never-reviewed item
pub fn item_record(
    id: &str,
    subject: &str,
    priority: &str,
    difficulty: i64,
    interval_days: i64,
    last_review: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "content": format!("Prompt for {id}"),
        "subject": subject,
        "priority": priority,
        "difficulty": difficulty,
        "ease_factor": 2.5,
        "interval_days": interval_days,
        "last_review": last_review,
    })
}

/// Command-line arguments for `add`.
pub fn add_args<'a>(
    id: &'a str,
    subject: &'a str,
    difficulty: &'a str,
    priority: &'a str,
) -> Vec<&'a str> {
    vec![
        "add",
        "--id",
        id,
        "--content",
        "What is the powerhouse of the cell?",
        "--subject",
        subject,
        "--difficulty",
        difficulty,
        "--priority",
        priority,
    ]
}

/// A backlog relative to 2024-03-10: three items due today (one overdue),
/// four due tomorrow and one due next week.
pub fn backlog() -> Value {
    json!([
        item_record("t-low", "history", "low", 8, 1, Some("2024-03-09")),
        item_record("t-high", "biology", "high", 3, 2, Some("2024-03-07")),
        item_record("t-medium", "math", "medium", 4, 1, Some("2024-03-09")),
        item_record("m-low", "math", "low", 5, 1, Some("2024-03-10")),
        item_record("m-high", "history", "high", 2, 2, Some("2024-03-09")),
        item_record("m-medium-hard", "math", "medium", 9, 1, Some("2024-03-10")),
        item_record("m-medium", "biology", "medium", 1, 1, Some("2024-03-10")),
        item_record("next-week", "math", "high", 10, 10, Some("2024-03-10")),
    ])
}
