//! Schedule, due and plan command tests.

mod common;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::fixtures;
use common::TestContext;

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("array of items")
        .iter()
        .map(|item| item["id"].as_str().expect("item id").to_string())
        .collect()
}

/// Test the backlog is bucketed and sorted by priority then difficulty.
#[test]
fn test_schedule_buckets() {
    let ctx = TestContext::new();
    ctx.seed(&fixtures::backlog(), &json!({}));

    let schedule = ctx.ok(&["schedule", "--date", "2024-03-10"]);
    assert_eq!(ids(&schedule["today"]), vec!["t-high", "t-medium", "t-low"]);
    assert_eq!(
        ids(&schedule["tomorrow"]),
        vec!["m-high", "m-medium-hard", "m-medium", "m-low"]
    );
    assert_eq!(ids(&schedule["this_week"]), Vec::<String>::new());
    assert_eq!(ids(&schedule["next_week"]), vec!["next-week"]);
    assert_eq!(ids(&schedule["later"]), Vec::<String>::new());
    assert_eq!(
        schedule["priority_distribution"],
        json!({ "high": 3, "medium": 3, "low": 2 })
    );
}

/// Test the plan takes all of today then fills from tomorrow.
#[test]
fn test_plan_fills_from_tomorrow() {
    let ctx = TestContext::new();
    ctx.seed(&fixtures::backlog(), &json!({}));

    let plan = ctx.ok(&["plan", "--date", "2024-03-10", "--max-items", "5"]);
    assert_eq!(plan["date"], "2024-03-10");
    assert_eq!(
        ids(&plan["items"]),
        vec!["t-high", "t-medium", "t-low", "m-high", "m-medium-hard"]
    );
    assert_eq!(plan["items"][0]["bucket"], "today");
    assert_eq!(plan["items"][4]["bucket"], "tomorrow");
    assert_eq!(
        plan["stats"],
        json!({
            "total_items": 5,
            "subjects_count": 3,
            "priority_distribution": { "high": 2, "medium": 2, "low": 1 },
            "estimated_minutes": 15,
        })
    );
    assert_eq!(ids(&plan["by_subject"]["math"]), vec!["t-medium", "m-medium-hard"]);
}

/// Test the plan limit falls back to configuration.
#[test]
fn test_plan_uses_configured_limit() {
    let ctx = TestContext::new().with_config(|config| {
        config.settings.max_items = 2;
        config.settings.minutes_per_item = 4;
    });
    ctx.seed(&fixtures::backlog(), &json!({}));

    let plan = ctx.ok(&["plan", "--date", "2024-03-10"]);
    assert_eq!(plan["stats"]["total_items"], 2);
    assert_eq!(plan["stats"]["estimated_minutes"], 8);
}

/// Test planned items carry their mastery level.
#[test]
fn test_plan_includes_mastery() {
    let ctx = TestContext::new();
    ctx.seed(
        &fixtures::backlog(),
        &json!({
            "t-high": [
                { "date": "2024-03-01", "quality": 5 },
                { "date": "2024-03-03", "quality": 4 },
                { "date": "2024-03-07", "quality": 4 },
            ]
        }),
    );

    let plan = ctx.ok(&["plan", "--date", "2024-03-10", "--max-items", "2"]);
    assert_eq!(plan["items"][0]["mastery_level"], "proficient");
    assert_eq!(plan["items"][1]["mastery_level"], "not_started");
}

/// Test a malformed last_review date makes the item due rather than failing.
#[test]
fn test_malformed_last_review_is_due() {
    let ctx = TestContext::new();
    ctx.seed(
        &json!([
            fixtures::item_record("broken", "math", "medium", 5, 30, Some("last tuesday")),
            fixtures::item_record("fresh", "math", "medium", 5, 30, Some("2024-03-09")),
        ]),
        &json!({}),
    );

    let schedule = ctx.ok(&["schedule", "--date", "2024-03-10"]);
    assert_eq!(ids(&schedule["today"]), vec!["broken"]);
    assert_eq!(ids(&schedule["later"]), vec!["fresh"]);
}

/// Test due lists only items due on or before the date.
#[test]
fn test_due_items() {
    let ctx = TestContext::new();
    ctx.seed(&fixtures::backlog(), &json!({}));

    let due = ctx.ok(&["due", "--date", "2024-03-10"]);
    assert_eq!(due["count"], 3);
    assert_eq!(ids(&due["items"]), vec!["t-high", "t-low", "t-medium"]);
}

/// Test an invalid stored record is reported as a data error.
#[test]
fn test_invalid_stored_item() {
    let ctx = TestContext::new();
    ctx.seed(
        &json!([fixtures::item_record("bad", "math", "someday", 5, 1, None)]),
        &json!({}),
    );

    let err = ctx.run(&["schedule"]).unwrap_err();
    assert_eq!(err.kind(), "data_error");
    assert_eq!(err.exit_code(), 5);
}

/// Test an empty data directory produces an empty plan.
#[test]
fn test_empty_plan() {
    let ctx = TestContext::new();
    let plan = ctx.ok(&["plan", "--date", "2024-03-10"]);
    assert_eq!(plan["stats"]["total_items"], 0);
    assert_eq!(plan["by_subject"], json!({}));
}

/// Test an item with reviews on record but no last_review is due now.
#[test]
fn test_history_without_last_review_is_due() {
    let ctx = TestContext::new();
    ctx.seed(
        &json!([
            fixtures::item_record("orphan", "math", "medium", 5, 6, None),
            fixtures::item_record("fresh", "math", "medium", 5, 6, Some("2024-03-09")),
        ]),
        &json!({ "orphan": [{ "date": "2024-03-01", "quality": 4 }] }),
    );

    let schedule = ctx.ok(&["schedule", "--date", "2024-03-10"]);
    assert_eq!(ids(&schedule["today"]), vec!["orphan"]);
    assert_eq!(schedule["today"][0]["days_until"], 0);

    let due = ctx.ok(&["due", "--date", "2024-03-10"]);
    assert_eq!(due["count"], 1);
    assert_eq!(ids(&due["items"]), vec!["orphan"]);
}
