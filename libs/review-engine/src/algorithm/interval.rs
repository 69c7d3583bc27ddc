//! Review interval calculation.
//!
//! The base interval follows SM-2 growth (1, 6, then previous × ease) and is
//! reset to one day on a lapse. Difficulty and priority scale the base into
//! the interval actually stored on the item, clamped to 1..=60 days.

use super::{ease::next_ease_factor, DEFAULT_EASE, MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS};
use crate::types::{Difficulty, Priority, Quality};

/// Unadjusted interval for the latest review in `history`.
///
/// `history` is the item's quality sequence in chronological order, ending
/// with the review being scheduled. `ease_factor` is the ease held before
/// that review. Earlier base intervals are replayed from the history with
/// the ease evolving from the default.
pub fn base_interval(history: &[Quality], ease_factor: f64) -> u32 {
    let Some((latest, earlier)) = history.split_last() else {
        return MIN_INTERVAL_DAYS;
    };

    let mut ease = DEFAULT_EASE;
    let mut previous = MIN_INTERVAL_DAYS;
    for (index, &quality) in earlier.iter().enumerate() {
        previous = growth_step(index + 1, previous, quality, ease);
        ease = next_ease_factor(ease, quality);
    }

    growth_step(history.len(), previous, *latest, ease_factor)
}

fn growth_step(ordinal: usize, previous: u32, quality: Quality, ease_factor: f64) -> u32 {
    if quality.is_lapse() {
        return MIN_INTERVAL_DAYS;
    }
    match ordinal {
        1 => 1,
        2 => 6,
        // f64 -> u32 casts saturate
        _ => (f64::from(previous) * ease_factor).round() as u32,
    }
}

/// Interval in days until the next review, in `1..=60`.
pub fn next_interval(
    history: &[Quality],
    ease_factor: f64,
    difficulty: Difficulty,
    priority: Priority,
) -> u32 {
    let base = base_interval(history, ease_factor);
    let adjusted = (f64::from(base) * difficulty.factor() * priority.factor()).round();
    adjusted.clamp(f64::from(MIN_INTERVAL_DAYS), f64::from(MAX_INTERVAL_DAYS)) as u32
}
