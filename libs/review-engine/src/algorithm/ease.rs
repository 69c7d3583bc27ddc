//! SM-2 ease factor update.

use super::MIN_EASE;
use crate::types::Quality;

/// Ease factor after a review of the given quality.
///
/// Perfect recall adds 0.1, quality 4 leaves the ease unchanged and
/// anything lower reduces it. The result never drops below 1.3.
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = f64::from(Quality::MAX - quality.value());
    let delta = 0.1 - miss * (0.08 + miss * 0.02);
    (ease_factor + delta).max(MIN_EASE)
}
