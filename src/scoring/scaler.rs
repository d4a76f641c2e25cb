use crate::error::{ReportError, Result};

use super::config::ReferenceRange;

/// Map a raw correct-answer count linearly onto `[min_score, max_score]`.
///
/// `scale(0, ..) == min_score` and `scale(item_count, ..) == max_score`.
/// The result is not rounded; one-decimal formatting happens at render time.
/// A zero `item_count` is a configuration bug and fails with
/// [`ReportError::Division`].
pub fn scale(raw_correct: f64, min_score: f64, max_score: f64, item_count: u32) -> Result<f64> {
    if item_count == 0 {
        return Err(ReportError::Division {
            subject: format!("range {}..{}", min_score, max_score),
        });
    }
    let multiplier = (max_score - min_score) / f64::from(item_count);
    Ok(raw_correct * multiplier + min_score)
}

impl ReferenceRange {
    pub fn scale(&self, raw_correct: f64, item_count: u32) -> Result<f64> {
        scale(raw_correct, self.min, self.max, item_count)
    }
}
