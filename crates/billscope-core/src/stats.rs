//! Interval and amount statistics
//!
//! Pure helpers underpinning recurrence classification: day gaps between
//! occurrences, mean, population standard deviation, and the interval
//! regularity confidence score.

use chrono::NaiveDate;

/// Day gaps between consecutive dates
///
/// Input must be sorted ascending. Returns an empty vector for fewer than
/// 2 dates. Same-day duplicates produce zero-length intervals, which are
/// legal inputs downstream.
pub fn day_intervals(dates: &[NaiveDate]) -> Vec<i64> {
    dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect()
}

/// Arithmetic mean; None for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divide by N, not N-1); None for an empty slice
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Regularity score for a set of day intervals: `1 - stddev/mean`
///
/// None when there are no intervals or the mean is not positive (all
/// same-day duplicates), so callers never see a NaN. A single interval has
/// stddev 0 and scores 1. Clamped to [0,1]; wildly irregular intervals
/// would otherwise go negative.
pub fn interval_confidence(intervals: &[i64]) -> Option<f64> {
    let values: Vec<f64> = intervals.iter().map(|&i| i as f64).collect();
    let avg = mean(&values)?;
    if avg <= 0.0 {
        return None;
    }
    let std_dev = population_std_dev(&values)?;
    Some((1.0 - std_dev / avg).clamp(0.0, 1.0))
}
