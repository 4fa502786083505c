//! Small numeric helpers for the report: median and fixed-precision rounding.

/// Median of a sequence of percentages.
///
/// For an even count this is the mean of the two middle values after
/// sorting. Returns `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
