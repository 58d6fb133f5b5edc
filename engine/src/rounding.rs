/// Round `value` to `digits` fractional digits.
///
/// Rounds from the exact decimal expansion of the `f64`, so a value stored just below a
/// tie (`27.134999...`) stays below it. Scaling by `10^digits` first would push it onto
/// the tie and round it the wrong way.
pub fn round_dp(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Round to the nearest whole percent, ties to even, saturating into `0..=100`.
pub fn round_percent(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}
