/// Range returned when both extrema are unknown.
pub const DEFAULT_RANGE: (f64, f64) = (0.0, 100.0);
/// Range returned by [`guarded_log_range`] when both extrema are unknown.
pub const DEFAULT_LOG_RANGE: (f64, f64) = (1.0, 100.0);
/// Half-width used for a degenerate range centered on zero.
pub const DEGENERATE_ZERO_DELTA: f64 = 100.0;
/// Fractional padding added on both sides of a regular range.
pub const RANGE_PADDING_RATIO: f64 = 0.05;
/// Largest magnitude a guarded bound may take. Keeps every span, overscroll
/// limit and pan step representable as a finite `f64`.
pub const MAX_AXIS_MAGNITUDE: f64 = f64::MAX / 4.0;
/// Largest decade magnitude [`guarded_log_range`] accepts from its inputs.
pub const LOG_DECADE_LIMIT: f64 = 250.0;

/// Computes padded, non-degenerate axis bounds from raw extrema.
///
/// - both missing: [`DEFAULT_RANGE`]
/// - `min == max` (or only one known): widened by `|min|`, or by
///   [`DEGENERATE_ZERO_DELTA`] when the value is zero
/// - otherwise padded by 5% of the span on each side
///
/// Non-finite inputs count as missing and reversed inputs are swapped.
/// Inputs are clamped to half of [`MAX_AXIS_MAGNITUDE`], so the result is
/// always finite with `min < max`.
#[must_use]
pub fn guarded_range(min: Option<f64>, max: Option<f64>) -> (f64, f64) {
    let input_limit = MAX_AXIS_MAGNITUDE / 2.0;
    let min = min
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(-input_limit, input_limit));
    let max = max
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(-input_limit, input_limit));

    let (low, high) = match (min, max) {
        (None, None) => return DEFAULT_RANGE,
        (Some(value), None) | (None, Some(value)) => (value, value),
        (Some(min), Some(max)) => (min.min(max), min.max(max)),
    };

    if low == high {
        let delta = if low != 0.0 {
            low.abs()
        } else {
            DEGENERATE_ZERO_DELTA
        };
        return (low - delta, high + delta);
    }

    let pad = high * RANGE_PADDING_RATIO - low * RANGE_PADDING_RATIO;
    (low - pad, high + pad)
}

/// Log-axis counterpart of [`guarded_range`], padded in decades.
///
/// Values that are not finite and strictly positive count as missing. A
/// degenerate range is widened by one decade on each side.
#[must_use]
pub fn guarded_log_range(min: Option<f64>, max: Option<f64>) -> (f64, f64) {
    let decade = |value: Option<f64>| {
        value
            .filter(|value| value.is_finite() && *value > 0.0)
            .map(|value| value.log10().clamp(-LOG_DECADE_LIMIT, LOG_DECADE_LIMIT))
    };

    let (low, high) = match (decade(min), decade(max)) {
        (None, None) => return DEFAULT_LOG_RANGE,
        (Some(value), None) | (None, Some(value)) => (value, value),
        (Some(min), Some(max)) => (min.min(max), min.max(max)),
    };

    let (low, high) = if low == high {
        (low - 1.0, high + 1.0)
    } else {
        let pad = (high - low) * RANGE_PADDING_RATIO;
        (low - pad, high + pad)
    };
    (10f64.powf(low), 10f64.powf(high))
}
