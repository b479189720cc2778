/// Reduces `data` to at most `max_points` elements by fixed-stride sampling.
///
/// Returns the input unchanged when it already fits. Otherwise keeps every
/// `ceil(len / max_points)`-th element starting at index 0, preserving order.
#[must_use]
pub fn decimate<T: Clone>(data: &[T], max_points: usize) -> Vec<T> {
    if data.len() <= max_points {
        return data.to_vec();
    }
    if max_points == 0 {
        return Vec::new();
    }

    let stride = decimation_stride(data.len(), max_points);
    data.iter().step_by(stride).cloned().collect()
}

/// Stride used by [`decimate`] for `len` samples and a `max_points` budget.
///
/// Returns `1` when no decimation is needed.
#[must_use]
pub fn decimation_stride(len: usize, max_points: usize) -> usize {
    if max_points == 0 || len <= max_points {
        return 1;
    }
    len.div_ceil(max_points)
}
