//! Small numeric helpers shared by the suppressor and the aggregator.

/// Divides `num` by `den`, returning `0.0` when the denominator is not
/// strictly positive.
///
/// Both IoU over an empty union and the mean of an empty class go through
/// here, so a `0/0` never turns into NaN.
#[inline]
pub(crate) fn ratio_or_zero(num: f32, den: f32) -> f32 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Mean of `count` values summing to `sum`, or `0.0` for no values.
#[inline]
pub(crate) fn mean_or_zero(sum: f32, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Returns true when `value` is finite and not negative.
#[inline]
pub(crate) fn is_non_negative_finite(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
