/// `value` if finite, otherwise `fallback`.
pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Clamp into `[0, 1]`; NaN maps to `0`.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear map of `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`, clamped to the output range.
///
/// A degenerate input range resolves to `out_hi` at or past `in_hi` and `out_lo` before it.
pub(crate) fn map_range(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    let v = finite_or(v, in_lo);
    let denom = in_hi - in_lo;
    if denom.abs() <= f64::EPSILON {
        return if v >= in_hi { out_hi } else { out_lo };
    }
    lerp(out_lo, out_hi, clamp01((v - in_lo) / denom))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
