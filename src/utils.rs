/// Absolute tolerance below which a coefficient counts as zero and two
/// coefficients count as equal.
pub const TOLERANCE: f64 = 1e-10;

/// Check whether `a` and `b` agree within [`TOLERANCE`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Check whether a coefficient vanishes under [`TOLERANCE`].
#[inline]
pub fn is_negligible(c: f64) -> bool {
    c.abs() < TOLERANCE
}
