//! Tolerance-based comparisons of constants.

pub use symdiff_parser::tree::TOLERANCE;

/// Returns true if `a` and `b` are within [`TOLERANCE`] of each other.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Returns true if `value` is within [`TOLERANCE`] of zero.
pub fn is_zero(value: f64) -> bool {
    approx_eq(value, 0.0)
}

/// Returns true if `value` is within [`TOLERANCE`] of one.
pub fn is_one(value: f64) -> bool {
    approx_eq(value, 1.0)
}
