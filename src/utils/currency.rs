//! Two-decimal currency arithmetic.
//!
//! Every result goes through [`round2`], which scales by 100, rounds half-up
//! and scales back. This strips binary floating-point drift from amounts
//! that carry at most two decimal digits (`add(0.1, 0.2) == 0.3`).
//!
//! Operands are not validated: NaN and infinities pass straight through,
//! and dividing by zero yields whatever IEEE-754 division yields.

const SCALE: f64 = 100.0;

/// Rounds to the nearest integer with ties going toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Normalizes a raw value to two decimal places.
pub fn round2(x: f64) -> f64 {
    round_half_up(x * SCALE) / SCALE
}

pub fn add(a: f64, b: f64) -> f64 {
    round2(a + b)
}

pub fn subtract(a: f64, b: f64) -> f64 {
    round2(a - b)
}

pub fn multiply(a: f64, b: f64) -> f64 {
    // a * b * 100 要保持左結合的順序
    round_half_up(a * b * SCALE) / SCALE
}

pub fn divide(a: f64, b: f64) -> f64 {
    round2(a / b)
}

/// Converts a major-unit amount to integer minor units (kobo, cents).
///
/// Returns `None` for non-finite amounts or ones that do not fit in `i64`.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    let scaled = round_half_up(amount * SCALE);
    if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(scaled as i64)
}
