//! Closed-form rain statistics.
//!
//! Point-wise formulas of P.837-6 step 3 to step 5:
//!
//! ```text
//! Mc = Beta Mt                         Ms = (1 - Beta) Mt
//! P0 = Pr6 (1 - exp(-k Ms / Pr6))      (0 where Pr6 = 0)
//!
//! a = 1.09     b = (Mc + Ms) / (21797 P0)     c = 26.02 b
//! A = a b      B = a + c ln(p / P0)           C = ln(p / P0)
//! Rp = (-B + sqrt(B^2 - 4 A C)) / (2 A)       (0 where p > P0)
//! ```
//!
//! In the valid region p <= P0 we have C <= 0 and A > 0, so the
//! discriminant B^2 - 4AC is never negative.

use crate::error::{ModelError, Result};
use crate::profile::FormulaConstants;

/// Check an exceedance percentage: finite and strictly positive.
///
/// Percentages above P0 (including above 100) are valid inputs; the rate
/// there is 0.
pub fn validate_percentage(p: f64) -> Result<()> {
    if p.is_finite() && p > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidPercentage(p))
    }
}

/// Percentage probability of rain in an average year, P0.
///
/// No rain climatology (Pr6 not positive) means zero probability.
pub fn probability_of_rain(pr6: f64, mt: f64, beta: f64, k: &FormulaConstants) -> f64 {
    if !(pr6 > 0.0) {
        return 0.0;
    }

    let ms = (1.0 - beta) * mt;
    pr6 * (1.0 - (-k.probability_exponent * (ms / pr6)).exp())
}

/// Rainfall rate in mm/h exceeded for `p`% of an average year.
///
/// Returns exactly 0 where `p` exceeds P0 or P0 is undefined; the square
/// root is never evaluated there.
pub fn rainfall_rate(pr6: f64, mt: f64, beta: f64, p: f64, k: &FormulaConstants) -> f64 {
    let p0 = probability_of_rain(pr6, mt, beta, k);
    if p0.is_nan() || p > p0 {
        return 0.0;
    }

    let mc = beta * mt;
    let ms = (1.0 - beta) * mt;

    let a = k.a;
    let b = (mc + ms) / (k.b_divisor * p0);
    let c = k.c_factor * b;

    let ln_ratio = (p / p0).ln();
    let qa = a * b;
    let qb = a + c * ln_ratio;
    let qc = ln_ratio;

    (-qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
}
