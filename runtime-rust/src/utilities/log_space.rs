//! Arithmetic on values stored as natural logarithms.
//!
//! A log-space value of `-inf` stands for zero.

use rdp_validator::errors::*;

use std::f64::consts::{LN_2, SQRT_2};
use std::f64::{INFINITY, NEG_INFINITY};

use crate::utilities::special::log_ndtr;


/// Add two numbers in log space: `ln(exp(logx) + exp(logy))`.
///
/// # Example
/// ```
/// use rdp_runtime::utilities::log_space::log_add;
/// let sum = log_add(2f64.ln(), 3f64.ln());
/// assert!((sum - 5f64.ln()).abs() < 1e-15);
/// assert_eq!(log_add(1.5, std::f64::NEG_INFINITY), 1.5);
/// ```
pub fn log_add(logx: f64, logy: f64) -> f64 {
    let (a, b) = if logx < logy { (logx, logy) } else { (logy, logx) };
    if a == NEG_INFINITY {
        return b;
    }
    if b == INFINITY {
        return INFINITY;
    }
    (a - b).exp().ln_1p() + b
}

/// Subtract two numbers in log space: `ln(exp(logx) - exp(logy))`.
///
/// Fails when `logx < logy`, as the difference would be negative.
pub fn log_sub(logx: f64, logy: f64) -> Result<f64> {
    if logx < logy {
        return Err("the result of subtraction must be non-negative".into());
    }
    if logy == NEG_INFINITY {
        return Ok(logx);
    }
    if logx == logy {
        return Ok(NEG_INFINITY);
    }

    let difference = (logx - logy).exp_m1().ln() + logy;
    // exp_m1 overflows when exp(logy) is negligible next to exp(logx)
    if difference.is_finite() {
        Ok(difference)
    } else {
        Ok(logx)
    }
}

/// `ln(erfc(x))`, accurate for large `x` where `erfc(x)` underflows.
pub fn log_erfc(x: f64) -> f64 {
    LN_2 + log_ndtr(-x * SQRT_2)
}


#[cfg(test)]
mod test_log_space {
    use crate::utilities::log_space::*;
    use statrs::function::erf::erfc;
    use std::f64::NEG_INFINITY;

    #[test]
    fn test_log_add() {
        assert_eq!(log_add(3.2, NEG_INFINITY), 3.2);
        assert_eq!(log_add(NEG_INFINITY, 3.2), 3.2);
        assert_eq!(log_add(NEG_INFINITY, NEG_INFINITY), NEG_INFINITY);
        assert_eq!(log_add(0.3, 7.1), log_add(7.1, 0.3));

        // exp(1000) overflows, the log-space sum does not
        let sum = log_add(1000., 1000.);
        assert!((sum - (1000. + 2f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_log_sub() {
        assert_eq!(log_sub(4.2, 4.2).unwrap(), NEG_INFINITY);
        assert_eq!(log_sub(4.2, NEG_INFINITY).unwrap(), 4.2);
        assert!(log_sub(1., 2.).is_err());

        let difference = log_sub(5f64.ln(), 3f64.ln()).unwrap();
        assert!((difference - 2f64.ln()).abs() < 1e-14);
    }

    #[test]
    fn test_log_sub_negligible_subtrahend() {
        // the subtrahend is far below the precision of the minuend
        assert_eq!(log_sub(1000., 0.).unwrap(), 1000.);
        assert_eq!(log_sub(800., -800.).unwrap(), 800.);
    }

    #[test]
    fn test_log_sub_inverts_log_add() {
        let (x, y) = (-3.7, -5.1);
        let sum = log_add(x, y);
        assert!((log_sub(sum, y).unwrap() - x).abs() < 1e-12);
    }

    #[test]
    fn test_log_erfc() {
        for &x in &[-3., -0.5, 0., 0.5, 2., 5.] {
            assert!((log_erfc(x) - erfc(x).ln()).abs() < 1e-12, "log_erfc({})", x);
        }

        // erfc(40) underflows; ln erfc(x) ~ -x^2 - ln(x sqrt(pi))
        let leading = -1600. - (40. * std::f64::consts::PI.sqrt()).ln();
        assert!(log_erfc(40.).is_finite());
        assert!((log_erfc(40.) - leading).abs() < 1e-3);
    }
}
