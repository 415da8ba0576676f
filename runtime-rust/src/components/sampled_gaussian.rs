use rdp_validator::errors::*;
use rdp_validator::base::SampledGaussian;

use statrs::function::factorial::ln_binomial;
use std::f64::consts::SQRT_2;
use std::f64::{INFINITY, NEG_INFINITY};
use tracing::trace;

use crate::components::Accountable;
use crate::utilities::log_space::{log_add, log_erfc, log_sub};
use crate::utilities::special::log_abs_binomial;

/// Series terms below `exp(-30)` no longer move the sum.
pub const NEGLIGIBLE_LOG_TERM: f64 = -30.;

/// Upper bound on the number of terms evaluated for one order.
pub const MAX_SERIES_TERMS: u64 = 100_000;


impl Accountable for SampledGaussian {
    fn compute_rdp(&self, order: f64) -> Result<f64> {
        rdp_gaussian(self.sampling_rate, self.noise_multiplier, order)
    }

    fn composition_factor(&self, steps: u64) -> f64 {
        steps as f64
    }
}

/// RDP of the sampled Gaussian mechanism at one order.
///
/// # Arguments
/// * `q` - sampling rate, in [0, 1]
/// * `sigma` - noise multiplier: standard deviation of the noise relative to the l2-sensitivity
/// * `alpha` - Renyi order, greater than one or positive infinity
///
/// # Return
/// The Renyi divergence of a single application, possibly infinite.
///
/// # Example
/// ```
/// use rdp_runtime::components::sampled_gaussian::rdp_gaussian;
/// // without subsampling, the Gaussian mechanism has RDP alpha / (2 sigma^2)
/// assert_eq!(rdp_gaussian(1., 2., 8.).unwrap(), 1.);
/// assert_eq!(rdp_gaussian(0., 2., 8.).unwrap(), 0.);
/// ```
pub fn rdp_gaussian(q: f64, sigma: f64, alpha: f64) -> Result<f64> {
    if q == 0. {
        return Ok(0.);
    }

    // no privacy
    if sigma == 0. {
        return Ok(INFINITY);
    }

    if q == 1. {
        return Ok(alpha / (2. * sigma.powi(2)));
    }

    if alpha.is_infinite() {
        return Ok(INFINITY);
    }

    if alpha.fract() == 0. {
        rdp_integer_order(q, sigma, alpha)
    } else {
        rdp_fractional_order(q, sigma, alpha)
    }
}

/// Exact RDP at an integer order, from the binomial expansion of the alpha-th moment of the privacy loss.
fn rdp_integer_order(q: f64, sigma: f64, alpha: f64) -> Result<f64> {
    if alpha > MAX_SERIES_TERMS as f64 {
        bail!("order {} exceeds the largest exactly computable order of {}", alpha, MAX_SERIES_TERMS)
    }
    let order = alpha as u64;

    let log_a = (0..=order).fold(NEG_INFINITY, |log_a, i| {
        let k = i as f64;
        let log_b = ln_binomial(order, i)
            + k * q.ln()
            + (alpha - k) * (1. - q).ln()
            + (k * k - k) / (2. * sigma.powi(2));
        log_add(log_a, log_b)
    });

    Ok(log_a / (alpha - 1.))
}

/// RDP at a fractional order.
///
/// The Renyi divergence integral is split at `z0`, where the two Gaussians' mixture weights cross,
/// and each half-line integral is expanded as a series over the generalized binomial coefficients.
fn rdp_fractional_order(q: f64, sigma: f64, alpha: f64) -> Result<f64> {
    // the two parts of A_alpha, integrals over (-inf, z0] and [z0, +inf), start at zero
    let mut log_a0 = NEG_INFINITY;
    let mut log_a1 = NEG_INFINITY;

    let z0 = sigma.powi(2) * (1. / q - 1.).ln() + 0.5;

    let mut i: u64 = 0;
    loop {
        if i == MAX_SERIES_TERMS {
            bail!("series for order {} did not converge within {} terms", alpha, MAX_SERIES_TERMS)
        }

        let (log_coef, sign) = log_abs_binomial(alpha, i);
        let k = i as f64;
        let j = alpha - k;

        let log_t0 = log_coef + k * q.ln() + j * (1. - q).ln();
        let log_t1 = log_coef + j * q.ln() + k * (1. - q).ln();

        let log_e0 = 0.5f64.ln() + log_erfc((k - z0) / (SQRT_2 * sigma));
        let log_e1 = 0.5f64.ln() + log_erfc((z0 - j) / (SQRT_2 * sigma));

        let log_s0 = log_t0 + (k * k - k) / (2. * sigma.powi(2)) + log_e0;
        let log_s1 = log_t1 + (j * j - j) / (2. * sigma.powi(2)) + log_e1;

        if log_s0.is_nan() || log_s1.is_nan() || log_s0 == INFINITY || log_s1 == INFINITY {
            bail!("term {} of the series for order {} is not finite", i, alpha)
        }

        if sign > 0. {
            log_a0 = log_add(log_a0, log_s0);
            log_a1 = log_add(log_a1, log_s1);
        } else {
            log_a0 = log_sub(log_a0, log_s0)
                .chain_err(|| format!("term {} of the series for order {}", i, alpha))?;
            log_a1 = log_sub(log_a1, log_s1)
                .chain_err(|| format!("term {} of the series for order {}", i, alpha))?;
        }

        i += 1;
        if log_s0.max(log_s1) < NEGLIGIBLE_LOG_TERM {
            break;
        }
    }
    trace!(order = alpha, terms = i, "fractional order series converged");

    Ok(log_add(log_a0, log_a1) / (alpha - 1.))
}


#[cfg(test)]
mod test_sampled_gaussian {
    use crate::components::sampled_gaussian::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() <= tolerance * expected.abs(),
                "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(rdp_gaussian(0., 0., 2.).unwrap(), 0.);
        assert_eq!(rdp_gaussian(0.01, 0., 2.).unwrap(), INFINITY);
        assert_eq!(rdp_gaussian(0.01, 1.1, INFINITY).unwrap(), INFINITY);
        assert_eq!(rdp_gaussian(1., 1.1, INFINITY).unwrap(), INFINITY);
        assert_close(rdp_gaussian(1., 1.1, 3.5).unwrap(), 3.5 / 2.42, 1e-15);
    }

    #[test]
    fn test_integer_orders() {
        assert_close(rdp_gaussian(0.01, 1.1, 2.).unwrap(), 0.00012851008160514807, 1e-9);
        assert_close(rdp_gaussian(0.01, 1.1, 5.).unwrap(), 0.00034015796633296466, 1e-9);
        assert_close(rdp_gaussian(0.01, 1.1, 64.).unwrap(), 21.768012866287314, 1e-9);
        assert_close(rdp_gaussian(0.05, 1., 10.).unwrap(), 1.674060563785817, 1e-9);
        assert_close(rdp_gaussian(0.1, 2., 256.).unwrap(), 29.68838516154323, 1e-9);
    }

    #[test]
    fn test_fractional_orders() {
        assert_close(rdp_gaussian(0.01, 1.1, 1.5).unwrap(), 9.554528557684942e-05, 1e-7);
        assert_close(rdp_gaussian(0.01, 1.1, 10.5).unwrap(), 0.0009672713052309295, 1e-7);
        assert_close(rdp_gaussian(0.05, 1., 2.5).unwrap(), 0.005672533637346017, 1e-7);
        assert_close(rdp_gaussian(0.1, 2., 10.5).unwrap(), 0.020006854425869417, 1e-7);
    }

    #[test]
    fn test_paths_agree_near_integer() {
        for &(q, sigma) in &[(0.01, 1.1), (0.05, 1.), (0.1, 2.)] {
            let integer = rdp_gaussian(q, sigma, 5.).unwrap();
            let fractional = rdp_gaussian(q, sigma, 5.0001).unwrap();
            assert!((integer - fractional).abs() < 1e-4);
            assert!(fractional >= integer);
        }
    }

    #[test]
    fn test_order_beyond_exact_range() {
        assert!(rdp_gaussian(0.01, 1.1, 1e6).is_err());
    }

    #[test]
    fn test_fractional_series_cap() {
        for &alpha in &[150_000.5, 1e6 + 0.5] {
            let error = rdp_gaussian(0.01, 1.1, alpha).unwrap_err();
            assert!(error.to_string().contains("did not converge"));
        }
    }
}
