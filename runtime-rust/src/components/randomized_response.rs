use rdp_validator::errors::*;
use rdp_validator::base::RandomizedResponse;

use crate::components::Accountable;
use crate::utilities::log_space::log_add;


impl Accountable for RandomizedResponse {
    fn compute_rdp(&self, order: f64) -> Result<f64> {
        Ok(rdp_randomized_response(self.flip_probability, order))
    }

    /// The outer sampling rate modulates every step.
    fn composition_factor(&self, steps: u64) -> f64 {
        self.sampling_rate * steps as f64
    }
}

/// RDP of binary randomized response at one order.
///
/// `ln(p^a (1-p)^(1-a) + (1-p)^a p^(1-a)) / (a - 1)`, with both terms kept in log space so large orders cannot overflow.
///
/// # Arguments
/// * `p` - probability of the first response, in [0, 1]
/// * `alpha` - Renyi order, greater than one or positive infinity
///
/// # Example
/// ```
/// use rdp_runtime::components::randomized_response::rdp_randomized_response;
/// let rdp = rdp_randomized_response(0.7, 2.);
/// let expected = (0.7f64.powi(2) / 0.3 + 0.3f64.powi(2) / 0.7).ln();
/// assert!((rdp - expected).abs() < 1e-12);
/// ```
pub fn rdp_randomized_response(p: f64, alpha: f64) -> f64 {
    // the two responses are identically distributed
    if p == 0.5 {
        return 0.;
    }

    let log_p = p.ln();
    let log_1mp = (1. - p).ln();

    // limit of the Renyi divergence: the max-divergence
    if alpha.is_infinite() {
        return (log_p - log_1mp).abs();
    }

    let log_item1 = alpha * log_p + (1. - alpha) * log_1mp;
    let log_item2 = alpha * log_1mp + (1. - alpha) * log_p;

    log_add(log_item1, log_item2) / (alpha - 1.)
}


#[cfg(test)]
mod test_randomized_response {
    use crate::components::randomized_response::rdp_randomized_response;
    use std::f64::INFINITY;

    #[test]
    fn test_reference_values() {
        assert!((rdp_randomized_response(0.7, 2.) - 0.5663954749208013).abs() < 1e-12);
        assert!((rdp_randomized_response(0.7, 10.) - 0.8076673223898595).abs() < 1e-12);
    }

    #[test]
    fn test_indistinguishable_responses() {
        for &alpha in &[1.1, 2., 32., INFINITY] {
            assert_eq!(rdp_randomized_response(0.5, alpha), 0.);
        }
    }

    #[test]
    fn test_symmetry() {
        for &alpha in &[1.5, 4., 64.] {
            let left = rdp_randomized_response(0.2, alpha);
            let right = rdp_randomized_response(0.8, alpha);
            assert!((left - right).abs() < 1e-12);
        }
    }

    #[test]
    fn test_deterministic_responses() {
        assert_eq!(rdp_randomized_response(0., 2.), INFINITY);
        assert_eq!(rdp_randomized_response(1., 2.5), INFINITY);
        assert_eq!(rdp_randomized_response(1., INFINITY), INFINITY);
    }

    #[test]
    fn test_approaches_max_divergence() {
        let limit = rdp_randomized_response(0.7, INFINITY);
        assert!((limit - (0.7f64 / 0.3).ln()).abs() < 1e-15);

        let large = rdp_randomized_response(0.7, 1e6);
        assert!(large < limit);
        assert!(limit - large < 1e-5);
    }
}
