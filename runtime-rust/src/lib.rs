//! Renyi differential privacy (RDP) accounting.
//!
//! Computes the RDP curve of the sampled Gaussian mechanism and of binary randomized response,
//! composed over a number of training steps.
//! The curve is converted to an (epsilon, delta) guarantee by [rdp_validator::compute_eps].
//!
//! # Example
//! ```
//! use rdp_runtime::compute_rdp_randomized_response;
//! use rdp_validator::{compute_eps, utilities::orders::default_orders};
//!
//! let orders = default_orders();
//! let rdp = compute_rdp_randomized_response(0.7, 100, &orders, 0.05).unwrap();
//! let (epsilon, order) = compute_eps(&orders, rdp.as_slice().unwrap(), 1e-5).unwrap();
//! assert!(epsilon > 0.);
//! assert!(orders.contains(&order));
//! ```

// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;

use rdp_validator::errors::*;
use rdp_validator::base::{Mechanism, RandomizedResponse, RdpCurve, SampledGaussian};

use ndarray::Array1;
use tracing::{debug, warn};

pub mod components;
pub mod utilities;

pub use crate::components::Accountable;


/// Compute the RDP curve of a mechanism composed over `steps` applications.
///
/// Parameters and orders are validated first; warnings from validation are logged.
///
/// # Arguments
/// * `mechanism` - the mechanism applied at each step
/// * `steps` - number of independent applications
/// * `orders` - Renyi orders to evaluate; the curve follows their order
///
/// # Return
/// The composed RDP at each order.
pub fn compute_curve(mechanism: &Mechanism, steps: u64, orders: &[f64]) -> Result<RdpCurve> {
    let warnings = rdp_validator::validate_accounting(mechanism, steps, orders)?;
    warnings.iter().for_each(|warning| warn!("{}", warning));

    let factor = mechanism.composition_factor(steps);

    let rdp = orders.iter()
        .map(|&order| mechanism.compute_rdp(order)
            .map(|rdp| compose(rdp, factor))
            .chain_err(|| format!("at order {}", order)))
        .collect::<Result<Vec<f64>>>()?;

    let curve = RdpCurve::new(orders.to_vec(), rdp)?;
    debug!(steps, orders = curve.len(), "computed rdp curve for {:?}", mechanism);
    Ok(curve)
}

/// Linear composition. A zero factor releases nothing, even where a single application is unbounded.
fn compose(rdp: f64, factor: f64) -> f64 {
    if factor == 0. { 0. } else { rdp * factor }
}


/// Compute RDP of the sampled Gaussian mechanism.
///
/// # Arguments
/// * `q` - the sampling rate
/// * `noise_multiplier` - the ratio of the standard deviation of the Gaussian noise
///   to the l2-sensitivity of the function to which it is added
/// * `steps` - the number of steps
/// * `orders` - the RDP orders
///
/// # Return
/// The RDPs at all orders. Can be `inf`.
///
/// # Example
/// ```
/// use rdp_runtime::compute_rdp;
/// let rdp = compute_rdp(1., 2., 10, &[2., 4.]).unwrap();
/// assert_eq!(rdp.to_vec(), vec![2.5, 5.]);
/// ```
pub fn compute_rdp(q: f64, noise_multiplier: f64, steps: u64, orders: &[f64]) -> Result<Array1<f64>> {
    let mechanism = SampledGaussian::new(q, noise_multiplier).into();
    Ok(Array1::from(compute_curve(&mechanism, steps, orders)?.rdp))
}

/// Compute RDP of the sampled Gaussian mechanism at a single order.
pub fn compute_rdp_scalar(q: f64, noise_multiplier: f64, steps: u64, order: f64) -> Result<f64> {
    Ok(compute_rdp(q, noise_multiplier, steps, &[order])?[0])
}

/// Compute RDP of binary randomized response.
///
/// The composed value is `q * steps * rdp`: the outer sampling rate `q` modulates every step.
///
/// # Arguments
/// * `p` - the response probability
/// * `steps` - the number of steps
/// * `orders` - the RDP orders
/// * `q` - the sampling rate
pub fn compute_rdp_randomized_response(p: f64, steps: u64, orders: &[f64], q: f64) -> Result<Array1<f64>> {
    let mechanism = RandomizedResponse::new(p, q).into();
    Ok(Array1::from(compute_curve(&mechanism, steps, orders)?.rdp))
}

/// Compute RDP of binary randomized response at a single order.
pub fn compute_rdp_randomized_response_scalar(p: f64, steps: u64, order: f64, q: f64) -> Result<f64> {
    Ok(compute_rdp_randomized_response(p, steps, &[order], q)?[0])
}
