// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;

#[doc(hidden)]
pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain! {}
}

#[doc(hidden)]
pub use errors::*;

pub mod base;
pub mod utilities;

use itertools::izip;

use crate::base::{Mechanism, PrivacySpent, RdpCurve};


/// Validate the parameters of a mechanism along with the orders it will be evaluated at.
///
/// Returns the warnings raised by the checks. Any check that fails outright is returned as an error.
pub fn validate_accounting(
    mechanism: &Mechanism,
    steps: u64,
    orders: &[f64],
) -> Result<Vec<Error>> {
    let mut warnings = mechanism.validate()?;
    utilities::privacy::check_steps(steps)?;
    warnings.extend(utilities::orders::check_orders(orders)?);
    Ok(warnings)
}


/// Convert an RDP curve into an (epsilon, delta)-DP guarantee.
///
/// # Arguments
/// * `orders` - Renyi orders the curve was evaluated at
/// * `rdp` - RDP value accrued at each order
/// * `delta` - target delta, in (0, 1)
///
/// # Return
/// The smallest epsilon over all orders, and the order that achieves it.
///
/// # Example
/// ```
/// use rdp_validator::compute_eps;
/// let (eps, order) = compute_eps(&[2., 4.], &[0.5, 1.], 1e-5).unwrap();
/// assert_eq!(order, 4.);
/// assert!((eps - (1. + (1e5f64).ln() / 3.)).abs() < 1e-12);
/// ```
pub fn compute_eps(orders: &[f64], rdp: &[f64], delta: f64) -> Result<(f64, f64)> {
    utilities::privacy::check_delta(delta)?;
    if orders.len() != rdp.len() {
        bail!("{} rdp values passed when {} were required", rdp.len(), orders.len())
    }
    if orders.is_empty() {
        return Err("orders: at least one order is required to compute epsilon".into());
    }

    let log_inv_delta = (1. / delta).ln();

    // infinite epsilons only stand when no order gives a finite one
    let mut best: Option<(f64, f64)> = None;
    for (&order, &rdp) in izip!(orders, rdp) {
        utilities::orders::check_order(order)?;
        // ln(1/delta) / (order - 1) vanishes as the order grows without bound
        let epsilon = if order.is_infinite() {
            rdp
        } else {
            rdp + log_inv_delta / (order - 1.)
        };
        if epsilon.is_nan() {
            bail!("epsilon at order {} is not a number", order)
        }
        match best {
            Some((best_epsilon, _)) if best_epsilon <= epsilon => (),
            _ => best = Some((epsilon, order)),
        }
    }

    best.ok_or_else(|| "orders: at least one order is required to compute epsilon".into())
}


/// Convert a curve into the privacy spent at `delta`.
pub fn compute_privacy_spent(curve: &RdpCurve, delta: f64) -> Result<PrivacySpent> {
    if curve.is_empty() {
        bail!("curve: cannot convert an empty curve")
    }
    let (epsilon, order) = compute_eps(&curve.orders, &curve.rdp, delta)?;
    Ok(PrivacySpent { epsilon, delta, order })
}


/// Generate a json string with a summary of the accounting.
pub fn generate_report(
    mechanism: &Mechanism,
    steps: u64,
    curve: &RdpCurve,
    spent: Option<&PrivacySpent>,
) -> Result<String> {
    let report = utilities::json::JSONReport::new(mechanism, steps, curve, spent);

    match serde_json::to_string(&report) {
        Ok(serialized) => Ok(serialized),
        Err(_) => Err("unable to parse report into json".into())
    }
}
