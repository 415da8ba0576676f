//! Accountable trait implementations
//!
//! Each component is a privacy mechanism whose Renyi divergence can be computed at any order.
//! The parameter structs live in the validator; the runtime attaches the computation to them.
//!
//! Implementations of the Accountable trait are distributed among the module files.

use rdp_validator::errors::*;
use rdp_validator::base::Mechanism;

pub mod randomized_response;
pub mod sampled_gaussian;

/// Accountable component trait
///
/// Accountable structs represent a mechanism that is applied repeatedly during training.
pub trait Accountable {
    /// RDP of a single application of the mechanism.
    ///
    /// # Arguments
    /// * `order` - the Renyi order, greater than one or positive infinity
    ///
    /// # Returns
    /// The Renyi divergence at `order`, possibly infinite
    fn compute_rdp(&self, order: f64) -> Result<f64>;

    /// Factor the RDP of a single application is scaled by after `steps` compositions.
    fn composition_factor(&self, steps: u64) -> f64;
}

impl Accountable for Mechanism {
    /// Utility implementation on the enum containing all mechanisms.
    ///
    /// This utility delegates to the concrete implementation of each mechanism.
    fn compute_rdp(&self, order: f64) -> Result<f64> {
        let rdp = match self {
            Mechanism::SampledGaussian(x) => x.compute_rdp(order),
            Mechanism::RandomizedResponse(x) => x.compute_rdp(order),
        };
        rdp.chain_err(|| format!("mechanism specification: {:?}:", self))
    }

    fn composition_factor(&self, steps: u64) -> f64 {
        match self {
            Mechanism::SampledGaussian(x) => x.composition_factor(steps),
            Mechanism::RandomizedResponse(x) => x.composition_factor(steps),
        }
    }
}
