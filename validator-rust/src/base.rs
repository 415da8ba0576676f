use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::utilities::privacy;


/// Parameters of the sampled Gaussian mechanism.
///
/// Each record is included with probability `sampling_rate`, and Gaussian noise with standard
/// deviation `noise_multiplier` times the l2-sensitivity is added to the released sum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampledGaussian {
    pub sampling_rate: f64,
    pub noise_multiplier: f64,
}

impl SampledGaussian {
    pub fn new(sampling_rate: f64, noise_multiplier: f64) -> Self {
        SampledGaussian { sampling_rate, noise_multiplier }
    }

    /// Check the parameters, returning warnings for parameters that are valid but degenerate.
    pub fn validate(&self) -> Result<Vec<Error>> {
        let mut warnings = privacy::check_sampling_rate(self.sampling_rate)?;
        warnings.extend(privacy::check_noise_multiplier(self.noise_multiplier)?);
        Ok(warnings)
    }
}


/// Parameters of binary randomized response.
///
/// One output is reported with probability `flip_probability` and the other with
/// `1 - flip_probability`. The mechanism's contribution is modulated by an outer
/// `sampling_rate`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomizedResponse {
    pub flip_probability: f64,
    pub sampling_rate: f64,
}

impl RandomizedResponse {
    pub fn new(flip_probability: f64, sampling_rate: f64) -> Self {
        RandomizedResponse { flip_probability, sampling_rate }
    }

    pub fn validate(&self) -> Result<Vec<Error>> {
        let mut warnings = privacy::check_flip_probability(self.flip_probability)?;
        warnings.extend(privacy::check_sampling_rate(self.sampling_rate)?);
        Ok(warnings)
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Mechanism {
    SampledGaussian(SampledGaussian),
    RandomizedResponse(RandomizedResponse),
}

impl Mechanism {
    pub fn validate(&self) -> Result<Vec<Error>> {
        match self {
            Mechanism::SampledGaussian(x) => x.validate(),
            Mechanism::RandomizedResponse(x) => x.validate(),
        }
    }
}

impl From<SampledGaussian> for Mechanism {
    fn from(x: SampledGaussian) -> Self {
        Mechanism::SampledGaussian(x)
    }
}

impl From<RandomizedResponse> for Mechanism {
    fn from(x: RandomizedResponse) -> Self {
        Mechanism::RandomizedResponse(x)
    }
}


/// RDP values paired with the orders they were evaluated at.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RdpCurve {
    pub orders: Vec<f64>,
    pub rdp: Vec<f64>,
}

impl RdpCurve {
    pub fn new(orders: Vec<f64>, rdp: Vec<f64>) -> Result<Self> {
        if orders.len() != rdp.len() {
            bail!("{} rdp values passed when {} were required", rdp.len(), orders.len())
        }
        Ok(RdpCurve { orders, rdp })
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterate over (order, rdp) pairs.
    pub fn iter(&self) -> impl Iterator<Item=(f64, f64)> + '_ {
        self.orders.iter().copied().zip(self.rdp.iter().copied())
    }
}


/// An (epsilon, delta)-DP guarantee, and the order it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrivacySpent {
    pub epsilon: f64,
    pub delta: f64,
    pub order: f64,
}


#[cfg(test)]
mod test_base {
    use crate::base::{Mechanism, RandomizedResponse, RdpCurve, SampledGaussian};

    #[test]
    fn test_curve_lengths() {
        assert!(RdpCurve::new(vec![2., 3.], vec![0.1]).is_err());

        let curve = RdpCurve::new(vec![2., 3.], vec![0.1, 0.2]).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.iter().collect::<Vec<_>>(), vec![(2., 0.1), (3., 0.2)]);
    }

    #[test]
    fn test_mechanism_validation() {
        let gaussian: Mechanism = SampledGaussian::new(0.01, 1.1).into();
        assert!(gaussian.validate().unwrap().is_empty());

        assert!(Mechanism::from(SampledGaussian::new(1.5, 1.1)).validate().is_err());
        assert!(Mechanism::from(SampledGaussian::new(0.01, -1.)).validate().is_err());
        assert!(Mechanism::from(RandomizedResponse::new(-0.1, 0.05)).validate().is_err());
        assert!(Mechanism::from(RandomizedResponse::new(0.7, std::f64::NAN)).validate().is_err());
    }
}
