use serde::Serialize;

use crate::base::{Mechanism, PrivacySpent, RdpCurve};


#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JSONReport {
    pub description: String,
    pub mechanism: Mechanism,
    pub steps: u64,
    pub curve: Vec<JSONOrder>,
    pub privacy_loss: Option<Approximate>,
}

#[derive(Serialize, Debug)]
pub struct JSONOrder {
    pub order: f64,
    pub rdp: f64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Approximate {
    pub epsilon: f64,
    pub delta: f64,
    pub best_order: f64,
}

impl JSONReport {
    pub fn new(
        mechanism: &Mechanism,
        steps: u64,
        curve: &RdpCurve,
        spent: Option<&PrivacySpent>,
    ) -> Self {
        let description = match mechanism {
            Mechanism::SampledGaussian(_) => "RDP of the sampled Gaussian mechanism",
            Mechanism::RandomizedResponse(_) => "RDP of binary randomized response",
        };

        JSONReport {
            description: format!("{}, composed over {} steps", description, steps),
            mechanism: *mechanism,
            steps,
            curve: curve.iter()
                .map(|(order, rdp)| JSONOrder { order, rdp })
                .collect(),
            privacy_loss: spent.map(|spent| Approximate {
                epsilon: spent.epsilon,
                delta: spent.delta,
                best_order: spent.order,
            }),
        }
    }
}
