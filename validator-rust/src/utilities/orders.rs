use crate::errors::*;
use crate::utilities::prepend;


/// Orders used when none are supplied: `1.1, 1.2, ..., 10.9` followed by `12, 13, ..., 127`.
///
/// # Example
/// ```
/// use rdp_validator::utilities::orders::default_orders;
/// let orders = default_orders();
/// assert_eq!(orders.len(), 99 + 116);
/// assert_eq!(orders.first(), Some(&1.1));
/// assert_eq!(orders.last(), Some(&127.));
/// ```
pub fn default_orders() -> Vec<f64> {
    (1..100).map(|x| 1. + x as f64 / 10.)
        .chain((12..128).map(f64::from))
        .collect()
}

/// Check that an order is a valid Renyi order: greater than one, or positive infinity.
pub fn check_order(order: f64) -> Result<()> {
    if order.is_nan() {
        return Err("order must not be null".into());
    }
    if order == 1. {
        return Err("order 1 is undefined for Renyi divergence".into());
    }
    if order < 1. {
        bail!("order must be greater than 1, got {}", order)
    }
    Ok(())
}

/// Check every order in a sequence.
///
/// An empty sequence is valid and produces an empty curve.
pub fn check_orders(orders: &[f64]) -> Result<Vec<Error>> {
    orders.iter().enumerate()
        .map(|(i, order)| check_order(*order)
            .map_err(prepend(&format!("orders[{}]:", i))))
        .collect::<Result<()>>()?;

    let mut warnings: Vec<Error> = Vec::new();
    if orders.is_empty() {
        warnings.push("orders: no orders were passed, so the curve is empty".into());
    }
    Ok(warnings)
}
