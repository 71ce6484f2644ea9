use crate::error::{Error, Result};
use crate::ibm_model_1::table::ProbabilityModel;

/// Euclidean distance between two tables flattened in the same key order.
pub fn distance(prev: &ProbabilityModel, curr: &ProbabilityModel) -> Result<f64> {
    if prev.shape() != curr.shape() {
        return Err(Error::ShapeMismatch { left: prev.shape(), right: curr.shape() });
    }
    let sum_sq: f64 = prev
        .cells()
        .iter()
        .zip(curr.cells())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    Ok(sum_sq.sqrt())
}
