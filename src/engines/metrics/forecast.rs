// src/engines/metrics/forecast.rs
use crate::error::{FootfallError, Result};
use serde::{Deserialize, Serialize};

/// Point-forecast error over a walk-forward horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
}

impl ErrorMetrics {
    pub fn calculate(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(FootfallError::InputShape(format!(
                "{} actual values but {} predictions",
                actual.len(),
                predicted.len()
            )));
        }
        if actual.is_empty() {
            return Err(FootfallError::InputShape(
                "Cannot score an empty forecast".to_string(),
            ));
        }

        let n = actual.len() as f64;
        let (abs_sum, sq_sum) = actual
            .iter()
            .zip(predicted)
            .fold((0.0, 0.0), |(abs_sum, sq_sum), (a, p)| {
                let err = a - p;
                (abs_sum + err.abs(), sq_sum + err * err)
            });
        let mse = sq_sum / n;

        Ok(Self {
            mae: abs_sum / n,
            mse,
            rmse: mse.sqrt(),
        })
    }
}
