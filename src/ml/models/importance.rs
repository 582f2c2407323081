use crate::error::{FootfallError, Result};
use crate::types::ImportanceRecord;
use std::cmp::Ordering;

/// Pair weights with their feature names, most important first.
///
/// Ties keep training column order. `lag_depth` is stamped on every record so
/// reports from different sweep runs can be concatenated.
pub fn importance_report(
    weights: &[f64],
    feature_names: &[String],
    lag_depth: usize,
) -> Result<Vec<ImportanceRecord>> {
    if weights.len() != feature_names.len() {
        return Err(FootfallError::InputShape(format!(
            "{} importance weights for {} features",
            weights.len(),
            feature_names.len()
        )));
    }

    let mut records: Vec<ImportanceRecord> = feature_names
        .iter()
        .zip(weights)
        .map(|(feature, &importance)| ImportanceRecord {
            feature: feature.clone(),
            importance,
            lag_depth,
        })
        .collect();

    records.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    Ok(records)
}
