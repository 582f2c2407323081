use crate::error::{FootfallError, Result};
use crate::types::TimeSeriesFrame;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default modified z-score cut-off.
pub const DEFAULT_THRESHOLD: f64 = 3.5;

/// Scales a MAD to be consistent with the standard deviation of a normal distribution.
const MAD_CONSISTENCY: f64 = 0.6745;

/// Side of the median a MAD was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MadSide {
    Below,
    Above,
}

/// Per-value result of the double-MAD test.
#[derive(Debug, Clone)]
pub struct OutlierScan {
    pub median: f64,
    pub left_mad: f64,
    pub right_mad: f64,
    /// `None` where the value sits on a side whose MAD is zero.
    pub scores: Vec<Option<f64>>,
    pub flags: Vec<bool>,
    pub degenerate_sides: Vec<MadSide>,
}

impl OutlierScan {
    pub fn outlier_count(&self) -> usize {
        self.flags.iter().filter(|&&flagged| flagged).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub original_count: usize,
    pub removed_count: usize,
    pub retained_count: usize,
    pub removed_dates: Vec<NaiveDate>,
    pub degenerate_sides: Vec<MadSide>,
}

/// Removes days whose value is far from the median, measured separately
/// below and above it so that skewed series are not over-trimmed.
#[derive(Debug, Clone, Copy)]
pub struct OutlierFilter {
    threshold: f64,
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl OutlierFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scan(&self, y: &[f64]) -> Result<OutlierScan> {
        double_mad_outliers(y, self.threshold)
    }

    /// Drop flagged rows of `column` from the frame (they are not imputed).
    pub fn filter(
        &self,
        frame: &TimeSeriesFrame,
        column: &str,
    ) -> Result<(TimeSeriesFrame, OutlierReport)> {
        let values = frame.values(column)?;
        let scan = self.scan(&values)?;
        let keep: Vec<bool> = scan.flags.iter().map(|&flagged| !flagged).collect();
        let filtered = frame.filter_rows(&keep)?;

        let removed_dates: Vec<NaiveDate> = frame
            .dates()
            .iter()
            .zip(&scan.flags)
            .filter_map(|(date, &flagged)| flagged.then_some(*date))
            .collect();

        let report = OutlierReport {
            column: column.to_string(),
            original_count: frame.len(),
            removed_count: removed_dates.len(),
            retained_count: filtered.len(),
            removed_dates,
            degenerate_sides: scan.degenerate_sides.clone(),
        };

        info!(
            "Found {} outliers from {} days in total. Removing them leaves {} days",
            report.removed_count, report.original_count, report.retained_count
        );

        Ok((filtered, report))
    }
}

/// Convenience wrapper over [`OutlierFilter::filter`].
pub fn remove_outliers(
    frame: &TimeSeriesFrame,
    column: &str,
    threshold: f64,
) -> Result<(TimeSeriesFrame, OutlierReport)> {
    OutlierFilter::new(threshold).filter(frame, column)
}

/// Modified z-scores against the median, using a separate MAD below and above it.
pub fn double_mad_outliers(y: &[f64], threshold: f64) -> Result<OutlierScan> {
    if y.is_empty() {
        return Err(FootfallError::InputShape(
            "Cannot scan an empty series for outliers".to_string(),
        ));
    }
    if let Some(pos) = y.iter().position(|v| !v.is_finite()) {
        return Err(FootfallError::InputShape(format!(
            "Non-finite value {} at position {} in outlier scan",
            y[pos], pos
        )));
    }

    let m = median(y.to_vec()).unwrap_or_default();
    let deviations: Vec<f64> = y.iter().map(|v| (v - m).abs()).collect();

    let below: Vec<f64> = side_deviations(y, &deviations, |v| v <= m);
    let above: Vec<f64> = side_deviations(y, &deviations, |v| v >= m);
    let left_mad = median(below).unwrap_or(0.0);
    let right_mad = median(above).unwrap_or(0.0);

    let mut degenerate_sides = Vec::new();
    if left_mad == 0.0 {
        warn!(
            "Data quality: MAD below the median ({}) is zero, too many identical values; \
             no outliers flagged below the median",
            m
        );
        degenerate_sides.push(MadSide::Below);
    }
    if right_mad == 0.0 {
        warn!(
            "Data quality: MAD above the median ({}) is zero, too many identical values; \
             no outliers flagged above the median",
            m
        );
        degenerate_sides.push(MadSide::Above);
    }

    let scores: Vec<Option<f64>> = y
        .iter()
        .zip(&deviations)
        .map(|(&value, &deviation)| {
            if value == m {
                return Some(0.0);
            }
            let mad = if value <= m { left_mad } else { right_mad };
            (mad > 0.0).then(|| MAD_CONSISTENCY * deviation / mad)
        })
        .collect();

    let flags = scores
        .iter()
        .map(|score| score.map_or(false, |z| z > threshold))
        .collect();

    Ok(OutlierScan {
        median: m,
        left_mad,
        right_mad,
        scores,
        flags,
        degenerate_sides,
    })
}

fn side_deviations(y: &[f64], deviations: &[f64], on_side: impl Fn(f64) -> bool) -> Vec<f64> {
    y.iter()
        .zip(deviations)
        .filter(|&(&value, _)| on_side(value))
        .map(|(_, &deviation)| deviation)
        .collect()
}

/// Median with the mean of the two central values for even lengths.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(Vec::new()), None);
    }

    #[test]
    fn test_value_at_median_scores_zero() {
        let scan = OutlierFilter::default().scan(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(scan.median, 3.0);
        assert_eq!(scan.scores[2], Some(0.0));
        assert_eq!(scan.outlier_count(), 0);
    }

    #[test]
    fn test_zero_mad_side_is_reported_not_flagged() {
        // Below the median every deviation is zero except the 9.
        let scan = OutlierFilter::default()
            .scan(&[10.0, 11.0, 9.0, 10.0, 1000.0])
            .unwrap();

        assert_eq!(scan.left_mad, 0.0);
        assert_eq!(scan.degenerate_sides, vec![MadSide::Below]);
        assert_eq!(scan.scores[2], None);
        assert!(!scan.flags[2]);
        assert!(scan.flags[4]);
        assert!(scan.scores.iter().flatten().all(|z| z.is_finite()));
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let result = OutlierFilter::default().scan(&[1.0, f64::NAN]);
        assert!(matches!(result, Err(FootfallError::InputShape(_))));
        let result = double_mad_outliers(&[f64::INFINITY, 2.0], DEFAULT_THRESHOLD);
        assert!(matches!(result, Err(FootfallError::InputShape(_))));
    }
}
