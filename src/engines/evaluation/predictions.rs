use crate::data::resample::{resample, Aggregation, Frequency};
use crate::error::{FootfallError, Result};
use crate::types::PredictionRecord;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Actual vs predicted totals over one calendar period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

/// Date each prediction and attach the trailing `window`-prediction mean.
pub fn build_prediction_records(
    dates: &[NaiveDate],
    actual: &[f64],
    predicted: &[f64],
    window: usize,
) -> Result<Vec<PredictionRecord>> {
    if dates.len() != actual.len() || actual.len() != predicted.len() {
        return Err(FootfallError::InputShape(format!(
            "Prediction lengths differ: {} dates, {} actual, {} predicted",
            dates.len(),
            actual.len(),
            predicted.len()
        )));
    }
    if window == 0 {
        return Err(FootfallError::Configuration(
            "Rolling window must be at least 1".to_string(),
        ));
    }

    let rolling = trailing_mean(predicted, window)?;
    Ok((0..dates.len())
        .map(|i| PredictionRecord {
            date: dates[i],
            actual: actual[i],
            predicted: predicted[i],
            rolling_mean: rolling[i],
        })
        .collect())
}

/// Mean of the last `window` values, null until the window is full.
fn trailing_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    let options = RollingOptionsFixedWindow {
        window_size: window,
        min_periods: window,
        ..Default::default()
    };
    let df = DataFrame::new(vec![Column::new("predicted".into(), values)])?
        .lazy()
        .select([col("predicted").rolling_mean(options).alias("rolling")])
        .collect()?;
    Ok(df.column("rolling")?.f64()?.into_iter().collect())
}

pub fn summarize(records: &[PredictionRecord], frequency: Frequency) -> Result<Vec<PeriodSummary>> {
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    let actual: Vec<f64> = records.iter().map(|r| r.actual).collect();
    let predicted: Vec<f64> = records.iter().map(|r| r.predicted).collect();

    let actual = resample(&dates, &actual, frequency, Aggregation::Sum)?;
    let predicted = resample(&dates, &predicted, frequency, Aggregation::Sum)?;

    Ok(actual
        .into_iter()
        .zip(predicted)
        .map(|((period, actual), (_, predicted))| PeriodSummary {
            period,
            actual,
            predicted,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        // 2021-03-01 is a Monday.
        NaiveDate::from_ymd_opt(2021, 3, 1)
            .unwrap()
            .iter_days()
            .take(n)
            .collect()
    }

    #[test]
    fn test_rolling_mean_starts_at_window() {
        let predicted: Vec<f64> = (1..=8).map(|v| v as f64).collect();
        let records = build_prediction_records(&dates(8), &predicted, &predicted, 7).unwrap();

        assert!(records[..6].iter().all(|r| r.rolling_mean.is_none()));
        assert_eq!(records[6].rolling_mean, Some(4.0));
        assert_eq!(records[7].rolling_mean, Some(5.0));
    }

    #[test]
    fn test_weekly_summary() {
        let actual = vec![1.0; 9];
        let predicted = vec![2.0; 9];
        let records = build_prediction_records(&dates(9), &actual, &predicted, 7).unwrap();
        let summary = summarize(&records, Frequency::Week).unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].actual, 7.0);
        assert_eq!(summary[0].predicted, 14.0);
        assert_eq!(summary[1].period, NaiveDate::from_ymd_opt(2021, 3, 8).unwrap());
        assert_eq!(summary[1].actual, 2.0);
    }
}
