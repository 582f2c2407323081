use crate::engines::WalkForwardReport;
use crate::error::Result;
use crate::types::{ImportanceRecord, PredictionRecord};
use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Headline numbers of one run, as written to the metrics JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub n_in: usize,
    pub tree_count: usize,
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub predictions: usize,
    pub outliers_removed: usize,
}

impl From<&WalkForwardReport> for MetricsSummary {
    fn from(report: &WalkForwardReport) -> Self {
        Self {
            n_in: report.n_in,
            tree_count: report.tree_count,
            mae: report.metrics.mae,
            mse: report.metrics.mse,
            rmse: report.metrics.rmse,
            predictions: report.predictions.len(),
            outliers_removed: report.outliers.as_ref().map_or(0, |o| o.removed_count),
        }
    }
}

pub fn predictions_frame(records: &[PredictionRecord]) -> Result<DataFrame> {
    let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
    let actual: Vec<f64> = records.iter().map(|r| r.actual).collect();
    let predicted: Vec<f64> = records.iter().map(|r| r.predicted).collect();
    let rolling: Vec<Option<f64>> = records.iter().map(|r| r.rolling_mean).collect();

    Ok(DataFrame::new(vec![
        Column::new("date".into(), dates),
        Column::new("actual".into(), actual),
        Column::new("predicted".into(), predicted),
        Column::new("roll_7_mean".into(), rolling),
    ])?)
}

pub fn importance_frame(records: &[ImportanceRecord]) -> Result<DataFrame> {
    let names: Vec<String> = records.iter().map(|r| r.feature.clone()).collect();
    let weights: Vec<f64> = records.iter().map(|r| r.importance).collect();
    let lags: Vec<u64> = records.iter().map(|r| r.lag_depth as u64).collect();

    Ok(DataFrame::new(vec![
        Column::new("feature_name".into(), names),
        Column::new("importance".into(), weights),
        Column::new("lag_depth".into(), lags),
    ])?)
}

/// `date,actual,predicted,roll_7_mean`
pub fn write_predictions_csv<P: AsRef<Path>>(path: P, records: &[PredictionRecord]) -> Result<()> {
    let mut df = predictions_frame(records)?;
    write_csv(path.as_ref(), &mut df)
}

/// `feature_name,importance,lag_depth`
pub fn write_importance_csv<P: AsRef<Path>>(path: P, records: &[ImportanceRecord]) -> Result<()> {
    let mut df = importance_frame(records)?;
    write_csv(path.as_ref(), &mut df)
}

pub fn write_metrics_json<P: AsRef<Path>>(path: P, reports: &[WalkForwardReport]) -> Result<()> {
    let summaries: Vec<MetricsSummary> = reports.iter().map(MetricsSummary::from).collect();
    create_parent(path.as_ref())?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &summaries)?;
    info!("Wrote metrics for {} run(s) to {}", summaries.len(), path.as_ref().display());
    Ok(())
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    create_parent(path)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
