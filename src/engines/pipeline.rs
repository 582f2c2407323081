use crate::config::{ConfigSection, ForecastConfig, OutlierConfig};
use crate::engines::evaluation::{build_prediction_records, WalkForwardEvaluator};
use crate::engines::metrics::ErrorMetrics;
use crate::engines::scaling::{expand_scale_columns, MinMaxScaler};
use crate::engines::splitters::{FoldSplitter, HoldoutSplitter};
use crate::error::Result;
use crate::ml::features::{arrange_target_last, series_to_supervised};
use crate::ml::filtering::{OutlierFilter, OutlierReport};
use crate::ml::models::{importance_report, ForestFactory};
use crate::types::{ImportanceRecord, PredictionRecord, TimeSeriesFrame};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Steps ahead of each supervised row; the forecaster is one-step-ahead.
const N_OUT: usize = 1;

/// Everything one walk-forward run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkForwardReport {
    pub n_in: usize,
    pub tree_count: usize,
    pub metrics: ErrorMetrics,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub predictions: Vec<PredictionRecord>,
    pub importances: Vec<ImportanceRecord>,
    pub outliers: Option<OutlierReport>,
}

/// Outlier removal, windowing, split, scaling and walk-forward evaluation in one call.
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    forecast: ForecastConfig,
    outliers: OutlierConfig,
    rolling_window: usize,
}

impl ForecastPipeline {
    pub fn new(forecast: ForecastConfig, outliers: OutlierConfig) -> Self {
        Self {
            forecast,
            outliers,
            rolling_window: 7,
        }
    }

    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    pub fn forecast_config(&self) -> &ForecastConfig {
        &self.forecast
    }

    pub fn run(&self, frame: &TimeSeriesFrame) -> Result<WalkForwardReport> {
        let cfg = &self.forecast;
        cfg.validate()?;
        self.outliers.validate()?;
        info!(
            "Validation has started on {} trees with {} time lag(s)",
            cfg.tree_count, cfg.n_in
        );

        let (frame, outliers) = if self.outliers.enabled {
            let target = frame.target_name()?;
            let (filtered, report) =
                OutlierFilter::new(self.outliers.threshold).filter(frame, &target)?;
            (filtered, Some(report))
        } else {
            (frame.clone(), None)
        };

        let supervised = series_to_supervised(&frame, cfg.n_in, N_OUT, true)?;
        let fold = HoldoutSplitter::new(cfg.n_test).split(&supervised)?;

        let scale_columns = expand_scale_columns(
            &cfg.scale_columns,
            &frame.column_names(),
            &supervised.column_names(),
            cfg.n_in,
            N_OUT,
        )?;
        let fold = if scale_columns.is_empty() {
            fold
        } else {
            MinMaxScaler::fit_transform_fold(&fold, &scale_columns)?.0
        };

        let train = arrange_target_last(&fold.train, cfg.n_in)?;
        let test = arrange_target_last(&fold.test, cfg.n_in)?;

        let factory = ForestFactory::new(cfg.forest_params(), cfg.seed_policy);
        let run = WalkForwardEvaluator::new().evaluate(&train, &test, &factory)?;

        let predictions = build_prediction_records(
            test.dates(),
            &run.actual,
            &run.predicted,
            self.rolling_window,
        )?;
        let importances = match &run.importances {
            Some(weights) => importance_report(weights, &run.feature_names, cfg.n_in)?,
            None => Vec::new(),
        };

        info!(
            "Validation finished for {} trees with {} time lag(s): MAE {:.3}",
            cfg.tree_count, cfg.n_in, run.metrics.mae
        );

        Ok(WalkForwardReport {
            n_in: cfg.n_in,
            tree_count: cfg.tree_count,
            metrics: run.metrics,
            actual: run.actual,
            predicted: run.predicted,
            predictions,
            importances,
            outliers,
        })
    }

    /// Run every `(lag depth, tree count)` combination in parallel, best MAE first.
    pub fn sweep(
        &self,
        frame: &TimeSeriesFrame,
        lags: &[usize],
        trees: &[usize],
    ) -> Result<Vec<WalkForwardReport>> {
        let combinations: Vec<(usize, usize)> = lags
            .iter()
            .flat_map(|&n_in| trees.iter().map(move |&tree_count| (n_in, tree_count)))
            .collect();
        info!("Sweeping {} configurations", combinations.len());

        let mut reports = combinations
            .into_par_iter()
            .map(|(n_in, tree_count)| {
                let pipeline = ForecastPipeline {
                    forecast: ForecastConfig {
                        n_in,
                        tree_count,
                        ..self.forecast.clone()
                    },
                    outliers: self.outliers.clone(),
                    rolling_window: self.rolling_window,
                };
                pipeline.run(frame)
            })
            .collect::<Result<Vec<_>>>()?;

        reports.sort_by(|a, b| {
            a.metrics
                .mae
                .partial_cmp(&b.metrics.mae)
                .unwrap_or(Ordering::Equal)
        });
        Ok(reports)
    }
}
