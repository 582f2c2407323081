use super::progress::{LogProgressCallback, ProgressCallback};
use crate::engines::metrics::ErrorMetrics;
use crate::error::{FootfallError, Result};
use crate::ml::models::{Regressor, RegressorFactory};
use crate::types::SupervisedFrame;

/// Rows the model may learn from, split into inputs and the last-column target.
#[derive(Debug, Clone, Default)]
pub struct History {
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl History {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut history = Self::default();
        for row in rows {
            let (features, target) = split_row(row)?;
            history.push(features, target);
        }
        Ok(history)
    }

    pub fn push(&mut self, features: Vec<f64>, target: f64) {
        self.features.push(features);
        self.targets.push(target);
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct WalkForwardRun {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub metrics: ErrorMetrics,
    /// Feature columns in training order (every column but the target).
    pub feature_names: Vec<String>,
    /// Importances of the model fitted at the final step.
    pub importances: Option<Vec<f64>>,
}

/// One-step-ahead evaluation that refits a fresh model before every test row
/// and then reveals that row to the history.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkForwardEvaluator;

impl WalkForwardEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate<F: RegressorFactory>(
        &self,
        train: &SupervisedFrame,
        test: &SupervisedFrame,
        factory: &F,
    ) -> Result<WalkForwardRun> {
        self.evaluate_with_progress(train, test, factory, &mut LogProgressCallback)
    }

    pub fn evaluate_with_progress<F: RegressorFactory>(
        &self,
        train: &SupervisedFrame,
        test: &SupervisedFrame,
        factory: &F,
        progress: &mut dyn ProgressCallback,
    ) -> Result<WalkForwardRun> {
        let columns = train.column_names();
        if columns != test.column_names() {
            return Err(FootfallError::InputShape(
                "Train and test tables have different columns".to_string(),
            ));
        }
        if columns.len() < 2 {
            return Err(FootfallError::InputShape(
                "Need at least one feature column before the target".to_string(),
            ));
        }
        if train.is_empty() {
            return Err(FootfallError::InputShape("Training table is empty".to_string()));
        }
        let feature_names = columns[..columns.len() - 1].to_vec();

        let mut history = History::from_rows(train.rows()?)?;
        let test_rows = test.rows()?;
        let total_steps = test_rows.len();
        progress.on_run_start(history.len(), total_steps);

        let mut actual = Vec::with_capacity(total_steps);
        let mut predicted = Vec::with_capacity(total_steps);
        let mut importances = None;

        for (step, row) in test_rows.into_iter().enumerate() {
            let (features, expected) = split_row(row)?;

            let mut model = factory.build(step);
            model
                .fit(history.features(), history.targets())
                .map_err(|e| training_error(step, e))?;
            let yhat = model.predict(&features).map_err(|e| training_error(step, e))?;

            predicted.push(yhat);
            actual.push(expected);
            importances = model.feature_importances();
            history.push(features, expected);

            progress.on_step_complete(step, total_steps, expected, yhat);
        }

        let metrics = ErrorMetrics::calculate(&actual, &predicted)?;
        progress.on_run_complete(metrics.mae, metrics.mse);

        Ok(WalkForwardRun {
            actual,
            predicted,
            metrics,
            feature_names,
            importances,
        })
    }
}

fn split_row(mut row: Vec<f64>) -> Result<(Vec<f64>, f64)> {
    let target = row
        .pop()
        .ok_or_else(|| FootfallError::InputShape("Empty row".to_string()))?;
    Ok((row, target))
}

fn training_error(step: usize, err: FootfallError) -> FootfallError {
    FootfallError::Training {
        step,
        message: err.to_string(),
    }
}
