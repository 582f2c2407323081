use super::regressor::Regressor;
use super::tree::{RegressionTree, TreeParams};
use crate::error::{FootfallError, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of features considered at each split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    All,
    Sqrt,
    Fraction(f64),
}

impl MaxFeatures {
    pub fn resolve(&self, n_features: usize) -> usize {
        let count = match *self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Fraction(fraction) => (n_features as f64 * fraction) as usize,
        };
        count.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    pub tree_count: usize,
    pub max_features: MaxFeatures,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_depth: Option<usize>,
    pub bootstrap: bool,
    /// Tree `i` is seeded with `seed + i`. `None` draws a seed from entropy at fit time.
    pub seed: Option<u64>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            tree_count: 100,
            max_features: MaxFeatures::All,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_depth: None,
            bootstrap: true,
            seed: None,
        }
    }
}

/// Bagged ensemble of regression trees; the prediction is the mean over trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn check_training_set(&self, x: &[Vec<f64>], y: &[f64]) -> Result<usize> {
        if self.params.tree_count == 0 {
            return Err(FootfallError::Model("tree_count must be at least 1".to_string()));
        }
        if x.is_empty() {
            return Err(FootfallError::Model("Empty training set".to_string()));
        }
        if x.len() != y.len() {
            return Err(FootfallError::Model(format!(
                "{} feature rows but {} targets",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if let Some(row) = x.iter().position(|row| row.len() != n_features) {
            return Err(FootfallError::Model(format!(
                "Row {} has {} features, expected {}",
                row,
                x[row].len(),
                n_features
            )));
        }
        let finite = x.iter().flatten().chain(y).all(|v| v.is_finite());
        if !finite {
            return Err(FootfallError::Model(
                "Training data contains non-finite values".to_string(),
            ));
        }
        Ok(n_features)
    }
}

impl Regressor for RandomForest {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let n_features = self.check_training_set(x, y)?;
        let n_samples = x.len();
        let base_seed = self.params.seed.unwrap_or_else(rand::random);
        let tree_params = TreeParams {
            max_features: self.params.max_features.resolve(n_features),
            min_samples_split: self.params.min_samples_split,
            min_samples_leaf: self.params.min_samples_leaf,
            max_depth: self.params.max_depth,
        };
        let bootstrap = self.params.bootstrap;

        self.trees = (0..self.params.tree_count)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(tree_idx as u64));
                let samples: Vec<usize> = if bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                RegressionTree::fit(x, y, samples, tree_params, &mut rng)
            })
            .collect();
        self.n_features = n_features;

        debug!(
            "Fitted {} trees ({} nodes) on {} rows x {} features (seed {})",
            self.trees.len(),
            self.trees.iter().map(RegressionTree::node_count).sum::<usize>(),
            n_samples,
            n_features,
            base_seed
        );
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> Result<f64> {
        if !self.is_fitted() {
            return Err(FootfallError::Model("Model not trained yet".to_string()));
        }
        if row.len() != self.n_features {
            return Err(FootfallError::Model(format!(
                "Prediction row has {} features, model was fitted on {}",
                row.len(),
                self.n_features
            )));
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    /// Mean decrease in impurity, averaged over trees and normalized to sum to 1.
    fn feature_importances(&self) -> Option<Vec<f64>> {
        if !self.is_fitted() {
            return None;
        }
        let mut mean = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (acc, value) in mean.iter_mut().zip(tree.importances()) {
                *acc += value;
            }
        }
        let total: f64 = mean.iter().sum();
        if total > 0.0 {
            mean.iter_mut().for_each(|value| *value /= total);
        }
        Some(mean)
    }
}
