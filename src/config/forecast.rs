use super::traits::{invalid, ConfigSection};
use crate::error::FootfallError;
use crate::ml::models::{ForestParams, MaxFeatures, SeedPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Lag depth of the supervised window.
    pub n_in: usize,
    /// Length of the held-out walk-forward horizon.
    pub n_test: usize,
    pub tree_count: usize,
    /// Columns to min-max scale per fold. A source column name such as
    /// `mean_temp` selects all of its lag and current-step columns.
    pub scale_columns: Vec<String>,
    pub random_seed: Option<u64>,
    pub seed_policy: SeedPolicy,
    pub max_features: MaxFeatures,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_depth: Option<usize>,
    pub bootstrap: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            n_in: 1,
            n_test: 365,
            tree_count: 100,
            scale_columns: Vec::new(),
            random_seed: None,
            seed_policy: SeedPolicy::SameEveryStep,
            max_features: MaxFeatures::All,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_depth: None,
            bootstrap: true,
        }
    }
}

impl ForecastConfig {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            tree_count: self.tree_count,
            max_features: self.max_features,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_depth: self.max_depth,
            bootstrap: self.bootstrap,
            seed: self.random_seed,
        }
    }
}

impl ConfigSection for ForecastConfig {
    fn section_name() -> &'static str {
        "forecast"
    }

    fn validate(&self) -> Result<(), FootfallError> {
        if self.n_in == 0 {
            return Err(invalid(Self::section_name(), "n_in (lag depth) must be at least 1"));
        }
        if self.n_test == 0 {
            return Err(invalid(Self::section_name(), "n_test must be at least 1"));
        }
        if self.tree_count == 0 {
            return Err(invalid(Self::section_name(), "tree_count must be at least 1"));
        }
        if self.min_samples_split < 2 {
            return Err(invalid(Self::section_name(), "min_samples_split must be at least 2"));
        }
        if self.min_samples_leaf == 0 {
            return Err(invalid(Self::section_name(), "min_samples_leaf must be at least 1"));
        }
        if let MaxFeatures::Fraction(fraction) = self.max_features {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(invalid(
                    Self::section_name(),
                    "max_features fraction must be within (0, 1]",
                ));
            }
        }
        if self.max_depth == Some(0) {
            return Err(invalid(Self::section_name(), "max_depth must be at least 1"));
        }
        Ok(())
    }
}
