use super::forest::{ForestParams, RandomForest};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Any model that can be refitted from scratch and predict one row at a time.
pub trait Regressor: Send {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    fn predict(&self, row: &[f64]) -> Result<f64>;

    /// Per-feature weights in training column order, once fitted.
    fn feature_importances(&self) -> Option<Vec<f64>> {
        None
    }
}

/// Builds the fresh, unfitted model used at each walk-forward step.
pub trait RegressorFactory: Sync {
    type Model: Regressor;

    fn build(&self, step: usize) -> Self::Model;
}

/// How the forest seed evolves across walk-forward steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Every refit uses the configured seed.
    #[default]
    SameEveryStep,
    /// Step `i` uses `seed + i * tree_count`, so no two steps share tree seeds.
    AdvancePerStep,
}

#[derive(Debug, Clone)]
pub struct ForestFactory {
    params: ForestParams,
    policy: SeedPolicy,
}

impl ForestFactory {
    pub fn new(params: ForestParams, policy: SeedPolicy) -> Self {
        Self { params, policy }
    }

    pub fn seed_for_step(&self, step: usize) -> Option<u64> {
        self.params.seed.map(|seed| match self.policy {
            SeedPolicy::SameEveryStep => seed,
            SeedPolicy::AdvancePerStep => {
                seed.wrapping_add((step as u64).wrapping_mul(self.params.tree_count as u64))
            }
        })
    }
}

impl RegressorFactory for ForestFactory {
    type Model = RandomForest;

    fn build(&self, step: usize) -> RandomForest {
        RandomForest::new(ForestParams {
            seed: self.seed_for_step(step),
            ..self.params.clone()
        })
    }
}
