pub mod forest;
pub mod importance;
pub mod regressor;
mod tree;

pub use forest::{ForestParams, MaxFeatures, RandomForest};
pub use importance::importance_report;
pub use regressor::{ForestFactory, Regressor, RegressorFactory, SeedPolicy};
