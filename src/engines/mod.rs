pub mod evaluation;
pub mod metrics;
pub mod pipeline;
pub mod scaling;
pub mod splitters;

pub use pipeline::{ForecastPipeline, WalkForwardReport};
