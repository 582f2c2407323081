pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod ml;
pub mod types;

pub use engines::{ForecastPipeline, WalkForwardReport};
pub use error::{FootfallError, Result};
pub use types::{ImportanceRecord, PredictionRecord, SupervisedFrame, TimeSeriesFrame};
