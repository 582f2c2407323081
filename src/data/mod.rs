pub mod connectors;
pub mod export;
pub mod resample;

pub use connectors::{CsvConnector, DataValidator, DatasetMetadata};
pub use resample::{percent_change, resample, Aggregation, Frequency};
