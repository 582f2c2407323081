mod csv;
mod types;
mod validator;

pub use csv::{CsvConnector, HOLIDAY_COLUMN};
pub use types::{DatasetMetadata, SkipReason};
pub use validator::DataValidator;
