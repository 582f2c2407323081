use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata about a loaded footfall table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Rows dropped for an unparseable date or a missing target.
    pub skipped_rows: usize,
    /// Rows dropped because an earlier row had the same date.
    pub duplicate_dates: usize,
}

/// Why a CSV row was left out of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    BadDate(String),
    MissingDate,
    MissingTarget,
}
