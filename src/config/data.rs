use super::traits::{invalid, ConfigSection};
use crate::error::FootfallError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub input: Option<PathBuf>,
    pub date_column: String,
    pub date_format: String,
    pub target_column: String,
    /// Covariate columns to keep; empty keeps every other numeric column.
    pub covariates: Vec<String>,
    pub calendar_dummies: bool,
    /// Single-column CSV of bank holiday dates, flagged as `bank_hols`.
    pub holidays: Option<PathBuf>,
    pub min_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: None,
            date_column: "date".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            target_column: "count".to_string(),
            covariates: Vec::new(),
            calendar_dummies: false,
            holidays: None,
            min_rows: 30,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), FootfallError> {
        if self.date_column.trim().is_empty() {
            return Err(invalid(Self::section_name(), "date_column must not be empty"));
        }
        if self.target_column.trim().is_empty() {
            return Err(invalid(Self::section_name(), "target_column must not be empty"));
        }
        if self.date_format.trim().is_empty() {
            return Err(invalid(Self::section_name(), "date_format must not be empty"));
        }
        if self.covariates.iter().any(|c| c == &self.target_column) {
            return Err(invalid(
                Self::section_name(),
                "target_column cannot also be listed as a covariate",
            ));
        }
        Ok(())
    }
}
