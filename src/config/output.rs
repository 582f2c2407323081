use super::traits::{invalid, ConfigSection};
use crate::data::resample::Frequency;
use crate::error::FootfallError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub predictions_csv: Option<PathBuf>,
    pub importance_csv: Option<PathBuf>,
    pub metrics_json: Option<PathBuf>,
    /// Period used to log actual vs predicted totals after a run.
    pub summary_frequency: Option<Frequency>,
    /// Trailing window of the rolling mean attached to each prediction.
    pub rolling_window: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            predictions_csv: None,
            importance_csv: None,
            metrics_json: None,
            summary_frequency: Some(Frequency::Week),
            rolling_window: 7,
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), FootfallError> {
        if self.rolling_window == 0 {
            return Err(invalid(Self::section_name(), "rolling_window must be at least 1"));
        }
        Ok(())
    }
}
