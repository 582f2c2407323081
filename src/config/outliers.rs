use super::traits::{invalid, ConfigSection};
use crate::error::FootfallError;
use crate::ml::filtering::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    pub enabled: bool,
    /// Modified z-score above which a day is dropped.
    pub threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ConfigSection for OutlierConfig {
    fn section_name() -> &'static str {
        "outliers"
    }

    fn validate(&self) -> Result<(), FootfallError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(invalid(Self::section_name(), "threshold must be a positive number"));
        }
        Ok(())
    }
}
