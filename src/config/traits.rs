use crate::error::FootfallError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), FootfallError>;
}

/// Shorthand for the error every section reports on a bad value.
pub(crate) fn invalid(section: &str, message: impl Into<String>) -> FootfallError {
    FootfallError::Configuration(format!("[{}] {}", section, message.into()))
}
