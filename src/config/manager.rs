use super::{
    data::DataConfig, forecast::ForecastConfig, outliers::OutlierConfig, output::OutputConfig,
    traits::ConfigSection,
};
use crate::error::FootfallError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `FOOTFALL__FORECAST__N_IN=7`.
pub const ENV_PREFIX: &str = "FOOTFALL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub outliers: OutlierConfig,
    pub forecast: ForecastConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FootfallError> {
        self.data.validate()?;
        self.outliers.validate()?;
        self.forecast.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then the TOML file (if any), then `FOOTFALL__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, FootfallError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(FootfallError::Configuration(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);

        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FootfallError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| FootfallError::Configuration(format!("Failed to serialize: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_str)
            .map_err(|e| FootfallError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    /// Apply an edit (e.g. command-line overrides) and re-validate.
    pub fn update<F>(&mut self, f: F) -> Result<(), FootfallError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
