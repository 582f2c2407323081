use thiserror::Error;

#[derive(Error, Debug)]
pub enum FootfallError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input shape error: {0}")]
    InputShape(String),

    #[error("Data quality error: {0}")]
    DataQuality(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Training failed at walk-forward step {step}: {message}")]
    Training { step: usize, message: String },

    #[error("Invalid time frequency '{0}': expected 'day', 'week', 'month' or 'year'")]
    InvalidFrequency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, FootfallError>;
