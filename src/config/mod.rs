pub mod traits;
pub mod data;
pub mod outliers;
pub mod forecast;
pub mod output;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use data::DataConfig;
pub use outliers::OutlierConfig;
pub use forecast::ForecastConfig;
pub use output::OutputConfig;
pub use traits::ConfigSection;
