pub mod forecast;

pub use forecast::ErrorMetrics;
