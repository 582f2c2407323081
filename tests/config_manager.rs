use footfall::config::{AppConfig, ConfigManager, ConfigSection, ForecastConfig};
use footfall::data::Frequency;
use footfall::ml::models::{MaxFeatures, SeedPolicy};
use footfall::FootfallError;
use std::path::PathBuf;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("footfall_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.forecast.n_in, 1);
    assert_eq!(config.outliers.threshold, 3.5);
    assert_eq!(config.output.summary_frequency, Some(Frequency::Week));
}

#[test]
fn test_load_partial_toml() {
    let path = temp_file(
        "partial.toml",
        r#"
[data]
target_column = "footfall"
covariates = ["mean_temp", "rain"]

[forecast]
n_in = 7
tree_count = 250
random_seed = 42
seed_policy = "advance_per_step"
max_features = "sqrt"
scale_columns = ["mean_temp"]
"#,
    );

    let config = ConfigManager::load(Some(&path)).unwrap().into_inner();

    assert_eq!(config.data.target_column, "footfall");
    assert_eq!(config.data.covariates, vec!["mean_temp", "rain"]);
    assert_eq!(config.forecast.n_in, 7);
    assert_eq!(config.forecast.tree_count, 250);
    assert_eq!(config.forecast.random_seed, Some(42));
    assert_eq!(config.forecast.seed_policy, SeedPolicy::AdvancePerStep);
    assert_eq!(config.forecast.max_features, MaxFeatures::Sqrt);
    // Untouched sections keep their defaults.
    assert_eq!(config.forecast.n_test, 365);
    assert!(config.outliers.enabled);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_file("bad.toml", "[forecast]\nn_in = 0\n");

    let result = ConfigManager::load(Some(&path));
    assert!(matches!(result, Err(FootfallError::Configuration(_))));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("footfall_does_not_exist.toml");
    assert!(ConfigManager::load(Some(&path)).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let path = temp_file("env.toml", "[output]\nrolling_window = 3\n");
    std::env::set_var("FOOTFALL__OUTPUT__ROLLING_WINDOW", "14");

    let config = ConfigManager::load(Some(&path)).unwrap().into_inner();
    std::env::remove_var("FOOTFALL__OUTPUT__ROLLING_WINDOW");

    assert_eq!(config.output.rolling_window, 14);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_saved_defaults_load_back() {
    let path = std::env::temp_dir()
        .join(format!("footfall_{}_saved", std::process::id()))
        .join("footfall.toml");
    ConfigManager::new().save_to_file(&path).unwrap();

    let config = ConfigManager::load(Some(&path)).unwrap().into_inner();
    assert_eq!(config.forecast.tree_count, 100);
    assert_eq!(config.data.date_column, "date");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_update_rejects_invalid_edit() {
    let mut manager = ConfigManager::new();

    let result = manager.update(|cfg| cfg.forecast.tree_count = 0);
    assert!(result.is_err());
    assert_eq!(manager.get().forecast.tree_count, 100);

    manager.update(|cfg| cfg.forecast.n_test = 30).unwrap();
    assert_eq!(manager.get().forecast.n_test, 30);
}

#[test]
fn test_forecast_validation() {
    let zero_test = ForecastConfig {
        n_test: 0,
        ..ForecastConfig::default()
    };
    assert!(zero_test.validate().is_err());

    let bad_fraction = ForecastConfig {
        max_features: MaxFeatures::Fraction(1.5),
        ..ForecastConfig::default()
    };
    assert!(bad_fraction.validate().is_err());
}
