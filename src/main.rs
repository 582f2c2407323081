use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use footfall::config::{AppConfig, ConfigManager};
use footfall::data::export::{write_importance_csv, write_metrics_json, write_predictions_csv};
use footfall::data::{percent_change, CsvConnector, Frequency};
use footfall::engines::evaluation::summarize;
use footfall::{ForecastPipeline, WalkForwardReport};
use log::info;
use std::path::PathBuf;

const APP_ABOUT: &str = "Walk-forward random forest forecasts of daily footfall";

#[derive(Parser, Debug)]
#[command(name = "footfall", about = APP_ABOUT)]
struct Args {
    /// TOML configuration; `FOOTFALL__<SECTION>__<KEY>` variables override it.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one configuration and write its outputs.
    Evaluate {
        #[arg(short = 'i', long = "input", value_name = "PATH")]
        input: Option<PathBuf>,
        #[arg(long = "predictions-csv", value_name = "PATH")]
        predictions_csv: Option<PathBuf>,
        #[arg(long = "importance-csv", value_name = "PATH")]
        importance_csv: Option<PathBuf>,
        #[arg(long = "metrics-json", value_name = "PATH")]
        metrics_json: Option<PathBuf>,
        /// Lag depth.
        #[arg(long = "n-in")]
        n_in: Option<usize>,
        /// Days held out for walk-forward testing.
        #[arg(long = "n-test")]
        n_test: Option<usize>,
        #[arg(long = "trees")]
        trees: Option<usize>,
        #[arg(long = "seed")]
        seed: Option<u64>,
        /// Period of the actual vs predicted summary: day, week, month or year.
        #[arg(long = "summary")]
        summary: Option<String>,
        /// Keep outlier days in the training data.
        #[arg(long = "keep-outliers")]
        keep_outliers: bool,
    },
    /// Compare lag depths and tree counts, best MAE first.
    Sweep {
        #[arg(short = 'i', long = "input", value_name = "PATH")]
        input: Option<PathBuf>,
        #[arg(long = "lags", value_delimiter = ',', default_value = "1,3,7")]
        lags: Vec<usize>,
        #[arg(long = "trees", value_delimiter = ',', default_value = "100")]
        trees: Vec<usize>,
        #[arg(long = "metrics-json", value_name = "PATH")]
        metrics_json: Option<PathBuf>,
    },
    /// Write the default configuration as TOML.
    InitConfig {
        #[arg(value_name = "PATH", default_value = "footfall.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::InitConfig { path } => {
            ConfigManager::new()
                .save_to_file(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote default configuration to {}", path.display());
        }
        Command::Evaluate {
            input,
            predictions_csv,
            importance_csv,
            metrics_json,
            n_in,
            n_test,
            trees,
            seed,
            summary,
            keep_outliers,
        } => {
            let summary = summary
                .map(|s| s.parse::<Frequency>())
                .transpose()
                .context("parsing --summary")?;
            let mut manager = load_config(args.config)?;
            manager
                .update(|cfg| {
                    cfg.data.input = input.or(cfg.data.input.take());
                    cfg.output.predictions_csv =
                        predictions_csv.or(cfg.output.predictions_csv.take());
                    cfg.output.importance_csv =
                        importance_csv.or(cfg.output.importance_csv.take());
                    cfg.output.metrics_json = metrics_json.or(cfg.output.metrics_json.take());
                    cfg.forecast.n_in = n_in.unwrap_or(cfg.forecast.n_in);
                    cfg.forecast.n_test = n_test.unwrap_or(cfg.forecast.n_test);
                    cfg.forecast.tree_count = trees.unwrap_or(cfg.forecast.tree_count);
                    cfg.forecast.random_seed = seed.or(cfg.forecast.random_seed);
                    if summary.is_some() {
                        cfg.output.summary_frequency = summary;
                    }
                    if keep_outliers {
                        cfg.outliers.enabled = false;
                    }
                })
                .context("applying command-line overrides")?;
            evaluate(manager.get())?;
        }
        Command::Sweep {
            input,
            lags,
            trees,
            metrics_json,
        } => {
            let mut manager = load_config(args.config)?;
            manager
                .update(|cfg| {
                    cfg.data.input = input.or(cfg.data.input.take());
                    cfg.output.metrics_json = metrics_json.or(cfg.output.metrics_json.take());
                })
                .context("applying command-line overrides")?;
            sweep(manager.get(), &lags, &trees)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ConfigManager> {
    ConfigManager::load(path.as_deref()).context("loading configuration")
}

fn pipeline(cfg: &AppConfig) -> ForecastPipeline {
    ForecastPipeline::new(cfg.forecast.clone(), cfg.outliers.clone())
        .with_rolling_window(cfg.output.rolling_window)
}

fn evaluate(cfg: &AppConfig) -> Result<()> {
    let (frame, _) = CsvConnector::load_configured(&cfg.data).context("loading input data")?;
    let report = pipeline(cfg).run(&frame).context("walk-forward evaluation")?;

    info!(
        "{} lag(s), {} trees: MAE {:.3}, MSE {:.3}, RMSE {:.3}",
        report.n_in, report.tree_count, report.metrics.mae, report.metrics.mse, report.metrics.rmse
    );
    for record in report.importances.iter().take(10) {
        info!("  {:<16} {:.4}", record.feature, record.importance);
    }
    if let Some(frequency) = cfg.output.summary_frequency {
        log_summary(&report, frequency)?;
    }

    if let Some(path) = &cfg.output.predictions_csv {
        write_predictions_csv(path, &report.predictions)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cfg.output.importance_csv {
        write_importance_csv(path, &report.importances)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cfg.output.metrics_json {
        write_metrics_json(path, std::slice::from_ref(&report))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn sweep(cfg: &AppConfig, lags: &[usize], trees: &[usize]) -> Result<()> {
    let (frame, _) = CsvConnector::load_configured(&cfg.data).context("loading input data")?;
    let reports = pipeline(cfg).sweep(&frame, lags, trees).context("configuration sweep")?;

    for report in &reports {
        info!(
            "n_in={:<3} trees={:<4} MAE={:.3} MSE={:.3}",
            report.n_in, report.tree_count, report.metrics.mae, report.metrics.mse
        );
    }
    if let Some(path) = &cfg.output.metrics_json {
        write_metrics_json(path, &reports).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn log_summary(report: &WalkForwardReport, frequency: Frequency) -> Result<()> {
    let periods = summarize(&report.predictions, frequency)?;
    let predicted: Vec<f64> = periods.iter().map(|p| p.predicted).collect();
    let changes = percent_change(&predicted);

    info!("Actual vs predicted per {}:", frequency);
    for (period, change) in periods.iter().zip(changes) {
        let change = change.map_or_else(|| "-".to_string(), |c| format!("{:+.1}%", c));
        info!(
            "  {}  actual {:>10.0}  predicted {:>10.0}  ({})",
            period.period, period.actual, period.predicted, change
        );
    }
    Ok(())
}
