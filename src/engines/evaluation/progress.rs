use log::{debug, info};

/// Observer of a walk-forward run.
pub trait ProgressCallback {
    fn on_run_start(&mut self, _train_rows: usize, _total_steps: usize) {}

    fn on_step_complete(
        &mut self,
        _step: usize,
        _total_steps: usize,
        _actual: f64,
        _predicted: f64,
    ) {
    }

    fn on_run_complete(&mut self, _mae: f64, _mse: f64) {}
}

/// Reports progress through the `log` facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_run_start(&mut self, train_rows: usize, total_steps: usize) {
        info!(
            "Walk-forward evaluation: {} training rows, {} steps",
            train_rows, total_steps
        );
    }

    fn on_step_complete(&mut self, step: usize, total_steps: usize, actual: f64, predicted: f64) {
        debug!(
            "Step {}/{}: expected={:.1}, predicted={:.1}",
            step + 1,
            total_steps,
            actual,
            predicted
        );
    }

    fn on_run_complete(&mut self, mae: f64, mse: f64) {
        info!("Walk-forward complete. MAE: {:.3}, MSE: {:.3}", mae, mse);
    }
}
