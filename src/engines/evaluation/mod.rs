pub mod predictions;
pub mod progress;
pub mod walk_forward;

pub use predictions::{build_prediction_records, summarize, PeriodSummary};
pub use progress::{LogProgressCallback, ProgressCallback};
pub use walk_forward::{History, WalkForwardEvaluator, WalkForwardRun};
