pub mod base;
pub mod holdout;
pub mod types;

pub use base::FoldSplitter;
pub use holdout::HoldoutSplitter;
pub use types::Fold;
