use crate::types::SupervisedFrame;
use chrono::NaiveDate;

/// Chronological train/test partition; every test date follows every train date.
#[derive(Debug, Clone)]
pub struct Fold {
    pub train: SupervisedFrame,
    pub test: SupervisedFrame,
}

impl Fold {
    pub fn train_end(&self) -> Option<NaiveDate> {
        self.train.dates().last().copied()
    }

    pub fn test_start(&self) -> Option<NaiveDate> {
        self.test.dates().first().copied()
    }
}
