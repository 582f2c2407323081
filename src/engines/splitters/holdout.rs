use super::base::FoldSplitter;
use super::types::Fold;
use crate::error::{FootfallError, Result};
use crate::types::SupervisedFrame;
use log::debug;

/// Holds out the final `n_test` rows.
pub struct HoldoutSplitter {
    n_test: usize,
}

impl HoldoutSplitter {
    pub fn new(n_test: usize) -> Self {
        Self { n_test }
    }

    pub fn n_test(&self) -> usize {
        self.n_test
    }
}

impl FoldSplitter for HoldoutSplitter {
    fn split(&self, data: &SupervisedFrame) -> Result<Fold> {
        let total_rows = data.len();
        if self.n_test == 0 || self.n_test >= total_rows {
            return Err(FootfallError::InputShape(format!(
                "Invalid split: {} test rows requested from {} rows, \
                 need at least one row on each side",
                self.n_test, total_rows
            )));
        }

        let train_rows = total_rows - self.n_test;
        let fold = Fold {
            train: data.slice(0, train_rows),
            test: data.slice(train_rows, self.n_test),
        };
        debug!(
            "Split {} rows into {} train (to {:?}) and {} test (from {:?})",
            total_rows,
            train_rows,
            fold.train_end(),
            self.n_test,
            fold.test_start()
        );
        Ok(fold)
    }
}
