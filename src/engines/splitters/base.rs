use super::types::Fold;
use crate::error::Result;
use crate::types::SupervisedFrame;

pub trait FoldSplitter: Send + Sync {
    /// Split a supervised table into a chronological train/test fold
    fn split(&self, data: &SupervisedFrame) -> Result<Fold>;
}
