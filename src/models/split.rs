use crate::{config::SplitPolicy, models::LabeledDataset};

/// Disjoint, order-preserving train and test segments.
#[derive(Debug, Clone)]
pub struct Split {
    pub train: LabeledDataset,
    pub test: LabeledDataset,
    pub policy: SplitPolicy,
}

impl Split {
    /// Share of the split rows that went to training.
    pub fn train_share(&self) -> f64 {
        let total = self.train.len() + self.test.len();
        if total == 0 {
            return 0.0;
        }
        self.train.len() as f64 / total as f64
    }
}
