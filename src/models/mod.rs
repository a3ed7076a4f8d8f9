mod backtest;
mod dataset;
mod evaluation;
mod knn;
mod scaler;
mod split;
mod trained;

pub use {
    backtest::{BacktestReport, BacktestRow, BacktestSummary},
    dataset::{LabeledDataset, LabeledRow},
    evaluation::{ConfusionMatrix, EvaluationResult},
    knn::KnnClassifier,
    scaler::StandardScaler,
    split::Split,
    trained::TrainedModel,
};
