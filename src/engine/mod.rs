mod backtester;
mod error;
mod evaluator;
mod labeling;
mod messages;
mod pipeline;
mod splitter;
mod trainer;
mod worker;

pub use {
    backtester::run_backtest,
    error::{FailureKind, PipelineError, Segment, Stage},
    evaluator::evaluate,
    labeling::build_labels,
    messages::{FetchRequest, FetchResult},
    pipeline::{PipelineRun, classify_source_result, run_from_source, run_pipeline},
    splitter::split_dataset,
    trainer::{TrainingOutput, train},
    worker::spawn_fetch_worker,
};
