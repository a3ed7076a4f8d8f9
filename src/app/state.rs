use crate::{
    domain::FetchKey,
    engine::{PipelineError, PipelineRun},
};

#[derive(Default)]
pub(crate) enum AppState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting on the fetch worker.
    Fetching { key: FetchKey },
    Ready(Box<PipelineRun>),
    Failed(PipelineError),
}

impl AppState {
    pub(crate) fn is_fetching(&self) -> bool {
        matches!(self, AppState::Fetching { .. })
    }

    pub(crate) fn run(&self) -> Option<&PipelineRun> {
        match self {
            AppState::Ready(run) => Some(run),
            _ => None,
        }
    }
}
