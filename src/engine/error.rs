use {
    std::{error::Error, fmt},
    strum_macros::{Display, EnumIter},
};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Stage {
    #[strum(to_string = "data retrieval")]
    DataRetrieval,
    #[strum(to_string = "labeling")]
    Labeling,
    #[strum(to_string = "splitting")]
    Splitting,
    #[strum(to_string = "training")]
    Training,
    #[strum(to_string = "evaluation")]
    Evaluation,
    #[strum(to_string = "backtesting")]
    Backtesting,
}

/// The two halves a split produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Segment {
    #[strum(to_string = "training")]
    Train,
    #[strum(to_string = "test")]
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The source range produced no usable rows.
    NoData,
    InsufficientData { required: usize, available: usize },
    LengthMismatch { expected: usize, found: usize },
    /// The split left one side without rows.
    EmptySegment(Segment),
    /// Network, HTTP or parse failure, already formatted with its context chain.
    Source(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            FailureKind::NoData => write!(f, "no usable price data"),
            FailureKind::InsufficientData {
                required,
                available,
            } => write!(
                f,
                "insufficient data: need at least {} rows, found {}",
                required, available
            ),
            FailureKind::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {} rows, found {}", expected, found)
            }
            FailureKind::EmptySegment(segment) => {
                write!(f, "the {} segment has no rows", segment)
            }
            FailureKind::Source(msg) => write!(f, "{}", msg),
        }
    }
}

/// A halted run, naming the stage that stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    pub stage: Stage,
    pub kind: FailureKind,
}

impl PipelineError {
    pub fn new(stage: Stage, kind: FailureKind) -> Self {
        Self { stage, kind }
    }

    pub fn insufficient(stage: Stage, required: usize, available: usize) -> Self {
        Self::new(
            stage,
            FailureKind::InsufficientData {
                required,
                available,
            },
        )
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.kind)
    }
}

impl Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_message_names_the_stage() {
        let err = PipelineError::insufficient(Stage::Training, 5, 3);
        assert_eq!(
            err.to_string(),
            "training failed: insufficient data: need at least 5 rows, found 3"
        );
        assert_eq!(
            PipelineError::new(Stage::DataRetrieval, FailureKind::NoData).to_string(),
            "data retrieval failed: no usable price data"
        );
        assert_eq!(
            PipelineError::new(Stage::Splitting, FailureKind::EmptySegment(Segment::Test))
                .to_string(),
            "splitting failed: the test segment has no rows"
        );
    }

    #[test]
    fn test_stages_in_order() {
        let names: Vec<String> = Stage::iter().map(|s| s.to_string()).collect();
        assert_eq!(names.first().map(String::as_str), Some("data retrieval"));
        assert_eq!(names.last().map(String::as_str), Some("backtesting"));
        assert_eq!(names.len(), 6);
    }
}
