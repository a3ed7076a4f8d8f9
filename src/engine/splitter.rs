use crate::{
    config::{DF, SplitPolicy},
    engine::{FailureKind, PipelineError, Segment, Stage},
    models::{LabeledDataset, Split},
};

/// Divides the labeled rows without reordering them.
///
/// `YearRange` puts rows from `test_year` in the test segment and rows from the training
/// years in the train segment; a year in both goes to test only, other years are left out.
/// `Chronological` holds out the last `ceil(n * test_fraction)` rows.
///
/// Either segment coming out empty is an `EmptySegment` failure naming that side.
pub fn split_dataset(dataset: &LabeledDataset, policy: &SplitPolicy) -> Result<Split, PipelineError> {
    let (train, test) = match policy {
        SplitPolicy::YearRange {
            train_years,
            test_year,
        } => {
            let years = train_years.resolve();
            let train = dataset.filtered(|r| {
                let year = r.point.year();
                year != *test_year && years.contains(&year)
            });
            let test = dataset.filtered(|r| r.point.year() == *test_year);
            (train, test)
        }
        SplitPolicy::Chronological { test_fraction } => {
            let n = dataset.len();
            let n_test = ((n as f64) * test_fraction.value()).ceil() as usize;
            dataset.split_at(n.saturating_sub(n_test))
        }
    };

    if train.is_empty() {
        return Err(PipelineError::new(
            Stage::Splitting,
            FailureKind::EmptySegment(Segment::Train),
        ));
    }
    if test.is_empty() {
        return Err(PipelineError::new(
            Stage::Splitting,
            FailureKind::EmptySegment(Segment::Test),
        ));
    }

    if DF.log_pipeline_stages {
        log::info!(
            "Split ({}): {} train rows, {} test rows, {} excluded",
            policy,
            train.len(),
            test.len(),
            dataset.len() - train.len() - test.len()
        );
    }

    Ok(Split {
        train,
        test,
        policy: policy.clone(),
    })
}
