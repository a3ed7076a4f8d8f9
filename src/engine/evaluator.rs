use crate::{
    config::DF,
    domain::{FeatureVector, Label},
    engine::{FailureKind, PipelineError, Stage},
    models::{EvaluationResult, TrainedModel},
};

/// Predicts every held-out row and scores the predictions.
pub fn evaluate(
    model: &TrainedModel,
    scaled_test: &[FeatureVector],
    actual: &[Label],
) -> Result<EvaluationResult, PipelineError> {
    if scaled_test.len() != actual.len() {
        return Err(PipelineError::new(
            Stage::Evaluation,
            FailureKind::LengthMismatch {
                expected: actual.len(),
                found: scaled_test.len(),
            },
        ));
    }

    let predicted = model.predict_scaled(scaled_test);
    let result = EvaluationResult::from_predictions(actual, predicted);

    if DF.log_pipeline_stages {
        log::info!(
            "Evaluated {} rows: accuracy {:.3}, precision {:.3}, recall {:.3}, f1 {:.3}",
            result.confusion.total(),
            result.accuracy,
            result.precision,
            result.recall,
            result.f1
        );
    }
    Ok(result)
}
