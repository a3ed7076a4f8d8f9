use crate::{
    config::DF,
    domain::FeatureVector,
    engine::{PipelineError, Stage},
    models::{KnnClassifier, Split, StandardScaler, TrainedModel},
};

pub struct TrainingOutput {
    pub model: TrainedModel,
    /// Test features after the training-fitted scaling, row-aligned with `split.test`.
    pub scaled_test: Vec<FeatureVector>,
}

/// Fits the scaler on training features only, then stores the scaled training set
/// in a k-NN classifier.
pub fn train(split: &Split, neighbors: usize) -> Result<TrainingOutput, PipelineError> {
    let k = neighbors.max(1);
    if split.train.len() < k {
        return Err(PipelineError::insufficient(Stage::Training, k, split.train.len()));
    }

    let train_features = split.train.features();
    let scaler = StandardScaler::fit(&train_features);
    let scaled_train = scaler.transform(&train_features);
    let scaled_test = scaler.transform(&split.test.features());

    let classifier = KnnClassifier::fit(k, scaled_train, split.train.targets());

    if DF.log_pipeline_stages {
        log::info!(
            "Trained {}-NN on {} rows (feature means {:?})",
            k,
            classifier.len(),
            scaler.means()
        );
    }

    Ok(TrainingOutput {
        model: TrainedModel { scaler, classifier },
        scaled_test,
    })
}
