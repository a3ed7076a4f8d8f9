use crate::{
    domain::{FeatureVector, Label},
    models::{KnnClassifier, StandardScaler},
};

/// Scaler and classifier fitted on one training segment. Never mutated after fitting.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub scaler: StandardScaler,
    pub classifier: KnnClassifier,
}

impl TrainedModel {
    pub fn predict_scaled(&self, scaled: &[FeatureVector]) -> Vec<Label> {
        self.classifier.predict(scaled)
    }
}
