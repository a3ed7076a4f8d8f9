use {
    crate::{domain::Label, utils::safe_ratio},
    serde::{Deserialize, Serialize},
};

/// 2x2 counts. Rows are actual, columns predicted, label order [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    /// Pairs are taken positionally; surplus entries in the longer slice are ignored.
    pub fn from_labels(actual: &[Label], predicted: &[Label]) -> Self {
        actual
            .iter()
            .zip(predicted)
            .fold(Self::default(), |mut m, (a, p)| {
                match (a, p) {
                    (Label::Down, Label::Down) => m.true_negatives += 1,
                    (Label::Down, Label::Up) => m.false_positives += 1,
                    (Label::Up, Label::Down) => m.false_negatives += 1,
                    (Label::Up, Label::Up) => m.true_positives += 1,
                }
                m
            })
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    /// `[[tn, fp], [fn, tp]]`
    pub fn as_grid(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }

    pub fn accuracy(&self) -> f64 {
        safe_ratio(
            (self.true_positives + self.true_negatives) as f64,
            self.total() as f64,
        )
    }

    pub fn precision(&self) -> f64 {
        safe_ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_positives) as f64,
        )
    }

    pub fn recall(&self) -> f64 {
        safe_ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_negatives) as f64,
        )
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        safe_ratio(2.0 * p * r, p + r)
    }

    pub fn specificity(&self) -> f64 {
        safe_ratio(
            self.true_negatives as f64,
            (self.true_negatives + self.false_positives) as f64,
        )
    }
}

/// Scores of one run on the held-out segment. Zero denominators yield 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub specificity: f64,
    /// Aligned with the test rows.
    pub predicted: Vec<Label>,
}

impl EvaluationResult {
    pub fn from_predictions(actual: &[Label], predicted: Vec<Label>) -> Self {
        let confusion = ConfusionMatrix::from_labels(actual, &predicted);
        Self {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            specificity: confusion.specificity(),
            confusion,
            predicted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label::{Down, Up};

    #[test]
    fn test_counts_cover_every_row() {
        let actual = [Up, Down, Up, Up, Down, Down];
        let predicted = [Up, Up, Down, Up, Down, Up];
        let m = ConfusionMatrix::from_labels(&actual, &predicted);
        assert_eq!(m.total(), actual.len());
        assert_eq!(m.as_grid(), [[1, 2], [1, 2]]);
    }

    #[test]
    fn test_metric_values() {
        let result = EvaluationResult::from_predictions(
            &[Up, Down, Up, Up, Down, Down],
            vec![Up, Up, Down, Up, Down, Up],
        );
        assert!((result.accuracy - 0.5).abs() < 1e-10);
        assert!((result.precision - 0.5).abs() < 1e-10);
        assert!((result.recall - 2.0 / 3.0).abs() < 1e-10);
        assert!((result.f1 - 4.0 / 7.0).abs() < 1e-10);
        assert!((result.specificity - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_down_scores_zero_division_defaults() {
        let result = EvaluationResult::from_predictions(&[Down; 4], vec![Down; 4]);
        assert_eq!(result.precision, 0.0);
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.f1, 0.0);
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(result.specificity, 1.0);
    }

    #[test]
    fn test_metrics_stay_in_unit_interval() {
        let cases: [(&[Label], &[Label]); 4] = [
            (&[], &[]),
            (&[Up, Up], &[Down, Down]),
            (&[Down, Down], &[Up, Up]),
            (&[Up, Down, Up], &[Up, Down, Down]),
        ];
        for (actual, predicted) in cases {
            let r = EvaluationResult::from_predictions(actual, predicted.to_vec());
            for v in [r.accuracy, r.precision, r.recall, r.f1, r.specificity] {
                assert!((0.0..=1.0).contains(&v), "{} out of range", v);
            }
        }
    }
}
