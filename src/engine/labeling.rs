use crate::{
    domain::{Label, PricePoint},
    engine::{PipelineError, Stage},
    models::{LabeledDataset, LabeledRow},
};

/// Labels each day with whether the next close is strictly higher. The last day is dropped.
pub fn build_labels(points: &[PricePoint]) -> Result<LabeledDataset, PipelineError> {
    if points.len() < 2 {
        return Err(PipelineError::insufficient(Stage::Labeling, 2, points.len()));
    }

    let rows = points
        .windows(2)
        .map(|w| LabeledRow {
            point: w[0],
            target: Label::from_closes(w[0].close, w[1].close),
        })
        .collect();

    Ok(LabeledDataset::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FailureKind;
    use chrono::NaiveDate;

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = NaiveDate::from_ymd_opt(2024, 5, 1 + i as u32).unwrap();
                PricePoint::new(date, c, c, c, c, 100.0)
            })
            .collect()
    }

    #[test]
    fn test_length_and_targets() {
        let closes = [10.0, 11.0, 9.0, 12.0, 12.0, 11.5];
        let data = build_labels(&points(&closes)).unwrap();
        assert_eq!(data.len(), closes.len() - 1);
        for (i, target) in data.targets().iter().enumerate() {
            assert_eq!(target.is_up(), closes[i + 1] > closes[i]);
        }
    }

    #[test]
    fn test_needs_two_rows() {
        let err = build_labels(&points(&[10.0])).unwrap_err();
        assert_eq!(err.stage, Stage::Labeling);
        assert_eq!(
            err.kind,
            FailureKind::InsufficientData {
                required: 2,
                available: 1
            }
        );
    }
}
