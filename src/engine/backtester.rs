use crate::{
    config::DF,
    domain::{Label, PricePoint},
    engine::{FailureKind, PipelineError, Stage},
    models::BacktestReport,
};

/// Long when the prediction is up, flat otherwise. Rows and predictions must align 1:1.
pub fn run_backtest(
    test_points: &[PricePoint],
    predicted: &[Label],
) -> Result<BacktestReport, PipelineError> {
    if test_points.len() != predicted.len() {
        return Err(PipelineError::new(
            Stage::Backtesting,
            FailureKind::LengthMismatch {
                expected: test_points.len(),
                found: predicted.len(),
            },
        ));
    }

    let report = BacktestReport::simulate(test_points, predicted);

    if DF.log_pipeline_stages {
        let s = &report.summary;
        log::info!(
            "Backtest over {} periods: total {:+.4}, {} profitable, {} losing",
            s.defined_periods,
            s.total_gain,
            s.profitable_periods,
            s.losing_periods
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_misaligned_predictions_fail() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let points = vec![PricePoint::new(date, 1.0, 1.0, 1.0, 1.0, 1.0)];
        let err = run_backtest(&points, &[]).unwrap_err();
        assert_eq!(err.stage, Stage::Backtesting);
        assert_eq!(
            err.kind,
            FailureKind::LengthMismatch {
                expected: 1,
                found: 0
            }
        );
    }
}
