use {
    crate::{
        domain::{Label, PricePoint},
        utils::running_sum,
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// One test day under the long-or-flat rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    pub point: PricePoint,
    pub predicted: Label,
    /// Change to the next test row's close. `None` on the last row.
    pub period_return: Option<f64>,
    /// `period_return` when long, zero when flat.
    pub gain: Option<f64>,
}

/// Aggregates over rows with a defined gain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub total_gain: f64,
    pub mean_gain: f64,
    pub total_positive_gain: f64,
    pub total_negative_gain: f64,
    pub profitable_periods: usize,
    pub losing_periods: usize,
    pub defined_periods: usize,
}

impl BacktestSummary {
    pub fn from_gains(gains: impl IntoIterator<Item = f64>) -> Self {
        let mut s = gains.into_iter().fold(Self::default(), |mut s, g| {
            s.total_gain += g;
            s.defined_periods += 1;
            if g > 0.0 {
                s.total_positive_gain += g;
                s.profitable_periods += 1;
            } else if g < 0.0 {
                s.total_negative_gain += g;
                s.losing_periods += 1;
            }
            s
        });
        if s.defined_periods > 0 {
            s.mean_gain = s.total_gain / s.defined_periods as f64;
        }
        s
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub rows: Vec<BacktestRow>,
    pub summary: BacktestSummary,
}

impl BacktestReport {
    /// Rows and predictions are zipped positionally; callers check that lengths agree.
    pub fn simulate(points: &[PricePoint], predicted: &[Label]) -> Self {
        let rows: Vec<BacktestRow> = points
            .iter()
            .zip(predicted)
            .enumerate()
            .map(|(i, (point, &predicted))| {
                let period_return = points.get(i + 1).and_then(|next| point.return_to(next));
                BacktestRow {
                    point: *point,
                    predicted,
                    period_return,
                    gain: period_return.map(|r| r * predicted.as_f64()),
                }
            })
            .collect();

        let summary = BacktestSummary::from_gains(rows.iter().filter_map(|r| r.gain));
        Self { rows, summary }
    }

    /// Running total of gains over time, defined rows only.
    pub fn cumulative_gains(&self) -> Vec<(NaiveDate, f64)> {
        let (dates, gains): (Vec<NaiveDate>, Vec<f64>) = self
            .rows
            .iter()
            .filter_map(|r| r.gain.map(|g| (r.point.date, g)))
            .unzip();
        dates.into_iter().zip(running_sum(&gains)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label::{Down, Up};

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = NaiveDate::from_ymd_opt(2025, 3, 3 + i as u32).unwrap();
                PricePoint::new(date, c, c, c, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn test_last_row_is_undefined() {
        let report = BacktestReport::simulate(&points(&[10.0, 11.0, 9.0]), &[Up, Down, Up]);
        let returns: Vec<Option<f64>> = report.rows.iter().map(|r| r.period_return).collect();
        assert!((returns[0].unwrap() - 0.1).abs() < 1e-10);
        assert!((returns[1].unwrap() + 2.0 / 11.0).abs() < 1e-10);
        assert_eq!(returns[2], None);
        assert_eq!(report.rows[1].gain, Some(-0.0));
        assert_eq!(report.summary.defined_periods, 2);
    }

    #[test]
    fn test_buckets_add_up_to_total() {
        let report = BacktestReport::simulate(
            &points(&[10.0, 12.0, 11.0, 12.0, 13.0, 12.0]),
            &[Up, Up, Up, Down, Up, Up],
        );
        let s = report.summary;
        assert!((s.total_gain - (s.total_positive_gain + s.total_negative_gain)).abs() < 1e-10);
        // The flat day contributes zero to both buckets.
        assert_eq!(s.profitable_periods + s.losing_periods, s.defined_periods - 1);
        assert!((s.mean_gain - s.total_gain / 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_cumulative_gains_skip_undefined_rows() {
        let report = BacktestReport::simulate(&points(&[10.0, 11.0, 12.1]), &[Up, Up, Up]);
        let curve = report.cumulative_gains();
        assert_eq!(curve.len(), 2);
        assert!((curve[1].1 - 0.2).abs() < 1e-10);
        assert_eq!(curve[1].0, report.rows[1].point.date);
    }

    #[test]
    fn test_empty_report() {
        let report = BacktestReport::simulate(&[], &[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.summary, BacktestSummary::default());
        assert!(report.cumulative_gains().is_empty());
    }
}
