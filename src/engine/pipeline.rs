use {
    crate::{
        config::{DF, RangeWarning, RunSettings},
        data::{ChartApiError, DiskCache, MarketDataProvider, SeriesOrigin, fetch_series},
        domain::PricePoint,
        engine::{
            FailureKind, PipelineError, Stage, build_labels, evaluate, run_backtest, split_dataset,
            train,
        },
        models::{BacktestReport, EvaluationResult, LabeledDataset, Split, TrainedModel},
    },
    anyhow::Result,
};

/// Everything one run produced, for the dashboard and the report binary.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub settings: RunSettings,
    pub points: Vec<PricePoint>,
    pub dataset: LabeledDataset,
    pub split: Split,
    pub model: TrainedModel,
    pub evaluation: EvaluationResult,
    pub backtest: BacktestReport,
    pub warnings: Vec<RangeWarning>,
}

/// Maps a provider answer onto the data retrieval stage.
/// Unknown symbols and empty ranges are `NoData`; anything else keeps its message.
pub fn classify_source_result(result: Result<Vec<PricePoint>>) -> Result<Vec<PricePoint>, PipelineError> {
    match result {
        Ok(points) if points.is_empty() => {
            Err(PipelineError::new(Stage::DataRetrieval, FailureKind::NoData))
        }
        Ok(points) => Ok(points),
        Err(e) => {
            let kind = match e.downcast_ref::<ChartApiError>() {
                Some(ChartApiError::NotFound(_)) => FailureKind::NoData,
                _ => FailureKind::Source(format!("{:#}", e)),
            };
            Err(PipelineError::new(Stage::DataRetrieval, kind))
        }
    }
}

/// Runs labeling through backtesting over already-fetched rows.
pub fn run_pipeline(points: Vec<PricePoint>, settings: &RunSettings) -> Result<PipelineRun, PipelineError> {
    let warnings = settings.validate();
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    if points.is_empty() {
        return Err(PipelineError::new(Stage::DataRetrieval, FailureKind::NoData));
    }

    crate::trace_time!("Pipeline run", 20_000, {
        let dataset = crate::trace_time!("1. Labeling", 1_000, { build_labels(&points)? });
        let split = crate::trace_time!("2. Splitting", 1_000, {
            split_dataset(&dataset, &settings.split)?
        });
        let training = crate::trace_time!("3. Training", 5_000, {
            train(&split, settings.neighbors)?
        });
        let evaluation = crate::trace_time!("4. Evaluation", 10_000, {
            evaluate(&training.model, &training.scaled_test, &split.test.targets())?
        });
        let backtest = crate::trace_time!("5. Backtesting", 1_000, {
            run_backtest(&split.test.points(), &evaluation.predicted)?
        });

        if DF.log_pipeline_stages {
            log::info!(
                "Run complete for {}: {} rows, {} labeled",
                settings.fetch_key(),
                points.len(),
                dataset.len()
            );
        }

        Ok(PipelineRun {
            settings: settings.clone(),
            points,
            dataset,
            split,
            model: training.model,
            evaluation,
            backtest,
            warnings,
        })
    })
}

/// Fetch (local cache, then provider) and run, for callers without a memo of their own.
pub async fn run_from_source(
    provider: &dyn MarketDataProvider,
    disk: Option<&DiskCache>,
    settings: &RunSettings,
    refresh: bool,
) -> Result<(PipelineRun, SeriesOrigin), PipelineError> {
    let key = settings.fetch_key();
    let (points, origin) = match fetch_series(provider, disk, &key, refresh).await {
        Ok(series) => (Ok(series.points), series.origin),
        Err(e) => (Err(e), SeriesOrigin::Network),
    };
    let points = classify_source_result(points)?;
    Ok((run_pipeline(points, settings)?, origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{SplitPolicy, TestFraction, TrainYears},
        domain::{FetchKey, Label},
    };
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{Datelike, Days, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn from_closes(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(date(2025, 1, 2 + i as u32), c, c + 0.5, c - 0.5, c, 1e6))
            .collect()
    }

    /// Weekday bars from 2023-01-02 through 2025-12-31 following a deterministic zig-zag.
    fn synthetic_history() -> Vec<PricePoint> {
        let mut points = Vec::new();
        let mut day = date(2023, 1, 2);
        let mut i = 0u64;
        while day <= date(2025, 12, 31) {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                let close = 30.0 + ((i * 7) % 11) as f64 - ((i * 3) % 5) as f64 * 0.5;
                let volume = 1e7 + ((i * 13) % 17) as f64 * 1e5;
                points.push(PricePoint::new(day, close - 0.2, close + 0.4, close - 0.6, close, volume));
                i += 1;
            }
            day = day + Days::new(1);
        }
        points
    }

    #[test]
    fn test_scenario_small_series() {
        let points = from_closes(&[10.0, 11.0, 9.0, 12.0]);
        let dataset = build_labels(&points).unwrap();
        assert_eq!(dataset.targets(), vec![Label::Up, Label::Down, Label::Up]);

        let report = run_backtest(&dataset.points(), &[Label::Up, Label::Down, Label::Up]).unwrap();
        let returns: Vec<Option<f64>> = report.rows.iter().map(|r| r.period_return).collect();
        assert!((returns[0].unwrap() - 0.1).abs() < 1e-10);
        assert!((returns[1].unwrap() - (-2.0 / 11.0)).abs() < 1e-10);
        assert_eq!(returns[2], None);

        let gains: Vec<Option<f64>> = report.rows.iter().map(|r| r.gain).collect();
        assert!((gains[0].unwrap() - 0.1).abs() < 1e-10);
        assert_eq!(gains[1], Some(0.0));
        assert_eq!(gains[2], None);
    }

    #[test]
    fn test_default_year_split_end_to_end() {
        let run = run_pipeline(synthetic_history(), &RunSettings::default()).unwrap();
        assert!(run.warnings.is_empty());
        assert!(run.split.train.rows().iter().all(|r| r.point.year() == 2023));
        assert!(run.split.test.rows().iter().all(|r| r.point.year() == 2025));
        assert_eq!(run.evaluation.predicted.len(), run.split.test.len());
        assert_eq!(run.evaluation.confusion.total(), run.split.test.len());
        assert_eq!(run.backtest.rows.len(), run.split.test.len());
        assert_eq!(run.backtest.summary.defined_periods, run.split.test.len() - 1);
        let s = run.backtest.summary;
        assert!((s.total_gain - (s.total_positive_gain + s.total_negative_gain)).abs() < 1e-10);
    }

    #[test]
    fn test_chronological_run() {
        let settings = RunSettings {
            split: SplitPolicy::Chronological {
                test_fraction: TestFraction::new(0.3),
            },
            ..Default::default()
        };
        let points = synthetic_history();
        let run = run_pipeline(points.clone(), &settings).unwrap();
        let n = points.len() - 1;
        assert_eq!(run.split.test.len(), (n as f64 * 0.3).ceil() as usize);
        assert_eq!(run.split.train.len() + run.split.test.len(), n);
    }

    #[test]
    fn test_all_down_test_set_metrics() {
        // Monotonically falling prices: every label is down in both segments.
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let settings = RunSettings {
            split: SplitPolicy::Chronological {
                test_fraction: TestFraction::new(0.3),
            },
            ..Default::default()
        };
        let run = run_pipeline(from_closes(&closes), &settings).unwrap();
        let e = &run.evaluation;
        assert!(e.predicted.iter().all(|l| *l == Label::Down));
        assert_eq!((e.precision, e.recall, e.f1), (0.0, 0.0, 0.0));
        assert_eq!((e.accuracy, e.specificity), (1.0, 1.0));
    }

    #[test]
    fn test_stage_names_on_failure() {
        let err = run_pipeline(Vec::new(), &RunSettings::default()).unwrap_err();
        assert_eq!(err.stage, Stage::DataRetrieval);

        let err = run_pipeline(from_closes(&[10.0]), &RunSettings::default()).unwrap_err();
        assert_eq!(err.stage, Stage::Labeling);

        // Only January 2025 rows: nothing for the 2023 training bucket.
        let err = run_pipeline(from_closes(&[10.0, 11.0, 12.0]), &RunSettings::default()).unwrap_err();
        assert_eq!(err.stage, Stage::Splitting);
        assert_eq!(err.kind, FailureKind::EmptySegment(crate::engine::Segment::Train));

        let settings = RunSettings {
            split: SplitPolicy::Chronological {
                test_fraction: TestFraction::new(0.3),
            },
            neighbors: 5,
            ..Default::default()
        };
        let err = run_pipeline(from_closes(&[10.0, 11.0, 12.0, 11.0, 10.0]), &settings).unwrap_err();
        assert_eq!(err.stage, Stage::Training);
    }

    #[test]
    fn test_inverted_range_warns_then_fails_on_data() {
        let settings = RunSettings {
            start: date(2025, 12, 31),
            end: date(2023, 1, 1),
            split: SplitPolicy::YearRange {
                train_years: TrainYears::Combined,
                test_year: 2025,
            },
            ..Default::default()
        };
        assert!(!settings.validate().is_empty());
        let err = run_pipeline(Vec::new(), &settings).unwrap_err();
        assert_eq!(err.kind, FailureKind::NoData);
    }

    #[test]
    fn test_classify_source_result() {
        let not_found = anyhow::Error::new(ChartApiError::NotFound("delisted".into()))
            .context("Chart request failed");
        assert_eq!(
            classify_source_result(Err(not_found)).unwrap_err().kind,
            FailureKind::NoData
        );
        assert_eq!(
            classify_source_result(Ok(Vec::new())).unwrap_err().kind,
            FailureKind::NoData
        );
        match classify_source_result(Err(anyhow!("timed out"))).unwrap_err().kind {
            FailureKind::Source(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected {:?}", other),
        }
    }

    struct FixedProvider(Vec<PricePoint>);

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        fn signature(&self) -> &'static str {
            "Fixed"
        }

        async fn fetch_daily_bars(&self, key: &FetchKey) -> Result<Vec<PricePoint>> {
            Ok(self.0.iter().filter(|p| key.contains(p.date)).copied().collect())
        }
    }

    #[tokio::test]
    async fn test_run_from_source() {
        let provider = FixedProvider(synthetic_history());
        let (run, origin) = run_from_source(&provider, None, &RunSettings::default(), false)
            .await
            .unwrap();
        assert_eq!(origin, SeriesOrigin::Network);
        assert_eq!(run.points.len(), synthetic_history().len());

        let settings = RunSettings {
            symbol: "NONE3.SA".into(),
            start: date(2030, 1, 1),
            end: date(2030, 12, 31),
            ..Default::default()
        };
        let err = run_from_source(&provider, None, &settings, false).await.unwrap_err();
        assert_eq!(err, PipelineError::new(Stage::DataRetrieval, FailureKind::NoData));
    }
}
