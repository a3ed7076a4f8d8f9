use {
    crate::{
        config::{PIPELINE, SplitPolicy},
        domain::FetchKey,
        utils::TimeUtils,
    },
    chrono::{Datelike, NaiveDate},
    serde::{Deserialize, Serialize},
};

/// Everything one pipeline run depends on. Persisted between dashboard sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub split: SplitPolicy,
    pub neighbors: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            symbol: PIPELINE.symbol.to_string(),
            start: TimeUtils::date_from_parts(PIPELINE.start),
            end: TimeUtils::date_from_parts(PIPELINE.end),
            split: SplitPolicy::default(),
            neighbors: PIPELINE.neighbors,
        }
    }
}

/// Suspicious but non-fatal configuration. The run still goes ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeWarning {
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    TestYearBeforeTraining { test_year: i32, first_train_year: i32 },
    TestYearInTraining { year: i32 },
    YearOutsideFetchRange { year: i32 },
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedDateRange { start, end } => write!(
                f,
                "End date {} precedes start date {}",
                TimeUtils::format_date(*end),
                TimeUtils::format_date(*start)
            ),
            Self::TestYearBeforeTraining {
                test_year,
                first_train_year,
            } => write!(
                f,
                "Test year {} precedes training year {}",
                test_year, first_train_year
            ),
            Self::TestYearInTraining { year } => write!(
                f,
                "Year {} is both a training and the test year; its rows are used for testing only",
                year
            ),
            Self::YearOutsideFetchRange { year } => {
                write!(f, "Year {} lies outside the downloaded date range", year)
            }
        }
    }
}

impl RunSettings {
    pub fn fetch_key(&self) -> FetchKey {
        FetchKey::daily(self.symbol.clone(), self.start, self.end)
    }

    /// Range checks. These never block a run; callers log or display them.
    pub fn validate(&self) -> Vec<RangeWarning> {
        let mut warnings = Vec::new();

        if self.start > self.end {
            warnings.push(RangeWarning::InvertedDateRange {
                start: self.start,
                end: self.end,
            });
        }

        if let SplitPolicy::YearRange {
            train_years,
            test_year,
        } = &self.split
        {
            let years = train_years.resolve();
            if let Some(&first_train_year) = years.iter().next() {
                if *test_year < first_train_year {
                    warnings.push(RangeWarning::TestYearBeforeTraining {
                        test_year: *test_year,
                        first_train_year,
                    });
                }
            }
            if years.contains(test_year) {
                warnings.push(RangeWarning::TestYearInTraining { year: *test_year });
            }
            if self.start <= self.end {
                let fetched = self.start.year()..=self.end.year();
                for year in years.iter().chain(std::iter::once(test_year)) {
                    if !fetched.contains(year) {
                        warnings.push(RangeWarning::YearOutsideFetchRange { year: *year });
                    }
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TestFraction, TrainYears};

    #[test]
    fn test_defaults_are_clean() {
        assert!(RunSettings::default().validate().is_empty());
    }

    #[test]
    fn test_inverted_range_is_a_warning() {
        let settings = RunSettings {
            start: TimeUtils::date_from_parts((2025, 1, 1)),
            end: TimeUtils::date_from_parts((2024, 1, 1)),
            split: SplitPolicy::Chronological {
                test_fraction: TestFraction::default(),
            },
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            vec![RangeWarning::InvertedDateRange {
                start: settings.start,
                end: settings.end
            }]
        );
    }

    #[test]
    fn test_year_policy_warnings() {
        let settings = RunSettings {
            split: SplitPolicy::YearRange {
                train_years: TrainYears::Combined,
                test_year: 2023,
            },
            ..Default::default()
        };
        let warnings = settings.validate();
        assert!(
            !warnings
                .iter()
                .any(|w| matches!(w, RangeWarning::TestYearBeforeTraining { .. }))
        );
        assert!(warnings.contains(&RangeWarning::TestYearInTraining { year: 2023 }));

        let settings = RunSettings {
            split: SplitPolicy::YearRange {
                train_years: TrainYears::single(2024),
                test_year: 2022,
            },
            ..Default::default()
        };
        let warnings = settings.validate();
        assert!(warnings.contains(&RangeWarning::TestYearBeforeTraining {
            test_year: 2022,
            first_train_year: 2024
        }));
        assert!(warnings.contains(&RangeWarning::YearOutsideFetchRange { year: 2022 }));
    }
}
