//! Typed configuration values for the split policy.

use {
    crate::config::PIPELINE,
    anyhow::{Context, Result, bail},
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    std::{collections::BTreeSet, str::FromStr},
};

/// Share of rows held out for testing by the chronological split.
/// Deserializing goes through `new`, so hand-edited state is clamped too.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct TestFraction(f64);

impl TestFraction {
    pub const MIN: f64 = 0.01;
    pub const MAX: f64 = 0.99;
    pub const DEFAULT: Self = Self::new(PIPELINE.test_fraction);

    /// Clamps into `[MIN, MAX]`, keeping the value inside the open interval (0, 1).
    pub const fn new(val: f64) -> Self {
        let v = if val < Self::MIN {
            Self::MIN
        } else if val > Self::MAX {
            Self::MAX
        } else {
            val
        };
        Self(v)
    }

    /// Rejects anything outside (0, 1) instead of clamping.
    pub fn parse_strict(val: f64) -> Result<Self> {
        if !(val > 0.0 && val < 1.0) {
            bail!("test fraction must lie strictly between 0 and 1, got {}", val);
        }
        Ok(Self::new(val))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for TestFraction {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for TestFraction {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<TestFraction> for f64 {
    fn from(fraction: TestFraction) -> Self {
        fraction.0
    }
}

impl FromStr for TestFraction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let val: f64 = s
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a number", s))?;
        Self::parse_strict(val)
    }
}

impl std::fmt::Display for TestFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.)
    }
}

/// Which calendar years feed the training bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainYears {
    Years(BTreeSet<i32>),
    /// Every year in `PIPELINE.train_year_options`.
    Combined,
}

impl TrainYears {
    pub fn single(year: i32) -> Self {
        Self::Years(BTreeSet::from([year]))
    }

    pub fn resolve(&self) -> BTreeSet<i32> {
        match self {
            Self::Years(years) => years.clone(),
            Self::Combined => PIPELINE.train_year_options.iter().copied().collect(),
        }
    }

    /// The options offered in the side panel: each year alone, then all combined.
    pub fn choices() -> Vec<Self> {
        PIPELINE
            .train_year_options
            .iter()
            .map(|&y| Self::single(y))
            .chain(std::iter::once(Self::Combined))
            .collect()
    }
}

impl Default for TrainYears {
    fn default() -> Self {
        PIPELINE
            .train_year_options
            .first()
            .map(|&y| Self::single(y))
            .unwrap_or(Self::Combined)
    }
}

impl std::fmt::Display for TrainYears {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resolve().iter().join(" & "))
    }
}

impl FromStr for TrainYears {
    type Err = anyhow::Error;

    /// Accepts `combined` or a comma separated list such as `2023,2024`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("combined") {
            return Ok(Self::Combined);
        }
        let years = trimmed
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i32>()
                    .with_context(|| format!("'{}' is not a year", part.trim()))
            })
            .collect::<Result<BTreeSet<i32>>>()?;
        if years.is_empty() {
            bail!("no training years given");
        }
        Ok(Self::Years(years))
    }
}

/// How the labeled dataset is divided into train and test segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitPolicy {
    YearRange {
        train_years: TrainYears,
        test_year: i32,
    },
    Chronological {
        test_fraction: TestFraction,
    },
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self::YearRange {
            train_years: TrainYears::default(),
            test_year: PIPELINE.test_year,
        }
    }
}

impl SplitPolicy {
    pub fn chronological_default() -> Self {
        Self::Chronological {
            test_fraction: TestFraction::default(),
        }
    }

    pub fn is_year_range(&self) -> bool {
        matches!(self, Self::YearRange { .. })
    }
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearRange {
                train_years,
                test_year,
            } => write!(f, "train {} / test {}", train_years, test_year),
            Self::Chronological { test_fraction } => {
                write!(f, "chronological, last {} held out", test_fraction)
            }
        }
    }
}
