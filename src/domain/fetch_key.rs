use {
    crate::utils::TimeUtils,
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DataInterval {
    #[default]
    #[strum(to_string = "1d")]
    D1,
}

impl DataInterval {
    /// Value of the `interval` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::D1 => "1d",
        }
    }
}

/// Identifies one price download: the memo key for fetched series.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct FetchKey {
    pub symbol: String,
    /// Inclusive.
    pub start: NaiveDate,
    /// Inclusive.
    pub end: NaiveDate,
    pub interval: DataInterval,
}

impl FetchKey {
    pub fn daily(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            interval: DataInterval::D1,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Filesystem-safe stem, e.g. `PETR4.SA_2023-01-01_2025-12-31_1d`.
    pub fn file_stem(&self) -> String {
        let symbol: String = self
            .symbol
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        format!(
            "{}_{}_{}_{}",
            symbol,
            TimeUtils::format_date(self.start),
            TimeUtils::format_date(self.end),
            self.interval
        )
    }
}

impl std::fmt::Display for FetchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {}..={} ({})",
            self.symbol,
            TimeUtils::format_date(self.start),
            TimeUtils::format_date(self.end),
            self.interval
        )
    }
}
