use {
    anyhow::{Context, Result},
    chrono::{DateTime, Datelike, NaiveDate, NaiveTime},
};

pub type AppInstant = std::time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_D: i64 = 86_400;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Parse a `YYYY-MM-DD` date.
    pub fn parse_date(text: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), Self::STANDARD_TIME_FORMAT)
            .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", text))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_TIME_FORMAT).to_string()
    }

    /// Build a date from `(year, month, day)` config triples.
    pub fn date_from_parts(parts: (i32, u32, u32)) -> NaiveDate {
        let (year, month, day) = parts;
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
    }

    /// Unix seconds at 00:00 UTC of `date`.
    pub fn epoch_secs_at_midnight(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Trading date of a bar, given its UTC timestamp and the exchange offset from UTC.
    pub fn trading_date(epoch_secs: i64, gmt_offset_secs: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(epoch_secs + gmt_offset_secs, 0).map(|dt| dt.date_naive())
    }

    /// UTC wall-clock time of a millisecond timestamp, e.g. `2025-03-14 18:02 UTC`.
    pub fn format_timestamp_ms(ms: i64) -> String {
        DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Dates are plotted as day numbers so the x axis stays linear in time.
    pub fn date_to_plot_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    pub fn plot_x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }
}
