use {
    crate::{
        config::DF,
        domain::{FetchKey, PricePoint},
        utils::TimeUtils,
    },
    itertools::izip,
    serde::Deserialize,
    std::{error::Error, fmt},
};

/// Top level of a `/v8/finance/chart` response.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChartErrorBody {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    // Absent when the range holds no sessions.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds (-10800 for B3).
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartApiError {
    /// Unknown or delisted symbol.
    NotFound(String),
    Api { code: String, description: String },
    MalformedResponse(String),
}

impl fmt::Display for ChartApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            ChartApiError::NotFound(msg) => write!(f, "Symbol not found: {}", msg),
            ChartApiError::Api { code, description } => {
                write!(f, "Chart API error {}: {}", code, description)
            }
            ChartApiError::MalformedResponse(msg) => write!(f, "Malformed chart response: {}", msg),
        }
    }
}

impl Error for ChartApiError {}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Turns a chart response into date-ordered bars inside `key`'s range.
/// Sessions with any missing field are dropped. A repeated date keeps its last bar.
pub fn parse_chart(envelope: ChartEnvelope, key: &FetchKey) -> Result<Vec<PricePoint>, ChartApiError> {
    if let Some(err) = envelope.chart.error {
        let description = err.description.unwrap_or_default();
        return Err(if err.code.eq_ignore_ascii_case("Not Found") {
            ChartApiError::NotFound(description)
        } else {
            ChartApiError::Api {
                code: err.code,
                description,
            }
        });
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(ChartApiError::NotFound(format!("no chart data for {}", key.symbol)));
    };

    let gmtoffset = result.meta.gmtoffset;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let sessions = result.timestamp.len();

    let lengths = [
        quote.open.len(),
        quote.high.len(),
        quote.low.len(),
        quote.close.len(),
        quote.volume.len(),
    ];
    if lengths.iter().any(|&len| len != sessions) {
        return Err(ChartApiError::MalformedResponse(format!(
            "{} timestamps but quote columns of lengths {:?}",
            sessions, lengths
        )));
    }

    let mut points: Vec<PricePoint> = izip!(
        result.timestamp,
        quote.open,
        quote.high,
        quote.low,
        quote.close,
        quote.volume
    )
    .filter_map(|(ts, open, high, low, close, volume)| {
        Some(PricePoint::new(
            TimeUtils::trading_date(ts, gmtoffset)?,
            finite(open)?,
            finite(high)?,
            finite(low)?,
            finite(close)?,
            finite(volume)?,
        ))
    })
    .filter(|p| key.contains(p.date))
    .collect();

    points.sort_by_key(|p| p.date);
    let before_dedup = points.len();
    points.dedup_by(|later, earlier| {
        if later.date == earlier.date {
            *earlier = *later;
            true
        } else {
            false
        }
    });

    if before_dedup != points.len() {
        log::warn!(
            "{}: collapsed {} duplicate session(s)",
            key,
            before_dedup - points.len()
        );
    }
    if DF.log_data_source {
        log::info!(
            "{}: {} of {} sessions usable",
            key,
            points.len(),
            sessions
        );
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key() -> FetchKey {
        FetchKey::daily(
            "PETR4.SA",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn parse(json: &str) -> Result<Vec<PricePoint>, ChartApiError> {
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        parse_chart(envelope, &key())
    }

    // 2024-01-02 13:00 UTC and 2024-01-03 13:00 UTC
    const TWO_SESSIONS: &str = r#"{"chart":{"result":[{
        "meta":{"symbol":"PETR4.SA","gmtoffset":-10800},
        "timestamp":[1704200400,1704286800],
        "indicators":{"quote":[{
            "open":[37.0,37.5],"high":[38.0,38.2],"low":[36.8,37.1],
            "close":[37.9,37.2],"volume":[41000000,38000000]}]}
    }],"error":null}}"#;

    #[test]
    fn test_parses_sessions_with_exchange_dates() {
        let points = parse(TWO_SESSIONS).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[1].close, 37.2);
        assert_eq!(points[0].volume, 41_000_000.0);
    }

    #[test]
    fn test_rows_with_nulls_are_dropped() {
        let json = TWO_SESSIONS.replace("\"close\":[37.9,37.2]", "\"close\":[null,37.2]");
        let points = parse(&json).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_not_found_error() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse(json), Err(ChartApiError::NotFound(_))));
    }

    #[test]
    fn test_empty_range_yields_no_points() {
        let json = r#"{"chart":{"result":[{"meta":{"gmtoffset":-10800},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert_eq!(parse(json).unwrap(), Vec::<PricePoint>::new());
    }

    #[test]
    fn test_ragged_columns_are_malformed() {
        let json = TWO_SESSIONS.replace("\"low\":[36.8,37.1]", "\"low\":[36.8]");
        assert!(matches!(parse(&json), Err(ChartApiError::MalformedResponse(_))));
    }

    #[test]
    fn test_duplicate_dates_keep_last_bar() {
        let json = TWO_SESSIONS.replace("1704286800", "1704204000");
        let points = parse(&json).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 37.2);
    }
}
