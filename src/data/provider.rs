use {
    crate::{
        config::{DF, YAHOO},
        data::yahoo_chart::{ChartApiError, ChartEnvelope, parse_chart},
        domain::{FetchKey, PricePoint},
        utils::TimeUtils,
    },
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    std::time::Duration,
};

/// Abstract interface for fetching daily market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short human-readable source name, shown in logs and the status bar.
    fn signature(&self) -> &'static str;

    /// Daily bars for `key`, ascending by date. An empty vector means the range had no sessions.
    async fn fetch_daily_bars(&self, key: &FetchKey) -> Result<Vec<PricePoint>>;
}

pub struct YahooChartProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooChartProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(YAHOO.user_agent)
            .timeout(Duration::from_millis(YAHOO.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}{}/{}", self.base_url, YAHOO.chart_path, symbol)
    }

    /// `period2` is exclusive on Yahoo's side, so it points at the day after `key.end`.
    fn query_params(key: &FetchKey) -> [(&'static str, String); 4] {
        let period1 = TimeUtils::epoch_secs_at_midnight(key.start);
        let period2 = TimeUtils::epoch_secs_at_midnight(key.end) + TimeUtils::SECS_IN_D;
        [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", key.interval.as_query().to_string()),
            ("events", "history".to_string()),
        ]
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    fn signature(&self) -> &'static str {
        "Yahoo Finance"
    }

    async fn fetch_daily_bars(&self, key: &FetchKey) -> Result<Vec<PricePoint>> {
        if key.is_inverted() {
            log::warn!("{}: start is after end, nothing to download", key);
            return Ok(Vec::new());
        }

        let url = self.chart_url(&key.symbol);
        if DF.log_data_source {
            log::info!("Requesting {} from {}", key, url);
        }

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(key))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {}", key))?;

        // Yahoo reports unknown symbols as a 404 carrying a JSON error body.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ChartApiError::MalformedResponse(e.to_string()))
                    .with_context(|| format!("Unreadable chart response for {}", key));
            }
            Err(_) => bail!("Chart API returned HTTP {} for {}", status, key),
        };

        parse_chart(envelope, key).with_context(|| format!("Chart request for {} failed", key))
    }
}
