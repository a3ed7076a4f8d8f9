mod cache;
mod fetch;
mod provider;
mod yahoo_chart;

pub use {
    cache::{DiskCache, FetchedSeries, PriceCache, SeriesOrigin},
    fetch::fetch_series,
    provider::{MarketDataProvider, YahooChartProvider},
    yahoo_chart::{ChartApiError, ChartEnvelope, parse_chart},
};
