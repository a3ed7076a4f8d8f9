use {
    crate::{
        config::DF,
        data::{
            cache::{DiskCache, FetchedSeries, SeriesOrigin},
            provider::MarketDataProvider,
        },
        domain::FetchKey,
    },
    anyhow::Result,
};

/// Local cache first, then the provider.
/// `refresh` deletes the cached file for `key` instead of reading it.
/// Non-empty downloads are written back to the local cache; a failed write only logs.
pub async fn fetch_series(
    provider: &dyn MarketDataProvider,
    disk: Option<&DiskCache>,
    key: &FetchKey,
    refresh: bool,
) -> Result<FetchedSeries> {
    if let Some(disk) = disk {
        if refresh {
            match disk.remove(key) {
                Ok(true) if DF.log_cache => log::info!("Evicted local cache for {}", key),
                Ok(_) => {}
                Err(e) => log::warn!("Could not evict local cache for {}: {:#}", key, e),
            }
        } else {
            match disk.load(key) {
                Ok(series) => return Ok(series),
                Err(e) => {
                    if DF.log_cache {
                        log::info!("Local cache unusable for {}: {:#}", key, e);
                    }
                }
            }
        }
    }

    let points = provider.fetch_daily_bars(key).await?;
    if DF.log_data_source {
        log::info!(
            "{} returned {} rows for {}",
            provider.signature(),
            points.len(),
            key
        );
    }

    if let Some(disk) = disk
        && !points.is_empty()
        && let Err(e) = disk.save(key, &points)
    {
        log::warn!("Failed to write local cache for {}: {:#}", key, e);
    }

    Ok(FetchedSeries::new(key.clone(), points, SeriesOrigin::Network))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StubProvider {
        points: Vec<PricePoint>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn returning(points: Vec<PricePoint>) -> Self {
            Self {
                points,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        fn signature(&self) -> &'static str {
            "Stub"
        }

        async fn fetch_daily_bars(&self, _key: &FetchKey) -> Result<Vec<PricePoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("connection refused");
            }
            Ok(self.points.clone())
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn key() -> FetchKey {
        FetchKey::daily("PETR4.SA", date(1), date(31))
    }

    fn points() -> Vec<PricePoint> {
        (2..6)
            .map(|d| PricePoint::new(date(d), 10.0, 11.0, 9.0, 10.0 + d as f64, 500.0))
            .collect()
    }

    #[tokio::test]
    async fn test_refresh_evicts_and_rewrites_local_cache() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        let provider = StubProvider::returning(points());

        fetch_series(&provider, Some(&disk), &key(), false).await.unwrap();
        let refreshed = fetch_series(&provider, Some(&disk), &key(), true).await.unwrap();
        assert_eq!(refreshed.origin, SeriesOrigin::Network);
        assert_eq!(provider.calls(), 2);
        assert_eq!(disk.load(&key()).unwrap().points, points());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_no_stale_file() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        disk.save(&key(), &points()).unwrap();

        let provider = StubProvider {
            fail: true,
            ..StubProvider::returning(points())
        };
        assert!(fetch_series(&provider, Some(&disk), &key(), true).await.is_err());
        assert!(!disk.path_for(&key()).exists());
    }

    #[tokio::test]
    async fn test_disk_cache_satisfies_new_process() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        let provider = StubProvider::returning(points());

        let first = fetch_series(&provider, Some(&disk), &key(), false).await.unwrap();
        let again = fetch_series(&provider, Some(&disk), &key(), false).await.unwrap();
        assert_eq!(again.origin, SeriesOrigin::DiskCache);
        assert_eq!(again.points, points());
        assert!(again.fetched_at_ms >= first.fetched_at_ms);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_written() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        let provider = StubProvider::returning(Vec::new());

        let series = fetch_series(&provider, Some(&disk), &key(), false).await.unwrap();
        assert!(series.points.is_empty());
        assert!(disk.load(&key()).is_err());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = StubProvider {
            fail: true,
            ..StubProvider::returning(points())
        };
        let err = fetch_series(&provider, None, &key(), false).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
