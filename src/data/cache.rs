use {
    crate::{
        config::{DF, PERSISTENCE, price_cache_filename},
        domain::{FetchKey, PricePoint},
    },
    anyhow::{Context, Result, bail},
    serde::{Deserialize, Serialize},
    std::{
        collections::HashMap,
        fs::{self, File},
        io::{BufReader, BufWriter},
        path::{Path, PathBuf},
    },
    strum_macros::Display,
};

/// Where a series handed to the pipeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SeriesOrigin {
    #[strum(to_string = "memory")]
    Memory,
    #[strum(to_string = "local cache")]
    DiskCache,
    #[strum(to_string = "network")]
    Network,
}

#[derive(Debug, Clone)]
pub struct FetchedSeries {
    pub key: FetchKey,
    pub points: Vec<PricePoint>,
    pub origin: SeriesOrigin,
    pub fetched_at_ms: i64,
}

impl FetchedSeries {
    pub fn new(key: FetchKey, points: Vec<PricePoint>, origin: SeriesOrigin) -> Self {
        Self::fetched_at(key, points, origin, chrono::Utc::now().timestamp_millis())
    }

    /// `fetched_at_ms` is when the rows left the provider, not when they were read back.
    pub fn fetched_at(
        key: FetchKey,
        points: Vec<PricePoint>,
        origin: SeriesOrigin,
        fetched_at_ms: i64,
    ) -> Self {
        Self {
            key,
            points,
            origin,
            fetched_at_ms,
        }
    }
}

/// In-process memo of downloaded series, keyed by symbol, range and interval.
/// Entries live until explicitly invalidated.
#[derive(Debug, Default)]
pub struct PriceCache {
    entries: HashMap<FetchKey, FetchedSeries>,
    hits: usize,
    misses: usize,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy tagged as coming from memory.
    pub fn get(&mut self, key: &FetchKey) -> Option<FetchedSeries> {
        match self.entries.get(key) {
            Some(series) => {
                self.hits += 1;
                if DF.log_cache {
                    log::info!("Memo hit for {}", key);
                }
                Some(FetchedSeries {
                    origin: SeriesOrigin::Memory,
                    ..series.clone()
                })
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, series: FetchedSeries) {
        self.entries.insert(series.key.clone(), series);
    }

    pub fn invalidate(&mut self, key: &FetchKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every entry except `key`. Returns how many were evicted.
    pub fn retain_only(&mut self, key: &FetchKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k == key);
        before - self.entries.len()
    }

    /// Memo side of a run request. Entries for other keys are evicted first and
    /// `refresh` evicts `key` as well. `None` means the series must be fetched.
    pub fn lookup(&mut self, key: &FetchKey, refresh: bool) -> Option<FetchedSeries> {
        let evicted = self.retain_only(key);
        if evicted > 0 && DF.log_cache {
            log::info!("Memo: evicted {} series for other settings", evicted);
        }
        if refresh {
            self.invalidate(key);
            return None;
        }
        self.get(key)
    }

    /// Takes a fetch answer while `wanted` is the current key.
    /// Answers for any other key are stale and come back as `None`.
    /// Non-empty series are memoized.
    pub fn accept(
        &mut self,
        wanted: &FetchKey,
        answered: &FetchKey,
        result: Result<FetchedSeries>,
    ) -> Option<Result<FetchedSeries>> {
        if answered != wanted {
            if DF.log_cache {
                log::info!("Memo: discarding stale answer for {}", answered);
            }
            return None;
        }
        if let Ok(series) = &result
            && !series.points.is_empty()
        {
            self.insert(series.clone());
        }
        Some(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Binary cache file wrapper with metadata
#[derive(Serialize, Deserialize, Debug)]
struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub key: FetchKey,
    pub points: Vec<PricePoint>,
}

/// bincode files under one directory, one per fetch key.
#[derive(Debug, Clone)]
pub struct DiskCache {
    directory: PathBuf,
    version: f64,
    max_age_secs: i64,
}

impl Default for DiskCache {
    fn default() -> Self {
        Self::new(PERSISTENCE.prices.directory)
    }
}

impl DiskCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_limits(
            directory,
            PERSISTENCE.prices.version,
            PERSISTENCE.prices.max_age_secs,
        )
    }

    pub fn with_limits(directory: impl Into<PathBuf>, version: f64, max_age_secs: i64) -> Self {
        Self {
            directory: directory.into(),
            version,
            max_age_secs,
        }
    }

    pub fn path_for(&self, key: &FetchKey) -> PathBuf {
        self.directory.join(price_cache_filename(key))
    }

    /// Loads a cached series, failing if it is missing, stale, from another format
    /// version, or was written for a different key.
    pub fn load(&self, key: &FetchKey) -> Result<FetchedSeries> {
        let full_path = self.path_for(key);
        let file = File::open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", full_path))?;
        let mut reader = BufReader::new(file);

        let cache: CacheFile = bincode::deserialize_from(&mut reader)
            .with_context(|| format!("Failed to deserialize cache from: {:?}", full_path))?;

        if cache.version != self.version {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                cache.version,
                self.version
            );
        }

        if cache.key != *key {
            bail!("Cache key mismatch: file holds {}, expected {}", cache.key, key);
        }

        let seconds_ago = (chrono::Utc::now().timestamp_millis() - cache.timestamp_ms) / 1000;
        if seconds_ago > self.max_age_secs {
            bail!(
                "Cache too old: created {} seconds ago (limit: {} seconds)",
                seconds_ago,
                self.max_age_secs
            );
        }

        if DF.log_cache {
            log::info!(
                "Cache valid: v{}, {}s old (limit {}s), {} rows for {}",
                cache.version,
                seconds_ago,
                self.max_age_secs,
                cache.points.len(),
                key
            );
        }

        Ok(FetchedSeries::fetched_at(
            cache.key,
            cache.points,
            SeriesOrigin::DiskCache,
            cache.timestamp_ms,
        ))
    }

    pub fn save(&self, key: &FetchKey, points: &[PricePoint]) -> Result<()> {
        let full_path = self.path_for(key);
        let file = create_file_with_parents(&full_path)?;
        let writer = BufWriter::new(file);

        let cache = CacheFile {
            version: self.version,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            key: key.clone(),
            points: points.to_vec(),
        };

        bincode::serialize_into(writer, &cache)
            .with_context(|| format!("Failed to serialize cache to: {}", full_path.display()))?;

        if DF.log_cache {
            log::info!("Cache written: {} ({} rows)", full_path.display(), points.len());
        }
        Ok(())
    }

    /// Returns whether a file was actually deleted.
    pub fn remove(&self, key: &FetchKey) -> Result<bool> {
        let full_path = self.path_for(key);
        if !full_path.exists() {
            return Ok(false);
        }
        fs::remove_file(&full_path)
            .with_context(|| format!("Failed to remove cache file: {}", full_path.display()))?;
        Ok(true)
    }
}

// Helper function to create a new file and any missing parent directories.
fn create_file_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(symbol: &str) -> FetchKey {
        FetchKey::daily(symbol, date(2023, 1, 1), date(2023, 12, 31))
    }

    fn points() -> Vec<PricePoint> {
        vec![
            PricePoint::new(date(2023, 1, 2), 10.0, 11.0, 9.5, 10.5, 1_000.0),
            PricePoint::new(date(2023, 1, 3), 10.5, 11.5, 10.0, 11.0, 1_200.0),
        ]
    }

    fn series(symbol: &str) -> FetchedSeries {
        FetchedSeries::new(key(symbol), points(), SeriesOrigin::Network)
    }

    #[test]
    fn test_memo_get_insert_invalidate() {
        let mut memo = PriceCache::new();
        assert!(memo.get(&key("PETR4.SA")).is_none());

        memo.insert(series("PETR4.SA"));
        let hit = memo.get(&key("PETR4.SA")).unwrap();
        assert_eq!(hit.origin, SeriesOrigin::Memory);
        assert_eq!(hit.points, points());
        assert_eq!((memo.hits(), memo.misses()), (1, 1));

        assert!(memo.invalidate(&key("PETR4.SA")));
        assert!(!memo.invalidate(&key("PETR4.SA")));
        assert!(memo.is_empty());
    }

    #[test]
    fn test_memo_retain_only() {
        let mut memo = PriceCache::new();
        memo.insert(series("PETR4.SA"));
        memo.insert(series("VALE3.SA"));
        memo.insert(series("ITUB4.SA"));

        assert_eq!(memo.retain_only(&key("VALE3.SA")), 2);
        assert_eq!(memo.len(), 1);
        assert!(memo.get(&key("VALE3.SA")).is_some());
    }

    #[test]
    fn test_lookup_hit_and_refresh() {
        let mut memo = PriceCache::new();
        memo.insert(series("PETR4.SA"));
        memo.insert(series("VALE3.SA"));

        let hit = memo.lookup(&key("PETR4.SA"), false).unwrap();
        assert_eq!(hit.origin, SeriesOrigin::Memory);
        assert_eq!(memo.len(), 1);

        assert!(memo.lookup(&key("PETR4.SA"), true).is_none());
        assert!(memo.is_empty());
        assert!(memo.lookup(&key("PETR4.SA"), false).is_none());
    }

    #[test]
    fn test_accept_memoizes_only_current_non_empty_series() {
        let mut memo = PriceCache::new();
        let wanted = key("PETR4.SA");

        let answer = memo.accept(&wanted, &wanted, Ok(series("PETR4.SA")));
        assert_eq!(answer.unwrap().unwrap().points, points());
        assert_eq!(memo.len(), 1);

        memo.invalidate(&wanted);
        let empty = FetchedSeries::new(wanted.clone(), Vec::new(), SeriesOrigin::Network);
        let answer = memo.accept(&wanted, &wanted, Ok(empty));
        assert!(answer.unwrap().unwrap().points.is_empty());
        assert!(memo.is_empty());

        let failed = memo.accept(&wanted, &wanted, Err(anyhow::anyhow!("timed out")));
        assert!(failed.unwrap().is_err());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_accept_discards_stale_answers() {
        let mut memo = PriceCache::new();
        let stale = memo.accept(&key("PETR4.SA"), &key("VALE3.SA"), Ok(series("VALE3.SA")));
        assert!(stale.is_none());
        assert!(memo.is_empty());

        let stale = memo.accept(&key("PETR4.SA"), &key("VALE3.SA"), Err(anyhow::anyhow!("404")));
        assert!(stale.is_none());
    }

    #[test]
    fn test_disk_round_trip() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path().join("nested"));
        disk.save(&key("PETR4.SA"), &points()).unwrap();
        let loaded = disk.load(&key("PETR4.SA")).unwrap();
        assert_eq!(loaded.points, points());
        assert_eq!(loaded.origin, SeriesOrigin::DiskCache);
        assert!(loaded.fetched_at_ms <= chrono::Utc::now().timestamp_millis());
        assert!(disk.load(&key("VALE3.SA")).is_err());
    }

    #[test]
    fn test_disk_rejects_stale_and_old_versions() {
        let dir = TempDir::new().unwrap();
        DiskCache::with_limits(dir.path(), 0.5, 3600)
            .save(&key("PETR4.SA"), &points())
            .unwrap();

        let current = DiskCache::with_limits(dir.path(), 1.0, 3600);
        let err = current.load(&key("PETR4.SA")).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));

        let expired = DiskCache::with_limits(dir.path(), 0.5, -1);
        let err = expired.load(&key("PETR4.SA")).unwrap_err();
        assert!(err.to_string().contains("too old"));
    }

    #[test]
    fn test_disk_remove() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        assert!(!disk.remove(&key("PETR4.SA")).unwrap());
        disk.save(&key("PETR4.SA"), &points()).unwrap();
        assert!(disk.remove(&key("PETR4.SA")).unwrap());
        assert!(disk.load(&key("PETR4.SA")).is_err());
    }
}
