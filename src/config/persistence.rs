//! File persistence and serialization configuration
use crate::domain::FetchKey;

/// Configuration for the on-disk price cache
pub struct PriceCachePersistenceConfig {
    /// Directory path for storing downloaded price series
    pub directory: &'static str,
    /// Prefix for cache files (without extension)
    pub filename_base: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
    /// Cached series older than this are re-downloaded
    pub max_age_secs: i64,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading dashboard settings
    pub state_path: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub prices: PriceCachePersistenceConfig,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    prices: PriceCachePersistenceConfig {
        directory: "price_data",
        filename_base: "px",
        version: 1.0,
        max_age_secs: 12 * 60 * 60,
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};

/// Cache filename for one fetch key.
/// Example: "px_PETR4.SA_2023-01-01_2025-12-31_1d_v1.bin"
pub fn price_cache_filename(key: &FetchKey) -> String {
    format!(
        "{}_{}_v{}.bin",
        PERSISTENCE.prices.filename_base,
        key.file_stem(),
        PERSISTENCE.prices.version
    )
}
