//! Debugging feature flags.

/// Activate trace_time macro (scope-level timing of pipeline stages)
pub const LOG_PERFORMANCE: bool = cfg!(debug_assertions);

#[allow(dead_code)]
pub struct LogFlags {
    /// Requests and row counts from the market data provider.
    pub log_data_source: bool,
    /// Memo hits/misses, disk cache reads and writes.
    pub log_cache: bool,
    /// One line per pipeline stage with its output sizes.
    pub log_pipeline_stages: bool,
    /// Background fetch thread lifecycle.
    pub log_worker: bool,
    /// Settings changes coming from the side panel.
    pub log_settings: bool,
}

pub const DF: LogFlags = LogFlags {
    log_data_source: true,
    log_cache: true,
    log_pipeline_stages: true,
    log_worker: false,
    log_settings: false,
};
