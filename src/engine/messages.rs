use crate::{data::FetchedSeries, domain::FetchKey};

/// A download request for the fetch worker.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub key: FetchKey,
    /// Skip the local cache and go straight to the provider.
    pub refresh: bool,
}

/// The result returned by the worker
#[derive(Debug)]
pub struct FetchResult {
    pub key: FetchKey,
    pub duration_ms: u128,
    pub result: anyhow::Result<FetchedSeries>,
}
