use {
    super::messages::{FetchRequest, FetchResult},
    crate::{
        config::DF,
        data::{DiskCache, MarketDataProvider, fetch_series},
        utils::AppInstant,
    },
    anyhow::Context,
    std::{
        sync::mpsc::{Receiver, Sender},
        thread,
    },
    tokio::runtime::Runtime,
};

/// Spawns a background thread that serves fetch requests one at a time on its own tokio runtime.
/// The thread exits when the request channel closes.
pub fn spawn_fetch_worker(
    provider: Box<dyn MarketDataProvider>,
    disk: Option<DiskCache>,
    rx: Receiver<FetchRequest>,
    tx: Sender<FetchResult>,
) {
    thread::spawn(move || {
        let rt = match Runtime::new().context("Failed to create runtime") {
            Ok(rt) => rt,
            Err(e) => {
                // Answer every request with the runtime error.
                let msg = format!("{:#}", e);
                while let Ok(req) = rx.recv() {
                    let _ = tx.send(FetchResult {
                        key: req.key,
                        duration_ms: 0,
                        result: Err(anyhow::anyhow!(msg.clone())),
                    });
                }
                return;
            }
        };

        while let Ok(req) = rx.recv() {
            if DF.log_worker {
                log::info!("Worker: fetching {} (refresh: {})", req.key, req.refresh);
            }
            let start = AppInstant::now();
            let result = rt.block_on(fetch_series(
                provider.as_ref(),
                disk.as_ref(),
                &req.key,
                req.refresh,
            ));
            let response = FetchResult {
                key: req.key,
                duration_ms: start.elapsed().as_millis(),
                result,
            };
            if tx.send(response).is_err() {
                break;
            }
        }

        if DF.log_worker {
            log::info!("Worker: request channel closed, exiting");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchKey, PricePoint};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{sync::mpsc, time::Duration};

    struct OneBar;

    #[async_trait]
    impl MarketDataProvider for OneBar {
        fn signature(&self) -> &'static str {
            "OneBar"
        }

        async fn fetch_daily_bars(&self, key: &FetchKey) -> Result<Vec<PricePoint>> {
            Ok(vec![PricePoint::new(key.start, 1.0, 2.0, 0.5, 1.5, 10.0)])
        }
    }

    #[test]
    fn test_worker_round_trip() {
        let (req_tx, req_rx) = mpsc::channel();
        let (res_tx, res_rx) = mpsc::channel();
        spawn_fetch_worker(Box::new(OneBar), None, req_rx, res_tx);

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let key = FetchKey::daily("PETR4.SA", date, date);
        req_tx
            .send(FetchRequest {
                key: key.clone(),
                refresh: false,
            })
            .unwrap();

        let response = res_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(response.key, key);
        assert_eq!(response.result.unwrap().points.len(), 1);
    }
}
