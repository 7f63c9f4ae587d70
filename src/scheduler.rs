use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::batch::{fetch_batch, FetchItem};
use crate::client::ScoresheetClient;
use crate::config::RefreshConfig;
use crate::error::Result;
use crate::store::{CacheRecord, CacheStore, Records};

// ============================================================================
// REFRESH CYCLES
// ============================================================================

/// Re-reads the listing and every competition's sheet, then replaces those records.
/// Cached ids missing from the new listing are kept.
pub async fn full_refresh(client: &ScoresheetClient, store: &CacheStore) -> Result<usize> {
    let mut listing = client.fetch_listing().await?;

    let items: Vec<FetchItem> = listing
        .values()
        .map(|meta| FetchItem {
            id: meta.id,
            team: meta.team,
            open: meta.open,
        })
        .collect();

    let mut batch = Records::with_capacity(items.len());
    for (id, sheet) in fetch_batch(client, &items).await {
        if let Some(meta) = listing.remove(&id) {
            batch.insert(
                id,
                CacheRecord {
                    meta,
                    sheet,
                    updated_at: Some(Utc::now()),
                },
            );
        }
    }

    let count = batch.len();
    store.merge_full(batch);
    info!(competitions = count, "Full refresh done");
    Ok(count)
}

/// Re-reads the sheets of competitions marked open, always with the open layout.
/// A failed fetch replaces the cached sheet with `None`.
pub async fn fast_refresh(client: &ScoresheetClient, store: &CacheStore) -> usize {
    let items: Vec<FetchItem> = store
        .snapshot_all()
        .values()
        .filter(|record| record.meta.open)
        .map(|record| FetchItem {
            id: record.meta.id,
            team: record.meta.team,
            open: true,
        })
        .collect();

    if items.is_empty() {
        return 0;
    }

    let ids: Vec<_> = items.iter().map(|item| item.id).collect();
    let sheets: HashMap<_, _> = fetch_batch(client, &items).await.into_iter().collect();
    store.merge_partial(&ids, sheets, Utc::now());
    ids.len()
}

// ============================================================================
// WORKER
// ============================================================================

struct Worker {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Owns the background task that keeps a [`CacheStore`] fresh.
///
/// The worker runs one full refresh, then loops: every tick it runs a fast
/// refresh, and every `full_refresh_every` ticks a full refresh before it.
pub struct RefreshScheduler {
    client: ScoresheetClient,
    store: Arc<CacheStore>,
    config: RefreshConfig,
    worker: Option<Worker>,
}

impl RefreshScheduler {
    pub fn new(config: RefreshConfig, store: Arc<CacheStore>) -> Result<Self> {
        Ok(Self {
            client: ScoresheetClient::new(&config.base_url)?,
            store,
            config,
            worker: None,
        })
    }

    pub fn store(&self) -> Arc<CacheStore> {
        Arc::clone(&self.store)
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// Spawns the worker on the current tokio runtime; does nothing if it is already running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_worker(
            self.client.clone(),
            Arc::clone(&self.store),
            self.config.clone(),
            stop_rx,
        ));
        self.worker = Some(Worker { stop_tx, handle });
    }

    /// Signals the worker and waits for it to exit; does nothing if it is not running
    pub async fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        let _ = worker.stop_tx.send(true);
        if let Err(e) = worker.handle.await {
            warn!(error = %e, "Refresh worker ended abnormally");
        }
    }
}

async fn run_worker(
    client: ScoresheetClient,
    store: Arc<CacheStore>,
    config: RefreshConfig,
    mut stop_rx: watch::Receiver<bool>,
) {
    info!(base_url = client.base_url(), "Refresh worker started");
    run_full_refresh(&client, &store).await;

    let mut ticks: u32 = 0;
    while !*stop_rx.borrow() {
        ticks += 1;
        if ticks >= config.full_refresh_every {
            run_full_refresh(&client, &store).await;
            ticks = 0;
        }

        fast_refresh(&client, &store).await;

        tokio::select! {
            _ = tokio::time::sleep(config.tick) => {}
            changed = stop_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!("Refresh worker stopped");
}

async fn run_full_refresh(client: &ScoresheetClient, store: &CacheStore) {
    if let Err(e) = full_refresh(client, store).await {
        warn!(error = %e, "Full refresh failed, keeping cached listing");
    }
}
