use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use models::{search, PairKey, Store, StorePatch, StoreReport};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::registry::keys::{new_store_id, store_key, STORE_KEY_PREFIX};
use crate::registry::seed::sample_stores;
use crate::storage::kv::{KvEntry, KvStore};

/// Result of a seating report: either a fresh record or an existing one it was folded into.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportOutcome {
    Created(Store),
    Merged(Store),
}

impl ReportOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, ReportOutcome::Created(_))
    }

    pub fn store(&self) -> &Store {
        match self {
            ReportOutcome::Created(s) | ReportOutcome::Merged(s) => s,
        }
    }

    pub fn into_store(self) -> Store {
        match self {
            ReportOutcome::Created(s) | ReportOutcome::Merged(s) => s,
        }
    }
}

/// Application service owning the canonical `Store` representation.
///
/// Reports for the same case-insensitive `(name, address)` pair are serialized through a
/// per-pair async lock held across the scan and the write, so concurrent first reports for
/// one place inside this process produce a single record. Writers in other processes
/// sharing the same substrate are not covered. Updates by id are last-write-wins.
pub struct StoreRegistry {
    kv: Arc<dyn KvStore>,
    pair_locks: DashMap<PairKey, Arc<Mutex<()>>>,
}

impl StoreRegistry {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, pair_locks: DashMap::new() }
    }

    /// Create a record for a new `(name, address)` pair, or merge into the existing one.
    #[instrument(skip(self, report))]
    pub async fn report(&self, report: StoreReport) -> Result<ReportOutcome, ServiceError> {
        let report = report.normalize()?;
        let pair = report.pair_key();

        let lock = self
            .pair_locks
            .entry(pair.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let outcome = {
            let _guard = lock.lock().await;
            self.report_locked(report).await
        };
        drop(lock);
        self.pair_locks.remove_if(&pair, |_, l| Arc::strong_count(l) == 1);
        outcome
    }

    async fn report_locked(&self, report: models::NormalizedReport) -> Result<ReportOutcome, ServiceError> {
        let entries = self.kv.get_by_prefix(STORE_KEY_PREFIX).await?;
        // First match wins if the substrate already holds duplicates.
        let duplicate = entries
            .into_iter()
            .filter_map(decode_entry)
            .find(|(_, store)| report.matches(store));
        let now = Utc::now();

        if let Some((key, existing)) = duplicate {
            let merged = report.merge_into(existing, now);
            self.kv.set(&key, merged.to_value()?).await?;
            info!(id = %merged.id, name = %merged.name, has_seating = %merged.has_seating, "store report merged");
            return Ok(ReportOutcome::Merged(merged));
        }

        let id = new_store_id(now);
        let created = report.into_store(id, now);
        self.kv.set(&store_key(&created.id), created.to_value()?).await?;
        info!(id = %created.id, name = %created.name, has_seating = %created.has_seating, "store created");
        Ok(ReportOutcome::Created(created))
    }

    /// All records, most recently updated first. Ties fall back to id order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Store>, ServiceError> {
        let entries = self.kv.get_by_prefix(STORE_KEY_PREFIX).await?;
        let mut stores: Vec<Store> = entries.into_iter().filter_map(decode_entry).map(|(_, s)| s).collect();
        stores.sort_by(|a, b| b.last_updated.cmp(&a.last_updated).then_with(|| a.id.cmp(&b.id)));
        info!(count = stores.len(), "listed stores");
        Ok(stores)
    }

    /// `list` narrowed by a name/address substring query. A blank query returns everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Store>, ServiceError> {
        let stores = self.list().await?;
        Ok(search::filter_stores(&stores, query))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Store, ServiceError> {
        let value = self
            .kv
            .get(&store_key(id))
            .await?
            .ok_or_else(|| ServiceError::not_found("store"))?;
        Ok(Store::from_value(value)?)
    }

    /// Patch fields of the record at `id`. No duplicate-pair detection happens here.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: StorePatch) -> Result<Store, ServiceError> {
        let mut store = self.get(id).await?;
        patch.apply(&mut store, Utc::now());
        self.kv.set(&store_key(id), store.to_value()?).await?;
        info!(id = %id, has_seating = %store.has_seating, "store updated");
        Ok(store)
    }

    /// Overwrite the canned sample records. Bypasses merge: a sample sharing a name and
    /// address with a reported store sits next to it rather than replacing it.
    #[instrument(skip(self))]
    pub async fn seed_samples(&self) -> Result<usize, ServiceError> {
        let samples = sample_stores(Utc::now());
        for store in &samples {
            self.kv.set(&store_key(&store.id), store.to_value()?).await?;
        }
        info!(count = samples.len(), "sample stores written");
        Ok(samples.len())
    }
}

fn decode_entry(entry: KvEntry) -> Option<(String, Store)> {
    match Store::from_value(entry.value) {
        Ok(store) => Some((entry.key, store)),
        Err(e) => {
            warn!(key = %entry.key, error = %e, "skipping undecodable store record");
            None
        }
    }
}
