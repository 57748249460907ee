//! In-memory snapshot cache over the two upstream sources
//!
//! The snapshot is the only mutable shared state in the process. It is
//! replaced wholesale on every successful refresh so readers never observe a
//! mismatched list/timestamp pair, and it lives for the process lifetime.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::data::{merge, CountryRecord, Upstream, UpstreamError};

/// How long a refreshed snapshot is served without contacting the upstreams
const VALIDITY_WINDOW_SECS: i64 = 3600;

/// One full merged country list plus the moment it was fetched
#[derive(Debug, Clone)]
struct Snapshot {
    countries: Arc<Vec<CountryRecord>>,
    fetched_at: DateTime<Utc>,
}

/// Time-bounded cache of the merged country list
///
/// `get_all` serves a fresh snapshot without any upstream call. On a miss or
/// after expiry it refreshes: both fetches run concurrently, the joiner runs
/// over every country, and the snapshot is replaced atomically. Concurrent
/// misses coalesce onto a single in-flight refresh rather than each issuing
/// redundant upstream calls.
pub struct AggregateCache {
    upstream: Arc<dyn Upstream>,
    validity: Duration,
    slot: RwLock<Option<Snapshot>>,
    refresh_gate: Mutex<()>,
}

impl AggregateCache {
    /// Creates a cache with the standard one-hour validity window
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self::with_validity(upstream, Duration::seconds(VALIDITY_WINDOW_SECS))
    }

    /// Creates a cache with a custom validity window (for testing)
    pub fn with_validity(upstream: Arc<dyn Upstream>, validity: Duration) -> Self {
        Self {
            upstream,
            validity,
            slot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Returns the merged country list, refreshing if the snapshot is
    /// missing or older than the validity window
    ///
    /// # Failure
    /// If the essential country fetch fails the error surfaces to the caller
    /// and the existing snapshot (stale or empty) is left untouched.
    pub async fn get_all(&self) -> Result<Arc<Vec<CountryRecord>>, UpstreamError> {
        if let Some(countries) = self.fresh().await {
            return Ok(countries);
        }

        // Single flight: one refresh at a time. Waiters re-check freshness
        // after the gate in case the previous holder already refreshed.
        let _gate = self.refresh_gate.lock().await;
        if let Some(countries) = self.fresh().await {
            return Ok(countries);
        }

        self.refresh().await
    }

    /// Returns the current snapshot if it is within the validity window
    async fn fresh(&self) -> Option<Arc<Vec<CountryRecord>>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|snapshot| Utc::now() - snapshot.fetched_at < self.validity)
            .map(|snapshot| Arc::clone(&snapshot.countries))
    }

    /// Fetches both sources concurrently, merges, and replaces the snapshot
    async fn refresh(&self) -> Result<Arc<Vec<CountryRecord>>, UpstreamError> {
        let started = Instant::now();

        let (countries, populations) = futures::join!(
            self.upstream.fetch_countries(),
            self.upstream.fetch_populations()
        );
        let countries = countries?;

        let merged: Vec<CountryRecord> = countries
            .into_iter()
            .map(|country| merge(country, &populations))
            .collect();

        let countries = Arc::new(merged);
        let snapshot = Snapshot {
            countries: Arc::clone(&countries),
            fetched_at: Utc::now(),
        };
        *self.slot.write().await = Some(snapshot);

        tracing::info!(
            countries = countries.len(),
            populations = populations.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "refreshed country snapshot"
        );
        Ok(countries)
    }
}
