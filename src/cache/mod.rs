//! Stale-cache response policy
//!
//! One in-memory entry per upstream table, governed by a single TTL. A read
//! within the TTL serves the cached payload untouched; an expired or empty
//! entry triggers an upstream fetch. When that fetch fails, the last-known
//! payload (of any age) is served marked stale; with nothing cached the
//! failure propagates. Data is never fabricated.
//!
//! The cache lock is released while the upstream fetch is in flight, so two
//! requests racing an expired entry may both fetch; the last writer wins.
//! Both read the same upstream, which keeps the race harmless.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::AppResult;
use crate::models::{StatKind, StatSnapshot};
use crate::sources::StatSource;

/// How a read request was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Payload younger than the TTL, no upstream call
    FreshHit,
    /// Entry empty or expired, upstream fetch succeeded
    MissThenFill,
    /// Upstream fetch failed, last-known payload served
    ServedStale,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::FreshHit => "fresh-hit",
            CacheStatus::MissThenFill => "miss-then-fill",
            CacheStatus::ServedStale => "served-stale",
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: StatSnapshot,
    fetched_at: DateTime<Utc>,
}

/// Outcome of a cached table read
#[derive(Debug, Clone)]
pub struct CachedTable {
    pub snapshot: StatSnapshot,
    pub status: CacheStatus,
    /// Upstream failure message when serving stale
    pub error: Option<String>,
}

impl CachedTable {
    pub fn is_stale(&self) -> bool {
        self.status == CacheStatus::ServedStale
    }
}

/// Per-table snapshot cache shared across requests
#[derive(Clone)]
pub struct SnapshotCache {
    entries: Arc<RwLock<HashMap<StatKind, CacheEntry>>>,
    ttl: chrono::Duration,
}

impl SnapshotCache {
    /// Create a cache with a static TTL (short in dev, long in production)
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::milliseconds(ttl.as_millis() as i64),
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// When a table was last filled, if ever
    pub async fn fetched_at(&self, kind: StatKind) -> Option<DateTime<Utc>> {
        self.entries.read().await.get(&kind).map(|e| e.fetched_at)
    }

    /// Serve a table according to the stale-cache policy
    ///
    /// Errors only when the upstream fetch fails and nothing was ever
    /// cached for this table.
    pub async fn get(&self, kind: StatKind, source: &dyn StatSource) -> AppResult<CachedTable> {
        let now = Utc::now();
        if let Some(entry) = self.entries.read().await.get(&kind) {
            if now - entry.fetched_at < self.ttl {
                debug!("cache fresh-hit for {} table", kind);
                return Ok(CachedTable {
                    snapshot: entry.payload.clone(),
                    status: CacheStatus::FreshHit,
                    error: None,
                });
            }
        }

        // Lock released during the fetch; concurrent expirations may
        // double-fetch and the last writer wins.
        match source.fetch(kind).await {
            Ok(snapshot) => {
                debug!(
                    "cache miss-then-fill for {} table ({} rows)",
                    kind,
                    snapshot.rows.len()
                );
                let entry = CacheEntry {
                    payload: snapshot.clone(),
                    fetched_at: Utc::now(),
                };
                self.entries.write().await.insert(kind, entry);
                Ok(CachedTable {
                    snapshot,
                    status: CacheStatus::MissThenFill,
                    error: None,
                })
            }
            Err(err) => {
                let last_known = self.entries.read().await.get(&kind).cloned();
                match last_known {
                    Some(entry) => {
                        warn!(
                            "upstream fetch for {} table failed ({}), serving stale payload from {}",
                            kind, err, entry.fetched_at
                        );
                        Ok(CachedTable {
                            snapshot: entry.payload,
                            status: CacheStatus::ServedStale,
                            error: Some(err.to_string()),
                        })
                    }
                    None => {
                        warn!("upstream fetch for {} table failed with empty cache: {}", kind, err);
                        Err(err)
                    }
                }
            }
        }
    }
}
