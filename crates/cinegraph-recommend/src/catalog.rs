//! Read-through cache of the full title list, used for input assistance.
//!
//! A snapshot stays fresh for `ttl`, after which the next reader refetches.
//! `invalidate` forces a refetch regardless of age.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::MovieStore;

/// One fetched copy of the title list.
#[derive(Debug, Clone)]
pub struct TitleSnapshot {
    pub titles: Arc<Vec<String>>,
    pub fetched_at: DateTime<Utc>,
}

impl TitleSnapshot {
    fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.fetched_at) < ttl,
            // A TTL too large for chrono never expires.
            Err(_) => true,
        }
    }
}

pub struct TitleCatalog {
    store: Arc<dyn MovieStore>,
    ttl: Duration,
    cached: RwLock<Option<TitleSnapshot>>,
}

impl TitleCatalog {
    pub fn new(store: Arc<dyn MovieStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Sorted titles, served from cache while fresh.
    pub async fn titles(&self) -> Result<Arc<Vec<String>>> {
        Ok(self.snapshot().await?.titles)
    }

    /// The current snapshot, refetching if missing or stale.
    pub async fn snapshot(&self) -> Result<TitleSnapshot> {
        {
            let cached = self.cached.read().await;
            if let Some(snapshot) = cached.as_ref() {
                if snapshot.is_fresh(self.ttl, Utc::now()) {
                    return Ok(snapshot.clone());
                }
            }
        }

        let mut cached = self.cached.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(snapshot) = cached.as_ref() {
            if snapshot.is_fresh(self.ttl, Utc::now()) {
                return Ok(snapshot.clone());
            }
        }

        let titles = self.store.list_titles().await?;
        tracing::info!(count = titles.len(), "Refreshed title catalog");
        let snapshot = TitleSnapshot {
            titles: Arc::new(titles),
            fetched_at: Utc::now(),
        };
        *cached = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next read refetches.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}
