//! Recommendation engine: ranked candidates for a resolved seed.

use std::sync::Arc;

use cinegraph_core::Recommendation;

use crate::error::Result;
use crate::ranking::{self, RECOMMENDATION_LIMIT};
use crate::store::MovieStore;

/// Ranks movies by actors and genres shared with a seed title.
///
/// Only candidates sharing at least one genre and at least one actor are
/// returned; genre-only overlap never qualifies.
#[derive(Clone)]
pub struct RecommendationEngine {
    store: Arc<dyn MovieStore>,
    limit: u32,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            store,
            limit: RECOMMENDATION_LIMIT,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Ranked recommendations for `seed`. An empty vector is a valid answer.
    pub async fn recommend(&self, seed: &str) -> Result<Vec<Recommendation>> {
        let rows = self
            .store
            .recommendations(seed, self.limit)
            .await
            .map_err(|e| {
                tracing::warn!(seed, error = %e, "Recommendation query failed");
                e
            })?;

        let fetched = rows.len();
        let ranked = ranking::rank(rows, self.limit);
        if ranked.len() != fetched {
            tracing::debug!(
                seed,
                fetched,
                kept = ranked.len(),
                "Dropped rows outside the ranking rule"
            );
        }

        tracing::debug!(seed, count = ranked.len(), "Ranked recommendations");
        Ok(ranked)
    }
}
