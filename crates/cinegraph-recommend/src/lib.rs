//! cinegraph-recommend: Movie recommendations from a movie/actor/genre graph.
//!
//! Resolves a user-supplied title against the store, then ranks other
//! movies by how many actors and genres they share with it. Works against
//! Neo4j through `cinegraph-graph` or against an in-memory catalog.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod memory;
pub mod ranking;
pub mod resolver;
pub mod store;

pub use catalog::TitleCatalog;
pub use engine::RecommendationEngine;
pub use error::{RecommendError, StoreError};
pub use memory::InMemoryStore;
pub use resolver::TitleResolver;
pub use store::MovieStore;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinegraph_core::{RecommendationOutcome, TitleResolution};

/// Result of one recommend request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub request_id: Uuid,
    /// Title exactly as the user supplied it.
    pub input: String,
    pub outcome: RecommendationOutcome,
    pub computation_ms: u64,
}

/// Resolver and engine wired to one shared store.
#[derive(Clone)]
pub struct Recommender {
    resolver: TitleResolver,
    engine: RecommendationEngine,
}

impl Recommender {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            resolver: TitleResolver::new(store.clone()),
            engine: RecommendationEngine::new(store),
        }
    }

    pub fn resolver(&self) -> &TitleResolver {
        &self.resolver
    }

    /// Resolve `title`, then rank recommendations for the canonical title.
    ///
    /// An unknown title yields `RecommendationOutcome::NotFound` and the
    /// engine is not consulted. Only store failures are errors.
    pub async fn recommend(&self, title: &str) -> error::Result<RecommendationReport> {
        let start = std::time::Instant::now();
        let request_id = Uuid::new_v4();

        let outcome = match self.resolver.resolve(title).await? {
            TitleResolution::NotFound => RecommendationOutcome::NotFound {
                query: title.to_string(),
            },
            TitleResolution::Resolved { title: seed } => {
                let recommendations = self.engine.recommend(&seed).await?;
                RecommendationOutcome::for_seed(seed, recommendations)
            }
        };

        let computation_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            %request_id,
            input = %title,
            results = outcome.recommendations().len(),
            computation_ms,
            "Recommendation request complete"
        );

        Ok(RecommendationReport {
            request_id,
            input: title.to_string(),
            outcome,
            computation_ms,
        })
    }
}
