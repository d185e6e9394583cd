//! The read-only store seam the resolver, engine and title catalog depend on.

use async_trait::async_trait;

use cinegraph_core::Recommendation;
use cinegraph_graph::GraphClient;

use crate::error::StoreError;

/// A backing movie graph that answers the three read queries.
///
/// Implementations must be safe to share across concurrent requests and
/// must never mutate the graph.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Canonical stored title of the first movie matching `title` case-insensitively.
    async fn resolve_title(&self, title: &str) -> Result<Option<String>, StoreError>;

    /// Ranked candidates sharing genres and actors with `seed`, at most `limit` rows.
    async fn recommendations(
        &self,
        seed: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, StoreError>;

    /// All movie titles, ascending.
    async fn list_titles(&self) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl MovieStore for GraphClient {
    async fn resolve_title(&self, title: &str) -> Result<Option<String>, StoreError> {
        Ok(self.find_movie_title(title).await?)
    }

    async fn recommendations(
        &self,
        seed: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, StoreError> {
        Ok(self.recommend_for_title(seed, limit).await?)
    }

    async fn list_titles(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.list_movie_titles().await?)
    }
}
