//! Read queries against the movie graph.
//!
//! The Cypher text is fixed; only `$title` and `$limit` vary per call.

use neo4rs::query;

use cinegraph_core::Recommendation;

use crate::client::{GraphClient, GraphError};

/// First movie whose title matches `$title` case-insensitively.
pub const RESOLVE_TITLE: &str = "MATCH (m:Movie) WHERE toLower(m.title) = toLower($title)
RETURN m.title AS title
LIMIT 1";

/// Candidates sharing at least one genre AND at least one actor with the seed.
///
/// The actor MATCH is a required pattern, so genre-only candidates drop out.
/// Counts are over matched paths, not distinct nodes.
pub const RECOMMEND_FOR_TITLE: &str = "MATCH (m:Movie) WHERE toLower(m.title) = toLower($title)
MATCH (m)-[:HAS_GENRE]->(g:Genre)
MATCH (rec:Movie)-[:HAS_GENRE]->(g)
WHERE m <> rec
WITH m, rec, count(g) AS sharedGenres
MATCH (m)<-[:ACTED_IN]-(a:Actor)-[:ACTED_IN]->(rec)
WITH rec, sharedGenres, count(a) AS sharedActors
RETURN rec.title AS Recommendation, sharedGenres, sharedActors
ORDER BY sharedActors DESC, sharedGenres DESC, Recommendation ASC
LIMIT $limit";

/// Every movie title, ascending.
pub const LIST_TITLES: &str = "MATCH (m:Movie) RETURN m.title AS title ORDER BY title";

impl GraphClient {
    /// Resolve free text to the canonical stored title.
    pub async fn find_movie_title(&self, title: &str) -> Result<Option<String>, GraphError> {
        let q = query(RESOLVE_TITLE).param("title", title.to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let stored: String = row.get("title").map_err(|e| {
                    GraphError::Serialization(format!("Failed to read movie title: {e}"))
                })?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    /// Ranked recommendations for a seed title, at most `limit` rows.
    pub async fn recommend_for_title(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, GraphError> {
        let q = query(RECOMMEND_FOR_TITLE)
            .param("title", title.to_string())
            .param("limit", limit as i64);

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let rec_title: String = row.get("Recommendation").map_err(|e| {
                GraphError::Serialization(format!("Failed to read Recommendation: {e}"))
            })?;
            let shared_genres = count_column(&row, "sharedGenres")?;
            let shared_actors = count_column(&row, "sharedActors")?;
            results.push(Recommendation {
                title: rec_title,
                shared_genres,
                shared_actors,
            });
        }

        tracing::debug!(seed = %title, rows = results.len(), "Fetched recommendations");
        Ok(results)
    }

    /// All movie titles in ascending order.
    pub async fn list_movie_titles(&self) -> Result<Vec<String>, GraphError> {
        let rows = self.query_rows(query(LIST_TITLES)).await?;
        let mut titles = Vec::with_capacity(rows.len());
        for row in rows {
            // Movies without a title sort first in Cypher; skip them.
            if let Ok(title) = row.get::<String>("title") {
                titles.push(title);
            }
        }
        Ok(titles)
    }
}

/// Read a Cypher `count()` column as an unsigned integer.
fn count_column(row: &neo4rs::Row, column: &str) -> Result<u64, GraphError> {
    let raw: i64 = row
        .get(column)
        .map_err(|e| GraphError::Serialization(format!("Failed to read {column}: {e}")))?;
    u64::try_from(raw)
        .map_err(|_| GraphError::Serialization(format!("Negative count in {column}: {raw}")))
}
