//! In-memory movie graph that evaluates the same read queries as Neo4j.
//!
//! Built from a JSON catalog so the recommender can run without a server:
//!
//! ```json
//! {"movies": [{"title": "Inception", "genres": ["Sci-Fi"], "actors": ["Leonardo DiCaprio"]}]}
//! ```
//!
//! Movie identity is the catalog position, so two entries with the same
//! title are distinct movies. Genres and actors are identified by name.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use cinegraph_core::{MovieEntry, Recommendation};

use crate::error::{RecommendError, Result, StoreError};
use crate::ranking;
use crate::store::MovieStore;

#[derive(Deserialize)]
struct CatalogFile {
    movies: Vec<MovieEntry>,
}

/// Compact movie node with relationship multiplicities.
#[derive(Debug, Clone)]
struct MovieNode {
    title: String,
    title_lower: String,
    /// Genre name → number of HAS_GENRE edges to it.
    genres: HashMap<String, u64>,
    /// Actor name → number of ACTED_IN edges from it.
    actors: HashMap<String, u64>,
}

/// A read-only movie graph held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    movies: Vec<MovieNode>,
}

impl InMemoryStore {
    pub fn new(entries: Vec<MovieEntry>) -> Self {
        let movies = entries
            .into_iter()
            .map(|entry| MovieNode {
                title_lower: entry.title.to_lowercase(),
                title: entry.title,
                genres: multiplicities(entry.genres),
                actors: multiplicities(entry.actors),
            })
            .collect();
        Self { movies }
    }

    /// Parse a `{"movies": [...]}` catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: CatalogFile =
            serde_json::from_str(json).map_err(|e| RecommendError::Catalog(e.to_string()))?;
        Ok(Self::new(catalog.movies))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), movies = store.len(), "Loaded movie catalog");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Indices of every movie whose title matches case-insensitively.
    fn matching(&self, title: &str) -> impl Iterator<Item = usize> + '_ {
        let needle = title.to_lowercase();
        self.movies
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.title_lower == needle)
            .map(|(i, _)| i)
    }

    /// Unranked candidate rows for every seed matching `title`.
    ///
    /// Mirrors the two aggregation steps of the Cypher query: genre paths
    /// are counted per (seed, candidate), then actor paths are summed per
    /// (candidate, shared genre count).
    pub fn candidates(&self, title: &str) -> Vec<Recommendation> {
        let mut groups: Vec<(usize, u64, u64)> = Vec::new();
        let mut group_index: HashMap<(usize, u64), usize> = HashMap::new();

        for seed_idx in self.matching(title) {
            let seed = &self.movies[seed_idx];
            for (rec_idx, rec) in self.movies.iter().enumerate() {
                if rec_idx == seed_idx {
                    continue;
                }
                let shared_genres = shared_paths(&seed.genres, &rec.genres);
                if shared_genres == 0 {
                    continue;
                }
                let shared_actors = shared_paths(&seed.actors, &rec.actors);
                if shared_actors == 0 {
                    continue;
                }

                match group_index.get(&(rec_idx, shared_genres)) {
                    Some(&pos) => groups[pos].2 += shared_actors,
                    None => {
                        group_index.insert((rec_idx, shared_genres), groups.len());
                        groups.push((rec_idx, shared_genres, shared_actors));
                    }
                }
            }
        }

        groups
            .into_iter()
            .map(|(rec_idx, shared_genres, shared_actors)| {
                Recommendation::new(&self.movies[rec_idx].title, shared_genres, shared_actors)
            })
            .collect()
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn resolve_title(&self, title: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self
            .matching(title)
            .next()
            .map(|i| self.movies[i].title.clone()))
    }

    async fn recommendations(
        &self,
        seed: &str,
        limit: u32,
    ) -> std::result::Result<Vec<Recommendation>, StoreError> {
        Ok(ranking::rank(self.candidates(seed), limit))
    }

    async fn list_titles(&self) -> std::result::Result<Vec<String>, StoreError> {
        let mut titles: Vec<String> = self.movies.iter().map(|m| m.title.clone()).collect();
        titles.sort();
        Ok(titles)
    }
}

fn multiplicities(names: Vec<String>) -> HashMap<String, u64> {
    let mut counts = HashMap::with_capacity(names.len());
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

/// Number of two-edge paths seed–node–candidate through any shared node.
fn shared_paths(seed: &HashMap<String, u64>, rec: &HashMap<String, u64>) -> u64 {
    seed.iter()
        .filter_map(|(name, &n)| rec.get(name).map(|&m| n * m))
        .sum()
}
