//! Core domain types for the Cinegraph movie graph.
//!
//! The store holds `Movie`, `Actor` and `Genre` nodes joined by `ACTED_IN`
//! and `HAS_GENRE` relationships. These types are the typed shapes of what
//! the read queries return, shared by the graph adapter, the in-memory
//! store, and the recommender.

use serde::{Deserialize, Serialize};

// ── Query Results ─────────────────────────────────────────────────

/// One ranked candidate movie for a seed title.
///
/// Field names on the wire match the query columns: `Recommendation`,
/// `sharedGenres`, `sharedActors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "Recommendation")]
    pub title: String,
    #[serde(rename = "sharedGenres")]
    pub shared_genres: u64,
    #[serde(rename = "sharedActors")]
    pub shared_actors: u64,
}

impl Recommendation {
    pub fn new(title: impl Into<String>, shared_genres: u64, shared_actors: u64) -> Self {
        Self {
            title: title.into(),
            shared_genres,
            shared_actors,
        }
    }
}

/// Result of matching free text against stored movie titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TitleResolution {
    /// The canonical title as stored (first case-insensitive match).
    Resolved { title: String },
    /// No stored movie matches, or the input was blank.
    NotFound,
}

impl TitleResolution {
    pub fn resolved(title: impl Into<String>) -> Self {
        Self::Resolved {
            title: title.into(),
        }
    }

    /// The canonical title, if one was found.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Resolved { title } => Some(title),
            Self::NotFound => None,
        }
    }
}

/// Outcome of a full recommend request.
///
/// `NotFound` and `Empty` are ordinary values, distinct from store failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// The seed title does not exist; no recommendation query was run.
    NotFound { query: String },
    /// The seed exists but no candidate shares both a genre and an actor.
    Empty { seed: String },
    /// Candidates ranked by shared actors, then shared genres.
    Ranked {
        seed: String,
        recommendations: Vec<Recommendation>,
    },
}

impl RecommendationOutcome {
    /// Build the outcome for a resolved seed, collapsing zero rows to `Empty`.
    pub fn for_seed(seed: impl Into<String>, recommendations: Vec<Recommendation>) -> Self {
        let seed = seed.into();
        if recommendations.is_empty() {
            Self::Empty { seed }
        } else {
            Self::Ranked {
                seed,
                recommendations,
            }
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Ranked {
                recommendations, ..
            } => recommendations,
            _ => &[],
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────

/// A movie with its genre and actor names, as exported for offline use.
///
/// A name appearing twice in `genres` or `actors` stands for two parallel
/// relationships between the same pair of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
}
