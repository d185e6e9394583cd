//! End-to-end recommendation behavior against in-memory movie graphs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use cinegraph_core::{MovieEntry, Recommendation, RecommendationOutcome, TitleResolution};
use cinegraph_recommend::ranking::is_ranked;
use cinegraph_recommend::{InMemoryStore, MovieStore, RecommendError, Recommender, StoreError};

fn movie(title: &str, genres: &[&str], actors: &[&str]) -> MovieEntry {
    MovieEntry {
        title: title.to_string(),
        genres: genres.iter().map(|s| s.to_string()).collect(),
        actors: actors.iter().map(|s| s.to_string()).collect(),
    }
}

fn nolan_store() -> InMemoryStore {
    InMemoryStore::new(vec![
        movie(
            "Inception",
            &["Sci-Fi", "Thriller"],
            &["Leonardo DiCaprio", "Tom Hardy"],
        ),
        movie("Interstellar", &["Sci-Fi", "Drama"], &["Matthew McConaughey"]),
        movie(
            "Shutter Island",
            &["Thriller", "Mystery"],
            &["Leonardo DiCaprio"],
        ),
        movie("The Revenant", &["Drama"], &["Leonardo DiCaprio", "Tom Hardy"]),
        movie("Solo Act", &["Sci-Fi"], &[]),
    ])
}

/// Wraps a store and counts calls, or fails every call.
struct SpyStore {
    inner: InMemoryStore,
    fail: bool,
    resolve_calls: AtomicUsize,
    recommend_calls: AtomicUsize,
}

impl SpyStore {
    fn new(inner: InMemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail: false,
            resolve_calls: AtomicUsize::new(0),
            recommend_calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryStore::default(),
            fail: true,
            resolve_calls: AtomicUsize::new(0),
            recommend_calls: AtomicUsize::new(0),
        })
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MovieStore for SpyStore {
    async fn resolve_title(&self, title: &str) -> Result<Option<String>, StoreError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.resolve_title(title).await
    }

    async fn recommendations(
        &self,
        seed: &str,
        limit: u32,
    ) -> Result<Vec<Recommendation>, StoreError> {
        self.recommend_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.recommendations(seed, limit).await
    }

    async fn list_titles(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        self.inner.list_titles().await
    }
}

#[tokio::test]
async fn test_genre_only_overlap_is_excluded() {
    let recommender = Recommender::new(Arc::new(nolan_store()));
    let report = recommender.recommend("Inception").await.unwrap();

    let titles: Vec<_> = report
        .outcome
        .recommendations()
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert!(titles.contains(&"Shutter Island"));
    assert!(!titles.contains(&"Interstellar"));
    assert!(!titles.contains(&"Solo Act"));
}

#[tokio::test]
async fn test_shared_actor_without_shared_genre_is_excluded() {
    let recommender = Recommender::new(Arc::new(nolan_store()));
    let report = recommender.recommend("Inception").await.unwrap();

    // The Revenant shares two actors but no genre with Inception.
    assert_eq!(
        report.outcome,
        RecommendationOutcome::Ranked {
            seed: "Inception".to_string(),
            recommendations: vec![Recommendation::new("Shutter Island", 1, 1)],
        }
    );
}

#[tokio::test]
async fn test_seed_never_recommended() {
    let store = InMemoryStore::new(vec![
        movie("Heat", &["Crime"], &["Al Pacino"]),
        movie("Serpico", &["Crime"], &["Al Pacino"]),
    ]);
    let report = Recommender::new(Arc::new(store))
        .recommend("heat")
        .await
        .unwrap();
    assert!(report
        .outcome
        .recommendations()
        .iter()
        .all(|r| !r.title.eq_ignore_ascii_case("heat")));
    assert_eq!(report.outcome.recommendations().len(), 1);
}

#[tokio::test]
async fn test_mixed_case_resolves_like_canonical() {
    let recommender = Recommender::new(Arc::new(nolan_store()));

    let lower = recommender.recommend("inception").await.unwrap();
    let canonical = recommender.recommend("Inception").await.unwrap();
    assert_eq!(lower.outcome, canonical.outcome);

    let resolution = recommender.resolver().resolve("iNcEpTiOn").await.unwrap();
    assert_eq!(resolution, TitleResolution::resolved("Inception"));
}

#[tokio::test]
async fn test_unknown_title_never_reaches_engine() {
    let spy = SpyStore::new(nolan_store());
    let recommender = Recommender::new(spy.clone());

    let report = recommender.recommend("Tenet").await.unwrap();
    assert_eq!(
        report.outcome,
        RecommendationOutcome::NotFound {
            query: "Tenet".to_string()
        }
    );
    assert_eq!(spy.resolve_calls.load(Ordering::SeqCst), 1);
    assert_eq!(spy.recommend_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_title_skips_store() {
    let spy = SpyStore::new(nolan_store());
    let recommender = Recommender::new(spy.clone());

    for blank in ["", "   ", "\t\n"] {
        let report = recommender.recommend(blank).await.unwrap();
        assert!(matches!(report.outcome, RecommendationOutcome::NotFound { .. }));
    }
    assert_eq!(spy.resolve_calls.load(Ordering::SeqCst), 0);
    assert_eq!(spy.recommend_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_seed_without_actors_is_empty_not_error() {
    let recommender = Recommender::new(Arc::new(nolan_store()));
    let report = recommender.recommend("Solo Act").await.unwrap();
    assert_eq!(
        report.outcome,
        RecommendationOutcome::Empty {
            seed: "Solo Act".to_string()
        }
    );
}

#[tokio::test]
async fn test_store_failure_surfaces_as_unavailable() {
    let spy = SpyStore::failing();
    let recommender = Recommender::new(spy.clone());

    let err = recommender.recommend("Inception").await.unwrap_err();
    assert!(matches!(err, RecommendError::StoreUnavailable(_)));
    assert_eq!(spy.recommend_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_output_ranked_and_capped() {
    let mut movies = vec![movie(
        "Seed",
        &["Drama", "Crime", "Thriller"],
        &["A", "B", "C", "D"],
    )];
    for i in 0..15u32 {
        let genres: &[&str] = match i % 3 {
            0 => &["Drama"],
            1 => &["Drama", "Crime"],
            _ => &["Drama", "Crime", "Thriller"],
        };
        let actors: &[&str] = match i % 4 {
            0 => &["A"],
            1 => &["A", "B"],
            2 => &["A", "B", "C"],
            _ => &["A", "B", "C", "D"],
        };
        movies.push(movie(&format!("Candidate {i:02}"), genres, actors));
    }
    let recommender = Recommender::new(Arc::new(InMemoryStore::new(movies)));

    let report = recommender.recommend("Seed").await.unwrap();
    let recs = report.outcome.recommendations();
    assert_eq!(recs.len(), 10);
    assert!(is_ranked(recs));
    assert!(recs.iter().all(|r| r.shared_actors >= 1 && r.shared_genres >= 1));
    assert_eq!(recs[0].shared_actors, 4);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let recommender = Recommender::new(Arc::new(nolan_store()));
    let first = recommender.recommend("Inception").await.unwrap();
    let second = recommender.recommend("Inception").await.unwrap();
    assert_eq!(first.outcome, second.outcome);
    assert_ne!(first.request_id, second.request_id);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_store() {
    let recommender = Recommender::new(Arc::new(nolan_store()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let recommender = recommender.clone();
        handles.push(tokio::spawn(async move {
            recommender.recommend("Inception").await.unwrap().outcome
        }));
    }

    let expected = recommender.recommend("Inception").await.unwrap().outcome;
    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_catalog_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.json");
    std::fs::write(
        &path,
        r#"{"movies": [
            {"title": "Inception", "genres": ["Sci-Fi", "Thriller"], "actors": ["Leonardo DiCaprio"]},
            {"title": "Shutter Island", "genres": ["Thriller"], "actors": ["Leonardo DiCaprio"]},
            {"title": "Interstellar", "genres": ["Sci-Fi"], "actors": ["Matthew McConaughey"]}
        ]}"#,
    )
    .unwrap();

    let store = InMemoryStore::from_json_file(&path).unwrap();
    let report = Recommender::new(Arc::new(store))
        .recommend("INCEPTION")
        .await
        .unwrap();
    assert_eq!(
        report.outcome.recommendations(),
        &[Recommendation::new("Shutter Island", 1, 1)]
    );
}

#[tokio::test]
async fn test_missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = InMemoryStore::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RecommendError::Io(_)));
}
