//! The ranking rule shared by every store.
//!
//! Order: `shared_actors` desc, then `shared_genres` desc, then title asc.
//! Rows missing either overlap are never recommended.

use std::cmp::Ordering;

use cinegraph_core::Recommendation;

/// Maximum number of recommendations returned for one seed.
pub const RECOMMENDATION_LIMIT: u32 = 10;

/// Drop rows without both overlaps, sort, and keep the first `limit`.
pub fn rank(mut rows: Vec<Recommendation>, limit: u32) -> Vec<Recommendation> {
    rows.retain(|r| r.shared_actors > 0 && r.shared_genres > 0);
    rows.sort_by(compare);
    rows.truncate(limit as usize);
    rows
}

/// Total order used for ranking; ties on every key keep input order.
pub fn compare(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.shared_actors
        .cmp(&a.shared_actors)
        .then_with(|| b.shared_genres.cmp(&a.shared_genres))
        .then_with(|| a.title.cmp(&b.title))
}

/// Whether `rows` already satisfy the ranking order.
pub fn is_ranked(rows: &[Recommendation]) -> bool {
    rows.windows(2)
        .all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}
