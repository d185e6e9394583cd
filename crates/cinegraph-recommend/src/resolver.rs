//! Title resolution: free text → canonical stored title.

use std::sync::Arc;

use cinegraph_core::TitleResolution;

use crate::error::Result;
use crate::store::MovieStore;

/// Matches user-supplied titles against the store, case-insensitively.
#[derive(Clone)]
pub struct TitleResolver {
    store: Arc<dyn MovieStore>,
}

impl TitleResolver {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Resolve `candidate` to the stored title.
    ///
    /// The input is matched as given, ignoring only case. Blank input
    /// resolves to `NotFound` without touching the store.
    pub async fn resolve(&self, candidate: &str) -> Result<TitleResolution> {
        if candidate.trim().is_empty() {
            tracing::debug!("Blank title, skipping store lookup");
            return Ok(TitleResolution::NotFound);
        }

        match self.store.resolve_title(candidate).await {
            Ok(Some(title)) => {
                tracing::debug!(input = %candidate, canonical = %title, "Resolved title");
                Ok(TitleResolution::Resolved { title })
            }
            Ok(None) => {
                tracing::debug!(input = %candidate, "No movie with that title");
                Ok(TitleResolution::NotFound)
            }
            Err(e) => {
                tracing::warn!(input = %candidate, error = %e, "Title lookup failed");
                Err(e.into())
            }
        }
    }
}
