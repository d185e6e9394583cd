//! cinegraph-core: Shared types, configuration, and error handling for Cinegraph.
//!
//! This crate provides the foundational types used across all Cinegraph components:
//! - Typed query results (`Recommendation`) for the movie graph
//! - Resolution and outcome types that keep "not found" and "empty" as values
//! - Catalog entries for offline movie graphs
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::Settings;
pub use error::CinegraphError;
pub use types::{MovieEntry, Recommendation, RecommendationOutcome, TitleResolution};
