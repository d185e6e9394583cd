//! Cinegraph Graph: Neo4j client for the movie graph.
//!
//! This crate is the only place that speaks Cypher. The store is read-only
//! from here: every query is a fixed, parameterized MATCH whose rows are
//! decoded into the typed records from `cinegraph-core`.

pub mod client;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
