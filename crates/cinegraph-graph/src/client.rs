//! Neo4j connection management and shared graph client.

use std::time::Duration;

use cinegraph_core::config::Neo4jSettings;
use neo4rs::{query, ConfigBuilder, Graph, Query};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GraphError {
    /// Whether the store could not be reached, as opposed to rejecting a query.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) => true,
            Self::Query(e) => match e {
                neo4rs::Error::IOError { .. }
                | neo4rs::Error::ConnectionError
                | neo4rs::Error::AuthenticationError(_) => true,
                neo4rs::Error::Neo4j(e) => matches!(
                    e.kind(),
                    neo4rs::Neo4jErrorKind::Transient
                        | neo4rs::Neo4jErrorKind::Client(
                            neo4rs::Neo4jClientErrorKind::SessionExpired
                                | neo4rs::Neo4jClientErrorKind::Security(_)
                        )
                ),
                _ => false,
            },
            Self::Serialization(_) => false,
        }
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from(&Neo4jSettings::default())
    }
}

impl From<&Neo4jSettings> for GraphConfig {
    fn from(settings: &Neo4jSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Created once at process start and shared by every request.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    timeout: Duration,
}

impl GraphClient {
    /// Connect to Neo4j and verify the server answers a trivial query.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.username)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let client = Self {
            graph,
            timeout: config.timeout,
        };
        client.verify_connectivity().await?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(client)
    }

    /// Round-trip a `RETURN 1` probe.
    pub async fn verify_connectivity(&self) -> Result<(), GraphError> {
        self.query_one(query("RETURN 1 AS ok"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?
            .ok_or_else(|| GraphError::Connection("connectivity probe returned no rows".into()))?;
        Ok(())
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let collect = async {
            let mut stream = self.graph.execute(query).await?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await? {
                rows.push(row);
            }
            Ok::<_, GraphError>(rows)
        };

        tokio::time::timeout(self.timeout, collect)
            .await
            .map_err(|_| GraphError::Timeout(self.timeout))?
    }

    /// Execute a read query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let first = async {
            let mut stream = self.graph.execute(query).await?;
            Ok::<_, GraphError>(stream.next().await?)
        };

        tokio::time::timeout(self.timeout, first)
            .await
            .map_err(|_| GraphError::Timeout(self.timeout))?
    }
}
