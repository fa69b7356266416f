//! Mock transport client for testing without API access.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TransportApi;
use super::error::TransportError;
use super::types::{ConnectionDto, StationDto, StationboardEntry};

/// In-memory transport API serving canned responses.
///
/// Queries with no canned data return empty results; queries listed as
/// failing return an API error, which is how tests exercise the
/// per-station fallback path.
#[derive(Clone, Default)]
pub struct MockTransportClient {
    locations: Arc<RwLock<HashMap<String, Vec<StationDto>>>>,
    boards: Arc<RwLock<HashMap<String, Vec<StationboardEntry>>>>,
    connections: Arc<RwLock<HashMap<(String, String), Vec<ConnectionDto>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    fail_connections: Arc<RwLock<bool>>,
}

impl MockTransportClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register stations returned for a locations query.
    pub async fn insert_locations(&self, query: &str, stations: Vec<StationDto>) {
        self.locations
            .write()
            .await
            .insert(query.to_string(), stations);
    }

    /// Register a stationboard for a station name.
    pub async fn insert_board(&self, station: &str, board: Vec<StationboardEntry>) {
        self.boards.write().await.insert(station.to_string(), board);
    }

    /// Register connections for a from/to pair.
    pub async fn insert_connections(&self, from: &str, to: &str, connections: Vec<ConnectionDto>) {
        self.connections
            .write()
            .await
            .insert((from.to_string(), to.to_string()), connections);
    }

    /// Make every request mentioning this query fail.
    pub async fn fail_for(&self, query: &str) {
        self.failing.write().await.insert(query.to_string());
    }

    /// Make connection searches fail.
    pub async fn fail_connections(&self) {
        *self.fail_connections.write().await = true;
    }

    async fn check_failing(&self, query: &str) -> Result<(), TransportError> {
        if self.failing.read().await.contains(query) {
            return Err(TransportError::ApiError {
                status: 500,
                message: format!("mock failure for {query}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TransportApi for MockTransportClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<StationDto>, TransportError> {
        self.check_failing(query).await?;
        Ok(self
            .locations
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn stationboard(
        &self,
        station: &str,
        _limit: u32,
    ) -> Result<Vec<StationboardEntry>, TransportError> {
        self.check_failing(station).await?;
        Ok(self
            .boards
            .read()
            .await
            .get(station)
            .cloned()
            .unwrap_or_default())
    }

    async fn connections(
        &self,
        from: &str,
        to: &str,
        _limit: u32,
    ) -> Result<Vec<ConnectionDto>, TransportError> {
        if *self.fail_connections.read().await {
            return Err(TransportError::ApiError {
                status: 500,
                message: "mock connections failure".to_string(),
            });
        }
        Ok(self
            .connections
            .read()
            .await
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
