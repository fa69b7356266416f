//! Caching layer for transport API responses.
//!
//! Screen loads fan out into a batch of upstream requests, and rapid
//! search input re-fires whole batches. A short-TTL cache keyed by
//! endpoint parameters keeps repeated loads from hammering the API
//! while staying fresh enough for live departure data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::transport::{
    ConnectionDto, StationDto, StationboardEntry, TransportApi, TransportClient, TransportError,
};

/// Configuration for the transport cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per endpoint.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Transport client with per-endpoint response caching.
pub struct CachedTransportClient {
    client: TransportClient,
    locations: MokaCache<String, Arc<Vec<StationDto>>>,
    boards: MokaCache<(String, u32), Arc<Vec<StationboardEntry>>>,
    connections: MokaCache<(String, String, u32), Arc<Vec<ConnectionDto>>>,
}

impl CachedTransportClient {
    /// Create a new cached client.
    pub fn new(client: TransportClient, config: &CacheConfig) -> Self {
        Self {
            client,
            locations: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            boards: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            connections: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &TransportClient {
        &self.client
    }

    /// Number of cached entries across all endpoints.
    pub fn entry_count(&self) -> u64 {
        self.locations.entry_count()
            + self.boards.entry_count()
            + self.connections.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.locations.invalidate_all();
        self.boards.invalidate_all();
        self.connections.invalidate_all();
    }
}

#[async_trait]
impl TransportApi for CachedTransportClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<StationDto>, TransportError> {
        if let Some(cached) = self.locations.get(query).await {
            return Ok(cached.as_ref().clone());
        }

        let stations = self.client.search_locations(query).await?;
        self.locations
            .insert(query.to_string(), Arc::new(stations.clone()))
            .await;
        Ok(stations)
    }

    async fn stationboard(
        &self,
        station: &str,
        limit: u32,
    ) -> Result<Vec<StationboardEntry>, TransportError> {
        let key = (station.to_string(), limit);
        if let Some(cached) = self.boards.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let board = self.client.stationboard(station, limit).await?;
        self.boards.insert(key, Arc::new(board.clone())).await;
        Ok(board)
    }

    async fn connections(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<Vec<ConnectionDto>, TransportError> {
        let key = (from.to_string(), to.to_string(), limit);
        if let Some(cached) = self.connections.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let connections = self.client.connections(from, to, limit).await?;
        self.connections
            .insert(key, Arc::new(connections.clone()))
            .await;
        Ok(connections)
    }
}
