//! Transport open-data HTTP client.
//!
//! Async client for the Swiss public-transport API. The three endpoint
//! paths are fixed by the upstream contract and must not change.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::TransportApi;
use super::error::TransportError;
use super::types::{
    ConnectionDto, ConnectionsResponse, LocationsResponse, StationDto, StationboardEntry,
    StationboardResponse,
};

/// Default base URL for the transport API.
const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the transport client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL for the API (defaults to transport.opendata.ch)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport API client.
///
/// Uses a semaphore to limit concurrent requests, since destination
/// batches fan out into one lookup plus one stationboard per station.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TransportClient {
    /// Create a new transport client with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Issue a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransportError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransportError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[async_trait]
impl TransportApi for TransportClient {
    /// Search stations matching a query via `GET /v1/locations`.
    async fn search_locations(&self, query: &str) -> Result<Vec<StationDto>, TransportError> {
        let response: LocationsResponse = self
            .get_json("/v1/locations", &[("query", query), ("type", "station")])
            .await?;
        Ok(response.stations)
    }

    /// Fetch scheduled departures via `GET /v1/stationboard`.
    async fn stationboard(
        &self,
        station: &str,
        limit: u32,
    ) -> Result<Vec<StationboardEntry>, TransportError> {
        let limit = limit.to_string();
        let response: StationboardResponse = self
            .get_json("/v1/stationboard", &[("station", station), ("limit", &limit)])
            .await?;
        Ok(response.stationboard)
    }

    /// Search point-to-point journeys via `GET /v1/connections`.
    async fn connections(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<Vec<ConnectionDto>, TransportError> {
        let limit = limit.to_string();
        let response: ConnectionsResponse = self
            .get_json(
                "/v1/connections",
                &[("from", from), ("to", to), ("limit", &limit)],
            )
            .await?;
        Ok(response.connections)
    }
}
