//! Swiss transport open-data API: client, DTOs, and conversion to
//! view-models.

pub mod client;
pub mod convert;
pub mod error;
pub mod mock;
pub mod types;

use async_trait::async_trait;

pub use client::{TransportClient, TransportConfig};
pub use error::TransportError;
pub use mock::MockTransportClient;
pub use types::{ConnectionDto, StationDto, StationboardEntry};

/// Interface to the transport API.
///
/// Implemented by the HTTP client, the caching wrapper, and the mock
/// used in tests, so stores don't care which one they're driving.
#[async_trait]
pub trait TransportApi: Send + Sync {
    /// Search stations matching a free-text query.
    async fn search_locations(&self, query: &str) -> Result<Vec<StationDto>, TransportError>;

    /// Fetch up to `limit` scheduled departures for a station.
    async fn stationboard(
        &self,
        station: &str,
        limit: u32,
    ) -> Result<Vec<StationboardEntry>, TransportError>;

    /// Search up to `limit` point-to-point connections.
    async fn connections(
        &self,
        from: &str,
        to: &str,
        limit: u32,
    ) -> Result<Vec<ConnectionDto>, TransportError>;
}
