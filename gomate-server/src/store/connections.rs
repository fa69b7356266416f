//! Journey planner state.
//!
//! All-or-nothing: a search either replaces the whole connection list
//! or clears it and records an error. No partial results.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Connection;
use crate::transport::TransportApi;
use crate::transport::convert::convert_connection;

/// Connections returned per search.
const CONNECTION_LIMIT: u32 = 10;

/// User-facing journey search errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionsError {
    #[error("Please enter both departure and destination stations")]
    MissingStations,

    #[error("No connections found between these stations")]
    NoConnections,

    #[error("Failed to find connections. Please check station names.")]
    SearchFailed,
}

#[derive(Default)]
struct ConnectionsState {
    connections: Vec<Connection>,
    error: Option<String>,
}

/// Journey search state.
#[derive(Clone)]
pub struct ConnectionsStore {
    transport: Arc<dyn TransportApi>,
    inner: Arc<RwLock<ConnectionsState>>,
}

impl ConnectionsStore {
    /// Create a store backed by the given transport API.
    pub fn new(transport: Arc<dyn TransportApi>) -> Self {
        Self {
            transport,
            inner: Arc::new(RwLock::new(ConnectionsState::default())),
        }
    }

    /// Search connections between two stations.
    ///
    /// Blank endpoints are rejected without calling upstream. Upstream
    /// failure and an empty result both clear the previous list.
    pub async fn search(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Connection>, ConnectionsError> {
        if from.is_empty() || to.is_empty() {
            return Err(self.fail(ConnectionsError::MissingStations, false).await);
        }

        match self.transport.connections(from, to, CONNECTION_LIMIT).await {
            Ok(dtos) if !dtos.is_empty() => {
                let connections: Vec<Connection> =
                    dtos.iter().map(convert_connection).collect();

                let mut state = self.inner.write().await;
                state.connections = connections.clone();
                state.error = None;

                Ok(connections)
            }
            Ok(_) => Err(self.fail(ConnectionsError::NoConnections, true).await),
            Err(e) => {
                tracing::warn!(error = %e, from, to, "connection search failed");
                Err(self.fail(ConnectionsError::SearchFailed, true).await)
            }
        }
    }

    async fn fail(&self, error: ConnectionsError, clear: bool) -> ConnectionsError {
        let mut state = self.inner.write().await;
        if clear {
            state.connections.clear();
        }
        state.error = Some(error.to_string());
        error
    }

    /// Current connection list.
    pub async fn connections(&self) -> Vec<Connection> {
        self.inner.read().await.connections.clone()
    }

    /// Last search error, if the most recent search failed.
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransportClient;
    use crate::transport::types::{
        Checkpoint, ConnectionDto, JourneyDto, SectionDto, StationRef,
    };

    fn dto(from: &str, to: &str) -> ConnectionDto {
        ConnectionDto {
            from: Checkpoint {
                station: StationRef {
                    name: Some(from.to_string()),
                },
                departure: Some("2024-05-01T08:02:00+0200".to_string()),
                arrival: None,
                platform: Some("4".to_string()),
            },
            to: Checkpoint {
                station: StationRef {
                    name: Some(to.to_string()),
                },
                departure: None,
                arrival: Some("2024-05-01T09:58:00+0200".to_string()),
                platform: None,
            },
            duration: Some("00d01:56:00".to_string()),
            transfers: Some(0),
            sections: vec![SectionDto {
                journey: Some(JourneyDto {
                    category: Some("IC".to_string()),
                    number: Some("8".to_string()),
                }),
            }],
        }
    }

    fn store_with(mock: MockTransportClient) -> ConnectionsStore {
        ConnectionsStore::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn search_normalizes_connections() {
        let mock = MockTransportClient::new();
        mock.insert_connections("Bern", "Zürich HB", vec![dto("Bern", "Zürich HB")])
            .await;

        let store = store_with(mock);
        let connections = store.search("Bern", "Zürich HB").await.unwrap();

        assert_eq!(connections.len(), 1);
        let connection = &connections[0];
        assert_eq!(connection.from, "Bern");
        assert_eq!(connection.departure, "08:02");
        assert_eq!(connection.arrival, "09:58");
        assert_eq!(connection.duration, "1h 56m 00s");
        assert_eq!(connection.train_type, "IC 8");
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn blank_endpoints_are_rejected_without_fetching() {
        let store = store_with(MockTransportClient::new());

        let err = store.search("", "Bern").await.unwrap_err();
        assert_eq!(err, ConnectionsError::MissingStations);

        let err = store.search("Bern", "").await.unwrap_err();
        assert_eq!(err, ConnectionsError::MissingStations);
    }

    #[tokio::test]
    async fn empty_result_clears_previous_list() {
        let mock = MockTransportClient::new();
        mock.insert_connections("Bern", "Zürich HB", vec![dto("Bern", "Zürich HB")])
            .await;

        let store = store_with(mock);
        store.search("Bern", "Zürich HB").await.unwrap();
        assert_eq!(store.connections().await.len(), 1);

        let err = store.search("Bern", "Atlantis").await.unwrap_err();
        assert_eq!(err, ConnectionsError::NoConnections);
        assert!(store.connections().await.is_empty());
        assert_eq!(
            store.error().await.as_deref(),
            Some("No connections found between these stations")
        );
    }

    #[tokio::test]
    async fn upstream_failure_clears_previous_list() {
        let mock = MockTransportClient::new();
        mock.insert_connections("Bern", "Zürich HB", vec![dto("Bern", "Zürich HB")])
            .await;

        let store = store_with(mock.clone());
        store.search("Bern", "Zürich HB").await.unwrap();

        mock.fail_connections().await;
        let err = store.search("Bern", "Zürich HB").await.unwrap_err();

        assert_eq!(err, ConnectionsError::SearchFailed);
        assert!(store.connections().await.is_empty());
    }
}
