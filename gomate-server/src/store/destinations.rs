//! Destination browser state.
//!
//! Holds the current destination list and the selected detail record.
//! Fetches fan out per station and isolate failures: one station's
//! enrichment failing substitutes a fallback record, never aborting
//! the batch. A superseded fetch is not cancelled; whichever response
//! resolves last overwrites the list (stale-overwrite race preserved
//! from the original design).

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use futures::future::join_all;
use tokio::sync::RwLock;

use crate::domain::Destination;
use crate::transport::convert::{
    convert_destination, fallback_destination, map_departure, remaining_departures,
    schedule_string,
};
use crate::transport::{TransportApi, TransportError};

/// Stations shown when no search query is given.
pub const DEFAULT_STATIONS: [&str; 15] = [
    "Zurich HB",
    "Geneva",
    "Basel SBB",
    "Bern",
    "Lausanne",
    "Lucerne",
    "Lugano",
    "St. Gallen",
    "Winterthur",
    "Biel/Bienne",
    "Thun",
    "Köniz",
    "La Chaux-de-Fonds",
    "Schaffhausen",
    "Fribourg",
];

/// Station names taken from a search result.
const SEARCH_LIMIT: usize = 15;

/// Stationboard size for the initial batch fetch.
const BOARD_LIMIT: u32 = 40;

/// Stationboard size for a single-destination refresh.
const REFRESH_LIMIT: u32 = 100;

/// User-facing destination fetch errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationsError {
    #[error("No stations found")]
    NoStationsFound,

    #[error("Failed to fetch destinations")]
    FetchFailed,

    #[error("Failed to fetch destination")]
    FetchByIdFailed,
}

#[derive(Default)]
struct DestinationsState {
    destinations: Vec<Destination>,
    selected: Option<Destination>,
    error: Option<String>,
}

/// Per-station enrichment failure; always converted to a fallback
/// record, never surfaced.
#[derive(Debug, thiserror::Error)]
enum EnrichError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("station not found")]
    StationNotFound,
}

/// Destination list and detail state.
#[derive(Clone)]
pub struct DestinationsStore {
    transport: Arc<dyn TransportApi>,
    inner: Arc<RwLock<DestinationsState>>,
}

impl DestinationsStore {
    /// Create a store backed by the given transport API.
    pub fn new(transport: Arc<dyn TransportApi>) -> Self {
        Self {
            transport,
            inner: Arc::new(RwLock::new(DestinationsState::default())),
        }
    }

    /// Fetch the destination list.
    ///
    /// An empty query loads the default city list; otherwise the query
    /// is resolved through station search first. Every requested
    /// station yields exactly one record, enriched concurrently in
    /// input order.
    pub async fn fetch_destinations(
        &self,
        query: &str,
    ) -> Result<Vec<Destination>, DestinationsError> {
        let names: Vec<String> = if query.trim().is_empty() {
            DEFAULT_STATIONS.iter().map(|s| (*s).to_string()).collect()
        } else {
            let stations = match self.transport.search_locations(query).await {
                Ok(stations) => stations,
                Err(e) => {
                    tracing::warn!(error = %e, query, "station search failed");
                    return Err(self.fail(DestinationsError::FetchFailed).await);
                }
            };

            let names: Vec<String> = stations
                .iter()
                .take(SEARCH_LIMIT)
                .filter_map(|s| s.name.clone())
                .collect();

            if names.is_empty() {
                return Err(self.fail(DestinationsError::NoStationsFound).await);
            }
            names
        };

        // Order-preserving concurrent batch; each member settles on its
        // own (enrichment catches its failure into a fallback record).
        let destinations = join_all(
            names
                .iter()
                .enumerate()
                .map(|(index, name)| self.enrich(index, name)),
        )
        .await;

        let mut state = self.inner.write().await;
        state.destinations = destinations.clone();
        state.error = None;

        Ok(destinations)
    }

    /// Enrich one station, substituting the fallback record on failure.
    async fn enrich(&self, index: usize, name: &str) -> Destination {
        match self.try_enrich(index, name).await {
            Ok(destination) => destination,
            Err(e) => {
                tracing::warn!(error = %e, station = name, "enrichment failed, using fallback");
                fallback_destination(index, name)
            }
        }
    }

    async fn try_enrich(&self, index: usize, name: &str) -> Result<Destination, EnrichError> {
        let stations = self.transport.search_locations(name).await?;
        let station = stations.first().ok_or(EnrichError::StationNotFound)?;

        let board = self.transport.stationboard(name, BOARD_LIMIT).await?;

        Ok(convert_destination(index, name, station, &board))
    }

    /// Refresh a single destination's departures from `now` to the end
    /// of the day.
    ///
    /// Falls back through three levels when the filtered board is
    /// empty: the cached departures, then the first 40 unfiltered
    /// entries, then nothing. When the fetch itself fails the cached
    /// record is returned as-is.
    pub async fn fetch_destination_by_id(
        &self,
        id: u32,
        now: DateTime<FixedOffset>,
    ) -> Result<Destination, DestinationsError> {
        let existing = {
            let state = self.inner.read().await;
            state.destinations.iter().find(|d| d.id == id).cloned()
        };

        let Some(existing) = existing else {
            return Err(self.fail(DestinationsError::FetchByIdFailed).await);
        };

        let board = match self.transport.stationboard(&existing.name, REFRESH_LIMIT).await {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(error = %e, station = %existing.name, "refresh failed, keeping cached departures");
                let mut state = self.inner.write().await;
                state.selected = Some(existing.clone());
                state.error = None;
                return Ok(existing);
            }
        };

        let mut departures = remaining_departures(&board, now);

        if departures.is_empty() {
            if !existing.departures.is_empty() {
                departures = existing.departures.clone();
            } else if !board.is_empty() {
                departures = board.iter().take(40).map(map_departure).collect();
            }
        }

        let schedule = if departures.is_empty() {
            existing.schedule.clone()
        } else {
            schedule_string(&departures)
        };

        let updated = Destination {
            schedule,
            departures,
            ..existing
        };

        let mut state = self.inner.write().await;
        state.selected = Some(updated.clone());
        state.error = None;

        Ok(updated)
    }

    /// Record an error in state and hand it back.
    async fn fail(&self, error: DestinationsError) -> DestinationsError {
        let mut state = self.inner.write().await;
        state.error = Some(error.to_string());
        error
    }

    /// Current destination list.
    pub async fn destinations(&self) -> Vec<Destination> {
        self.inner.read().await.destinations.clone()
    }

    /// Mark a destination as selected.
    pub async fn select(&self, destination: Destination) {
        self.inner.write().await.selected = Some(destination);
    }

    /// Currently selected destination, if any.
    pub async fn selected(&self) -> Option<Destination> {
        self.inner.read().await.selected.clone()
    }

    /// Clear the selection.
    pub async fn clear_selected(&self) {
        self.inner.write().await.selected = None;
    }

    /// Last fetch error, if the most recent fetch failed.
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_timestamp;
    use crate::transport::MockTransportClient;
    use crate::transport::types::{StationDto, StationboardEntry, Stop};

    fn station(name: &str) -> StationDto {
        StationDto {
            id: Some("8500000".to_string()),
            name: Some(name.to_string()),
            coordinate: None,
        }
    }

    fn entry(departure: &str, to: &str, category: &str) -> StationboardEntry {
        StationboardEntry {
            stop: Some(Stop {
                departure: Some(departure.to_string()),
                arrival: None,
                platform: Some("1".to_string()),
            }),
            to: Some(to.to_string()),
            category: Some(category.to_string()),
            number: None,
        }
    }

    fn store_with(mock: MockTransportClient) -> DestinationsStore {
        DestinationsStore::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn search_fetch_normalizes_stations() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Zurich", vec![station("Zürich HB")])
            .await;
        mock.insert_locations("Zürich HB", vec![station("Zürich HB")])
            .await;
        mock.insert_board(
            "Zürich HB",
            vec![
                entry("2024-05-01T08:02:00+0200", "Genève", "IC"),
                entry("2024-05-01T08:05:00+0200", "Uster", "S"),
            ],
        )
        .await;

        let store = store_with(mock);
        let destinations = store.fetch_destinations("Zurich").await.unwrap();

        assert_eq!(destinations.len(), 1);
        let destination = &destinations[0];
        assert_eq!(destination.id, 1);
        assert_eq!(destination.name, "Zürich HB");
        assert_eq!(destination.location, "Zürich, Switzerland");
        assert_eq!(destination.transport_type, "Express");
        assert_eq!(destination.schedule, "08:02, 08:05");
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn empty_search_result_is_an_error() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Atlantis", vec![]).await;

        let store = store_with(mock);
        let err = store.fetch_destinations("Atlantis").await.unwrap_err();

        assert_eq!(err, DestinationsError::NoStationsFound);
        assert_eq!(store.error().await.as_deref(), Some("No stations found"));
        assert!(store.destinations().await.is_empty());
    }

    #[tokio::test]
    async fn one_failing_station_gets_a_fallback_record() {
        let mock = MockTransportClient::new();
        mock.insert_locations(
            "Zu",
            vec![station("Zürich HB"), station("Zug")],
        )
        .await;
        mock.insert_locations("Zürich HB", vec![station("Zürich HB")])
            .await;
        mock.insert_board(
            "Zürich HB",
            vec![entry("2024-05-01T08:02:00+0200", "Genève", "IC")],
        )
        .await;
        mock.fail_for("Zug").await;

        let store = store_with(mock);
        let destinations = store.fetch_destinations("Zu").await.unwrap();

        // The batch stays complete: N requested, N returned, in order.
        assert_eq!(destinations.len(), 2);
        assert_eq!(destinations[0].name, "Zürich HB");

        let fallback = &destinations[1];
        assert_eq!(fallback.id, 2);
        assert_eq!(fallback.name, "Zug");
        assert_eq!(fallback.departures.len(), 4);
        assert_eq!(fallback.departures[0].time, "08:00");
        assert_eq!(fallback.rating, 4.2);
    }

    #[tokio::test]
    async fn station_missing_from_lookup_also_falls_back() {
        let mock = MockTransportClient::new();
        mock.insert_locations("gho", vec![station("Ghost")]).await;
        // The per-station lookup for "Ghost" itself returns nothing.

        let store = store_with(mock);
        let destinations = store.fetch_destinations("gho").await.unwrap();

        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0].name, "Ghost");
        assert_eq!(destinations[0].schedule, "08:00, 10:00, 14:00, 18:00");
    }

    #[tokio::test]
    async fn default_fetch_returns_all_fifteen_cities() {
        // No canned data at all: every station enriches via fallback.
        let store = store_with(MockTransportClient::new());
        let destinations = store.fetch_destinations("").await.unwrap();

        assert_eq!(destinations.len(), DEFAULT_STATIONS.len());
        for (index, destination) in destinations.iter().enumerate() {
            assert_eq!(destination.id, index as u32 + 1);
            assert_eq!(destination.name, DEFAULT_STATIONS[index]);
        }
        assert_eq!(destinations[0].price, 15.0);
        assert_eq!(destinations[14].price, 85.0);
    }

    #[tokio::test]
    async fn refresh_filters_to_departures_after_now() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Bern", vec![station("Bern")]).await;
        mock.insert_board(
            "Bern",
            vec![
                entry("2024-05-01T08:00:00+0200", "Old", "IC"),
                entry("2024-05-01T13:00:00+0200", "Upcoming", "IC"),
            ],
        )
        .await;

        let store = store_with(mock);
        store.fetch_destinations("Bern").await.unwrap();

        let now = parse_timestamp("2024-05-01T12:00:00+0200").unwrap();
        let refreshed = store.fetch_destination_by_id(1, now).await.unwrap();

        assert_eq!(refreshed.departures.len(), 1);
        assert_eq!(refreshed.departures[0].destination, "Upcoming");
        assert_eq!(refreshed.schedule, "13:00");
        assert_eq!(store.selected().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn refresh_with_nothing_left_today_keeps_cached_departures() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Bern", vec![station("Bern")]).await;
        mock.insert_board(
            "Bern",
            vec![entry("2024-05-01T08:00:00+0200", "Morning", "IC")],
        )
        .await;

        let store = store_with(mock);
        let fetched = store.fetch_destinations("Bern").await.unwrap();
        let cached = fetched[0].departures.clone();
        assert!(!cached.is_empty());

        // Everything on the board is in the past by now.
        let now = parse_timestamp("2024-05-01T23:00:00+0200").unwrap();
        let refreshed = store.fetch_destination_by_id(1, now).await.unwrap();

        assert_eq!(refreshed.departures, cached);
    }

    #[tokio::test]
    async fn refresh_without_cached_departures_shows_unfiltered_board() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Bern", vec![station("Bern")]).await;
        // Initial fetch sees an empty board (no cached departures),
        // the refresh sees yesterday's entries only.
        let store = store_with(mock.clone());
        store.fetch_destinations("Bern").await.unwrap();

        mock.insert_board(
            "Bern",
            vec![entry("2024-04-30T08:00:00+0200", "Yesterday", "IC")],
        )
        .await;

        let now = parse_timestamp("2024-05-01T12:00:00+0200").unwrap();
        let refreshed = store.fetch_destination_by_id(1, now).await.unwrap();

        assert_eq!(refreshed.departures.len(), 1);
        assert_eq!(refreshed.departures[0].destination, "Yesterday");
    }

    #[tokio::test]
    async fn refresh_fetch_failure_returns_cached_record() {
        let mock = MockTransportClient::new();
        mock.insert_locations("Bern", vec![station("Bern")]).await;
        mock.insert_board(
            "Bern",
            vec![entry("2024-05-01T08:00:00+0200", "Morning", "IC")],
        )
        .await;

        let store = store_with(mock.clone());
        let fetched = store.fetch_destinations("Bern").await.unwrap();

        mock.fail_for("Bern").await;

        let now = parse_timestamp("2024-05-01T12:00:00+0200").unwrap();
        let refreshed = store.fetch_destination_by_id(1, now).await.unwrap();

        assert_eq!(refreshed, fetched[0]);
    }

    #[tokio::test]
    async fn refresh_of_unknown_id_is_an_error() {
        let store = store_with(MockTransportClient::new());
        let now = parse_timestamp("2024-05-01T12:00:00+0200").unwrap();

        let err = store.fetch_destination_by_id(99, now).await.unwrap_err();
        assert_eq!(err, DestinationsError::FetchByIdFailed);
    }

    #[tokio::test]
    async fn select_and_clear() {
        let store = store_with(MockTransportClient::new());
        let destinations = store.fetch_destinations("").await.unwrap();

        store.select(destinations[2].clone()).await;
        assert_eq!(store.selected().await.unwrap().id, 3);

        store.clear_selected().await;
        assert!(store.selected().await.is_none());
    }
}
