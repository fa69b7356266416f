//! Transport API response DTOs.
//!
//! These types map directly to the transport.opendata.ch JSON
//! responses. They use `Option` liberally because the API omits or
//! nulls fields freely.

use serde::Deserialize;

/// Response from `GET /v1/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub stations: Vec<StationDto>,
}

/// A station as returned by the locations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
}

/// WGS84 coordinate; `x` is latitude-ish east, `y` north, per the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Coordinate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Response from `GET /v1/stationboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationboardResponse {
    #[serde(default)]
    pub stationboard: Vec<StationboardEntry>,
}

/// One scheduled departure on a stationboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationboardEntry {
    pub stop: Option<Stop>,

    /// Final destination of the service.
    pub to: Option<String>,

    /// Category code, e.g. "IC", "S".
    pub category: Option<String>,

    /// Service number.
    pub number: Option<String>,
}

/// Stop details within a stationboard entry or connection checkpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stop {
    /// ISO-8601 departure timestamp.
    pub departure: Option<String>,

    /// ISO-8601 arrival timestamp.
    pub arrival: Option<String>,

    pub platform: Option<String>,
}

/// Response from `GET /v1/connections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,
}

/// One point-to-point connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionDto {
    pub from: Checkpoint,
    pub to: Checkpoint,

    /// Duration string, `"DDdHH:MM:SS"`.
    pub duration: Option<String>,

    /// Number of vehicle changes.
    pub transfers: Option<u32>,

    /// Journey legs; a section without a `journey` is a walk.
    #[serde(default)]
    pub sections: Vec<SectionDto>,
}

/// Endpoint of a connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub station: StationRef,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub platform: Option<String>,
}

/// Station reference inside a checkpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationRef {
    pub name: Option<String>,
}

/// One leg of a connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionDto {
    pub journey: Option<JourneyDto>,
}

/// The vehicle operating a section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyDto {
    pub category: Option<String>,
    pub number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_locations() {
        let json = r#"{
            "stations": [
                {
                    "id": "8503000",
                    "name": "Zürich HB",
                    "coordinate": {"type": "WGS84", "x": 8.540192, "y": 47.378177}
                },
                {"id": "8507000", "name": "Bern"}
            ]
        }"#;

        let response: LocationsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.stations.len(), 2);
        assert_eq!(response.stations[0].name.as_deref(), Some("Zürich HB"));

        let coordinate = response.stations[0].coordinate.as_ref().unwrap();
        assert_eq!(coordinate.y, Some(47.378177));
        assert!(response.stations[1].coordinate.is_none());
    }

    #[test]
    fn deserialize_empty_locations() {
        let response: LocationsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.stations.is_empty());
    }

    #[test]
    fn deserialize_stationboard() {
        let json = r#"{
            "stationboard": [
                {
                    "stop": {
                        "departure": "2024-05-01T17:34:00+0200",
                        "platform": "31"
                    },
                    "to": "Genève-Aéroport",
                    "category": "IC",
                    "number": "1"
                },
                {
                    "stop": {"departure": "2024-05-01T17:39:00+0200"},
                    "to": "Uster",
                    "category": "S"
                }
            ]
        }"#;

        let response: StationboardResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.stationboard.len(), 2);

        let first = &response.stationboard[0];
        assert_eq!(first.to.as_deref(), Some("Genève-Aéroport"));
        assert_eq!(first.category.as_deref(), Some("IC"));
        assert_eq!(
            first.stop.as_ref().unwrap().platform.as_deref(),
            Some("31")
        );

        let second = &response.stationboard[1];
        assert!(second.number.is_none());
        assert!(second.stop.as_ref().unwrap().platform.is_none());
    }

    #[test]
    fn deserialize_connections() {
        let json = r#"{
            "connections": [
                {
                    "from": {
                        "station": {"name": "Zürich HB"},
                        "departure": "2024-05-01T08:02:00+0200",
                        "platform": "31"
                    },
                    "to": {
                        "station": {"name": "Genève"},
                        "arrival": "2024-05-01T10:45:00+0200"
                    },
                    "duration": "00d02:43:00",
                    "transfers": 0,
                    "sections": [
                        {"journey": {"category": "IC", "number": "1"}},
                        {"journey": null}
                    ]
                }
            ]
        }"#;

        let response: ConnectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.connections.len(), 1);

        let connection = &response.connections[0];
        assert_eq!(connection.from.station.name.as_deref(), Some("Zürich HB"));
        assert_eq!(connection.duration.as_deref(), Some("00d02:43:00"));
        assert_eq!(connection.transfers, Some(0));
        assert_eq!(connection.sections.len(), 2);
        assert!(connection.sections[0].journey.is_some());
        assert!(connection.sections[1].journey.is_none());
    }
}
