//! Destination and departure view-models.

use serde::{Deserialize, Serialize};

/// A single scheduled departure from a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Departure time as zero-padded 24-hour `HH:MM`.
    pub time: String,

    /// Final destination of the service.
    pub destination: String,

    /// Raw category code as delivered upstream (e.g. "IC", "S").
    pub category: String,

    /// Service number; empty when the upstream omits it.
    pub number: String,

    /// Platform, or the `"N/A"` sentinel when unknown.
    pub platform: String,
}

/// A browsable destination: one station plus its departure board,
/// enriched with display-only fields.
///
/// Ids are assigned by enumeration order within a single fetch batch
/// (1-based) and are not stable across fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub status: String,

    /// Synthetic rating in [4.0, 5.0); cosmetic only.
    pub rating: f64,

    pub category: String,

    /// Synthetic price derived from list position; not a real fare.
    pub price: f64,

    /// Comma-space join of `departures[].time` when departures is
    /// non-empty; otherwise a fixed fallback schedule.
    pub schedule: String,

    /// Coarse transport category derived from the first departure.
    pub transport_type: String,

    /// Departures in upstream chronological order; never reordered.
    pub departures: Vec<Departure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_serializes_camel_case() {
        let destination = Destination {
            id: 1,
            name: "Bern".to_string(),
            description: "desc".to_string(),
            location: "Bern, Switzerland".to_string(),
            status: "Operating".to_string(),
            rating: 4.2,
            category: "Transport".to_string(),
            price: 15.0,
            schedule: "08:00".to_string(),
            transport_type: "Express".to_string(),
            departures: vec![],
        };

        let json = serde_json::to_value(&destination).unwrap();
        assert_eq!(json["transportType"], "Express");
        assert!(json.get("transport_type").is_none());
    }

    #[test]
    fn destination_round_trips() {
        let destination = Destination {
            id: 3,
            name: "Zürich HB".to_string(),
            description: "desc".to_string(),
            location: "Zürich, Switzerland".to_string(),
            status: "Operating".to_string(),
            rating: 4.5,
            category: "Transport".to_string(),
            price: 25.0,
            schedule: "09:12, 09:42".to_string(),
            transport_type: "S-Bahn".to_string(),
            departures: vec![Departure {
                time: "09:12".to_string(),
                destination: "Uster".to_string(),
                category: "S".to_string(),
                number: "9".to_string(),
                platform: "43/44".to_string(),
            }],
        };

        let json = serde_json::to_string(&destination).unwrap();
        let back: Destination = serde_json::from_str(&json).unwrap();
        assert_eq!(back, destination);
    }
}
