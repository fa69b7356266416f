//! Journey-planner connection view-model.

use serde::{Deserialize, Serialize};

/// A point-to-point journey between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from: String,
    pub to: String,

    /// Departure time as `HH:MM`.
    pub departure: String,

    /// Arrival time as `HH:MM`.
    pub arrival: String,

    /// Formatted duration, e.g. `"1h 23m 00s"`.
    pub duration: String,

    /// Departure platform, or `"N/A"`.
    pub platform: String,

    /// Number of vehicle changes.
    pub transfers: u32,

    /// Categories of all legs with a vehicle, joined with `" → "`;
    /// `"Train"` when no leg carries a vehicle.
    pub train_type: String,

    /// Kept for wire compatibility; always empty.
    pub train_number: String,
}
