//! Conversion from transport DTOs to view-models.
//!
//! The station normalizer turns a locations hit plus a stationboard
//! into one `Destination`; the connection normalizer turns a
//! connections response into `Connection` records. Both are pure
//! functions of their input. Display-only fields (rating, price,
//! description) are synthesized here and carry no real data.

use chrono::{DateTime, FixedOffset};
use rand::Rng;

use crate::domain::{
    Connection, Departure, Destination, classify_transport, format_duration, format_time,
    parse_timestamp,
};

use super::types::{ConnectionDto, StationDto, StationboardEntry};

/// Schedule shown when a station's board comes back empty.
pub const DEFAULT_SCHEDULE: &str = "08:00, 10:00, 14:00, 18:00, 20:00, 22:00";

/// Departure times of the synthetic fallback record.
const FALLBACK_TIMES: [&str; 4] = ["08:00", "10:00", "14:00", "18:00"];

/// Rotating description pool, selected by batch position.
const DESCRIPTIONS: [&str; 5] = [
    "Major transport hub connecting all of Switzerland with frequent {transport} services.",
    "Beautiful station offering scenic routes throughout the Swiss Alps.",
    "Modern transport center with connections to major European cities.",
    "Historic station serving as gateway to stunning mountain destinations.",
    "Central hub providing excellent connectivity across Switzerland.",
];

/// Map one stationboard entry to a departure.
///
/// Missing fields get their sentinels: `"Unknown"` destination,
/// `"Train"` category, empty number, `"N/A"` platform and time.
pub fn map_departure(entry: &StationboardEntry) -> Departure {
    let stop = entry.stop.as_ref();

    let time = stop
        .and_then(|s| s.departure.as_deref())
        .and_then(format_time)
        .unwrap_or_else(|| "N/A".to_string());

    Departure {
        time,
        destination: entry.to.clone().unwrap_or_else(|| "Unknown".to_string()),
        category: entry
            .category
            .clone()
            .unwrap_or_else(|| "Train".to_string()),
        number: entry.number.clone().unwrap_or_default(),
        platform: stop
            .and_then(|s| s.platform.clone())
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

/// Comma-space join of departure times.
pub fn schedule_string(departures: &[Departure]) -> String {
    departures
        .iter()
        .map(|d| d.time.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Station-type suffixes dropped when deriving the city name
/// ("Zürich HB" is in Zürich, "Basel SBB" in Basel).
const STATION_SUFFIXES: [&str; 3] = ["HB", "SBB", "Hbf"];

/// Derive the display location for a station.
///
/// Coordinates give a degree string, but the city portion of the
/// requested name (everything before the first comma, minus a
/// station-type suffix) takes precedence whenever it is non-empty, so
/// coordinates only show for nameless requests.
fn location_for(requested: &str, station: &StationDto) -> String {
    let mut location = "Switzerland".to_string();

    if let Some(coordinate) = &station.coordinate
        && let (Some(x), Some(y)) = (coordinate.x, coordinate.y)
    {
        location = format!("{y:.4}°N, {x:.4}°E");
    }

    if let Some(city) = requested.split(',').next().filter(|c| !c.is_empty()) {
        let mut city = city.trim_end();
        for suffix in STATION_SUFFIXES {
            if let Some(stripped) = city.strip_suffix(suffix) {
                let stripped = stripped.trim_end();
                if !stripped.is_empty() {
                    city = stripped;
                }
                break;
            }
        }
        location = format!("{city}, Switzerland");
    }

    location
}

/// Build one destination from a locations hit and its stationboard.
///
/// `index` is the station's zero-based position in the requested batch;
/// it drives the id, the synthetic price, and the description choice.
pub fn convert_destination(
    index: usize,
    requested: &str,
    station: &StationDto,
    board: &[StationboardEntry],
) -> Destination {
    let departures: Vec<Departure> = board.iter().map(map_departure).collect();

    let schedule = if departures.is_empty() {
        DEFAULT_SCHEDULE.to_string()
    } else {
        schedule_string(&departures)
    };

    let transport_type = board
        .first()
        .and_then(|entry| entry.category.as_deref())
        .map(classify_transport)
        .unwrap_or_else(|| "Train".to_string());

    let description = DESCRIPTIONS[index % DESCRIPTIONS.len()]
        .replace("{transport}", &transport_type);

    Destination {
        id: index as u32 + 1,
        name: station
            .name
            .clone()
            .unwrap_or_else(|| requested.to_string()),
        description,
        location: location_for(requested, station),
        status: "Operating".to_string(),
        rating: 4.0 + rand::thread_rng().gen_range(0.0..1.0),
        category: "Transport".to_string(),
        price: 15.0 + index as f64 * 5.0,
        schedule,
        transport_type,
        departures,
    }
}

/// Synthetic placeholder substituted when enrichment for one station
/// fails, preserving batch completeness.
pub fn fallback_destination(index: usize, requested: &str) -> Destination {
    let departures: Vec<Departure> = FALLBACK_TIMES
        .iter()
        .map(|time| Departure {
            time: (*time).to_string(),
            destination: "Unknown".to_string(),
            category: "Train".to_string(),
            number: String::new(),
            platform: "N/A".to_string(),
        })
        .collect();

    Destination {
        id: index as u32 + 1,
        name: requested.to_string(),
        description: format!(
            "Transport hub in {requested}, Switzerland with regular services."
        ),
        location: "Switzerland".to_string(),
        status: "Operating".to_string(),
        rating: 4.2,
        category: "Transport".to_string(),
        price: 15.0 + index as f64 * 5.0,
        schedule: FALLBACK_TIMES.join(", "),
        transport_type: "Train".to_string(),
        departures,
    }
}

/// Filter a stationboard to departures still ahead of `now` today.
///
/// Keeps entries whose timestamp parses, falls on the same calendar
/// day as `now` (compared in `now`'s offset), and is at or after `now`.
pub fn remaining_departures(
    board: &[StationboardEntry],
    now: DateTime<FixedOffset>,
) -> Vec<Departure> {
    board
        .iter()
        .filter(|entry| {
            entry
                .stop
                .as_ref()
                .and_then(|s| s.departure.as_deref())
                .and_then(parse_timestamp)
                .is_some_and(|t| {
                    let local = t.with_timezone(now.offset());
                    local.date_naive() == now.date_naive() && t >= now
                })
        })
        .map(map_departure)
        .collect()
}

/// Map one connections-API entry to a journey view-model.
pub fn convert_connection(dto: &ConnectionDto) -> Connection {
    let leg_types: Vec<String> = dto
        .sections
        .iter()
        .filter_map(|section| section.journey.as_ref())
        .map(|journey| {
            let category = journey.category.clone().unwrap_or_default();
            match journey.number.as_deref() {
                Some(number) if !number.is_empty() => format!("{category} {number}"),
                _ => category,
            }
        })
        .filter(|leg| !leg.is_empty())
        .collect();

    let train_type = if leg_types.is_empty() {
        "Train".to_string()
    } else {
        leg_types.join(" → ")
    };

    Connection {
        from: dto
            .from
            .station
            .name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        to: dto
            .to
            .station
            .name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        departure: dto
            .from
            .departure
            .as_deref()
            .and_then(format_time)
            .unwrap_or_else(|| "N/A".to_string()),
        arrival: dto
            .to
            .arrival
            .as_deref()
            .and_then(format_time)
            .unwrap_or_else(|| "N/A".to_string()),
        duration: format_duration(dto.duration.as_deref().unwrap_or("N/A")),
        platform: dto
            .from
            .platform
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        transfers: dto.transfers.unwrap_or(0),
        train_type,
        train_number: String::new(),
    }
}
