//! GoMate travel companion server.
//!
//! A web service over the Swiss public transport API that turns raw
//! station, stationboard, and connection data into ready-to-display
//! destination and journey records.

pub mod auth;
pub mod cache;
pub mod domain;
pub mod storage;
pub mod store;
pub mod transport;
pub mod web;
