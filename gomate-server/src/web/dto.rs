//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Connection, Destination, User};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Current session snapshot.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// Query for the destination list.
#[derive(Debug, Deserialize)]
pub struct DestinationsQuery {
    /// Free-text station search; empty or absent loads the defaults.
    pub query: Option<String>,
}

/// Destination list response.
#[derive(Debug, Serialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<Destination>,
}

/// Single destination response.
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub destination: Destination,
}

/// Query for a journey search.
#[derive(Debug, Deserialize)]
pub struct ConnectionsQuery {
    pub from: String,
    pub to: String,
}

/// Journey search response.
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<Connection>,
}

/// Favorites list response.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Destination>,
}

/// Result of a favorite toggle.
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    /// Whether the destination is a favorite after the toggle.
    pub favorite: bool,
    pub favorites: Vec<Destination>,
}

/// Theme snapshot, `"dark"` or `"light"`.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: String,
}

/// Error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
