//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Local;

use crate::auth::AuthError;
use crate::domain::Destination;
use crate::store::{ConnectionsError, DestinationsError, Registration};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/session", get(session))
        .route("/api/auth/logout", post(logout))
        .route("/api/destinations", get(list_destinations))
        .route("/api/destinations/:id", get(destination_by_id))
        .route("/api/connections", get(search_connections))
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/toggle", post(toggle_favorite))
        .route("/api/theme", get(theme))
        .route("/api/theme/toggle", post(toggle_theme))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Log in with username and password.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.session.login(&req.username, &req.password).await?;
    Ok(Json(user))
}

/// Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> impl IntoResponse {
    let user = state.session.register(registration).await;
    (StatusCode::CREATED, Json(user))
}

/// Current session snapshot.
async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    let user = state.session.current_user().await;
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

/// Log out and forget the persisted session.
async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}

/// Fetch the destination list, optionally narrowed by a search query.
async fn list_destinations(
    State(state): State<AppState>,
    Query(req): Query<DestinationsQuery>,
) -> Result<Json<DestinationsResponse>, AppError> {
    let destinations = state
        .destinations
        .fetch_destinations(req.query.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(DestinationsResponse { destinations }))
}

/// Refresh one destination's departures for the rest of today.
async fn destination_by_id(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<DestinationResponse>, AppError> {
    let now = Local::now().fixed_offset();
    let destination = state.destinations.fetch_destination_by_id(id, now).await?;

    Ok(Json(DestinationResponse { destination }))
}

/// Search connections between two stations.
async fn search_connections(
    State(state): State<AppState>,
    Query(req): Query<ConnectionsQuery>,
) -> Result<Json<ConnectionsResponse>, AppError> {
    let connections = state.connections.search(&req.from, &req.to).await?;
    Ok(Json(ConnectionsResponse { connections }))
}

/// Current favorites.
async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: state.favorites.favorites().await,
    })
}

/// Toggle a destination in or out of the favorites list.
async fn toggle_favorite(
    State(state): State<AppState>,
    Json(destination): Json<Destination>,
) -> Json<ToggleFavoriteResponse> {
    let favorite = state.favorites.toggle(destination).await;
    Json(ToggleFavoriteResponse {
        favorite,
        favorites: state.favorites.favorites().await,
    })
}

fn theme_name(dark: bool) -> String {
    if dark { "dark" } else { "light" }.to_string()
}

/// Current theme.
async fn theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: theme_name(state.theme.is_dark_mode().await),
    })
}

/// Flip the theme.
async fn toggle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: theme_name(state.theme.toggle().await),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DestinationsError> for AppError {
    fn from(e: DestinationsError) -> Self {
        match e {
            DestinationsError::NoStationsFound | DestinationsError::FetchByIdFailed => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            DestinationsError::FetchFailed => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConnectionsError> for AppError {
    fn from(e: ConnectionsError) -> Self {
        match e {
            ConnectionsError::MissingStations => AppError::BadRequest {
                message: e.to_string(),
            },
            ConnectionsError::NoConnections => AppError::NotFound {
                message: e.to_string(),
            },
            ConnectionsError::SearchFailed => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
