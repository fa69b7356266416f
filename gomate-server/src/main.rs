use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use gomate_server::auth::{AuthClient, AuthConfig};
use gomate_server::cache::{CacheConfig, CachedTransportClient};
use gomate_server::storage::KvStore;
use gomate_server::transport::{TransportClient, TransportConfig};
use gomate_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional overrides, mostly for pointing at a local stub.
    let mut transport_config = TransportConfig::new();
    if let Ok(url) = std::env::var("GOMATE_TRANSPORT_URL") {
        transport_config = transport_config.with_base_url(url);
    }
    let mut auth_config = AuthConfig::new();
    if let Ok(url) = std::env::var("GOMATE_AUTH_URL") {
        auth_config = auth_config.with_base_url(url);
    }
    let data_dir =
        std::env::var("GOMATE_DATA_DIR").unwrap_or_else(|_| "gomate-data".to_string());

    let transport_client =
        TransportClient::new(transport_config).expect("Failed to create transport client");
    let cached_transport = CachedTransportClient::new(transport_client, &CacheConfig::default());
    let auth_client = AuthClient::new(auth_config).expect("Failed to create auth client");
    let storage = KvStore::new(&data_dir);

    let state = AppState::new(Arc::new(cached_transport), auth_client, storage);

    // Warm persisted state before taking traffic.
    let favorites = state.favorites.load().await;
    let dark = state.theme.load().await;
    let restored = state.session.restore().await;
    tracing::info!(
        favorites = favorites.len(),
        dark_mode = dark,
        session = restored.is_some(),
        data_dir = %data_dir,
        "restored persisted state"
    );

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("GoMate server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
