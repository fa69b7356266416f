//! Application state for the web layer.

use std::sync::Arc;

use crate::auth::AuthClient;
use crate::storage::KvStore;
use crate::store::{
    ConnectionsStore, DestinationsStore, FavoritesStore, SessionStore, ThemeStore,
};
use crate::transport::TransportApi;

/// Shared application state.
///
/// One instance per process, created at startup and cloned into every
/// handler. Each store serializes its own mutations; there is no other
/// shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub destinations: DestinationsStore,
    pub connections: ConnectionsStore,
    pub favorites: FavoritesStore,
    pub theme: ThemeStore,
    pub session: SessionStore,
}

impl AppState {
    /// Wire up all stores against the given collaborators.
    pub fn new(transport: Arc<dyn TransportApi>, auth: AuthClient, storage: KvStore) -> Self {
        Self {
            destinations: DestinationsStore::new(transport.clone()),
            connections: ConnectionsStore::new(transport),
            favorites: FavoritesStore::new(storage.clone()),
            theme: ThemeStore::new(storage.clone()),
            session: SessionStore::new(auth, storage),
        }
    }
}
