//! Favorites state.
//!
//! Membership is keyed by destination id; the list never holds two
//! entries with the same id. Every mutation writes the full list back
//! to storage as a spawned best-effort task: write failures are logged
//! and the in-memory mutation stands.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Destination;
use crate::storage::KvStore;

/// Storage key for the persisted favorites list.
pub const FAVORITES_STORAGE_KEY: &str = "gomate_favorites";

/// Persisted favorites list.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: KvStore,
    inner: Arc<RwLock<Vec<Destination>>>,
}

impl FavoritesStore {
    /// Create an empty store backed by the given storage.
    pub fn new(storage: KvStore) -> Self {
        Self {
            storage,
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Load the persisted list into memory.
    ///
    /// A missing key, read error, or corrupt blob all degrade to an
    /// empty list; favorites are never a hard failure.
    pub async fn load(&self) -> Vec<Destination> {
        let favorites = match self.storage.get(FAVORITES_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Destination>>(&json) {
                Ok(favorites) => favorites,
                Err(e) => {
                    tracing::warn!(error = %e, "corrupt favorites blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites");
                Vec::new()
            }
        };

        *self.inner.write().await = favorites.clone();
        favorites
    }

    /// Toggle a destination in or out of the list.
    ///
    /// Returns `true` when the destination is a favorite afterwards.
    pub async fn toggle(&self, destination: Destination) -> bool {
        let mut favorites = self.inner.write().await;

        let now_favorite = match favorites.iter().position(|f| f.id == destination.id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(destination);
                true
            }
        };

        self.persist(&favorites);
        now_favorite
    }

    /// Add a destination unless an entry with its id already exists.
    pub async fn add(&self, destination: Destination) {
        let mut favorites = self.inner.write().await;

        if favorites.iter().any(|f| f.id == destination.id) {
            return;
        }

        favorites.push(destination);
        self.persist(&favorites);
    }

    /// Remove the entry with the given id, if present.
    pub async fn remove(&self, id: u32) {
        let mut favorites = self.inner.write().await;
        favorites.retain(|f| f.id != id);
        self.persist(&favorites);
    }

    /// Current favorites.
    pub async fn favorites(&self) -> Vec<Destination> {
        self.inner.read().await.clone()
    }

    /// Whether an entry with this id is currently a favorite.
    pub async fn is_favorite(&self, id: u32) -> bool {
        self.inner.read().await.iter().any(|f| f.id == id)
    }

    /// Fire-and-forget persistence of the full list.
    fn persist(&self, favorites: &[Destination]) {
        let json = match serde_json::to_string(favorites) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize favorites");
                return;
            }
        };

        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(e) = storage.set(FAVORITES_STORAGE_KEY, &json).await {
                tracing::warn!(error = %e, "failed to save favorites");
            }
        });
    }
}
