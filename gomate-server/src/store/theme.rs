//! Theme preference state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::storage::KvStore;

/// Storage key for the persisted theme flag.
pub const THEME_STORAGE_KEY: &str = "gomate_theme";

/// Dark-mode flag, persisted as `"dark"` / `"light"`.
#[derive(Clone)]
pub struct ThemeStore {
    storage: KvStore,
    dark: Arc<RwLock<bool>>,
}

impl ThemeStore {
    /// Create a store defaulting to light mode.
    pub fn new(storage: KvStore) -> Self {
        Self {
            storage,
            dark: Arc::new(RwLock::new(false)),
        }
    }

    /// Load the persisted preference; anything but `"dark"` (including
    /// a read error) means light mode.
    pub async fn load(&self) -> bool {
        let dark = match self.storage.get(THEME_STORAGE_KEY).await {
            Ok(value) => value.as_deref() == Some("dark"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load theme");
                false
            }
        };

        *self.dark.write().await = dark;
        dark
    }

    /// Flip the flag; returns the new value.
    pub async fn toggle(&self) -> bool {
        let mut dark = self.dark.write().await;
        *dark = !*dark;
        self.persist(*dark);
        *dark
    }

    /// Set the flag explicitly.
    pub async fn set(&self, dark: bool) {
        *self.dark.write().await = dark;
        self.persist(dark);
    }

    /// Current flag value.
    pub async fn is_dark_mode(&self) -> bool {
        *self.dark.read().await
    }

    /// Fire-and-forget persistence.
    fn persist(&self, dark: bool) {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            let value = if dark { "dark" } else { "light" };
            if let Err(e) = storage.set(THEME_STORAGE_KEY, value).await {
                tracing::warn!(error = %e, "failed to save theme");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn defaults_to_light() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(KvStore::new(dir.path()));

        assert!(!store.is_dark_mode().await);
        assert!(!store.load().await);
    }

    #[tokio::test]
    async fn toggle_flips_and_reports() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(KvStore::new(dir.path()));

        assert!(store.toggle().await);
        assert!(store.is_dark_mode().await);
        assert!(!store.toggle().await);
        assert!(!store.is_dark_mode().await);
    }

    #[tokio::test]
    async fn loads_persisted_dark_flag() {
        let dir = tempdir().unwrap();
        let storage = KvStore::new(dir.path());
        storage.set(THEME_STORAGE_KEY, "dark").await.unwrap();

        let store = ThemeStore::new(storage);
        assert!(store.load().await);
    }

    #[tokio::test]
    async fn unexpected_value_means_light() {
        let dir = tempdir().unwrap();
        let storage = KvStore::new(dir.path());
        storage.set(THEME_STORAGE_KEY, "blue").await.unwrap();

        let store = ThemeStore::new(storage);
        assert!(!store.load().await);
    }
}
