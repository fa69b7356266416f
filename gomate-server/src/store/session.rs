//! Session state.
//!
//! The token and the user profile persist under two separate keys;
//! their joint presence on restore means "authenticated", anything
//! else degrades to the logged-out state. Persistence is best-effort
//! throughout: a failed write never fails a login.

use std::sync::Arc;

use rand::Rng;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::{AuthClient, AuthError};
use crate::domain::User;
use crate::storage::KvStore;

/// Storage key for the session token.
pub const TOKEN_STORAGE_KEY: &str = "userToken";

/// Storage key for the JSON-encoded user profile.
pub const USER_STORAGE_KEY: &str = "userData";

/// Registration form data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Authentication state.
#[derive(Clone)]
pub struct SessionStore {
    auth: AuthClient,
    storage: KvStore,
    user: Arc<RwLock<Option<User>>>,
}

impl SessionStore {
    /// Create a logged-out store.
    pub fn new(auth: AuthClient, storage: KvStore) -> Self {
        Self {
            auth,
            storage,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Log in against the auth API and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.auth.login(username, password).await?;

        self.persist(&user);
        *self.user.write().await = Some(user.clone());

        Ok(user)
    }

    /// Register a new user.
    ///
    /// The upstream service has no real registration, so the user is
    /// fabricated locally with a random id and a timestamped mock
    /// token, then persisted like a login.
    pub async fn register(&self, registration: Registration) -> User {
        let user = User {
            id: rand::thread_rng().gen_range(0..1000),
            username: registration.username,
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            token: format!("mock-token-{}", chrono::Utc::now().timestamp_millis()),
        };

        self.persist(&user);
        *self.user.write().await = Some(user.clone());

        user
    }

    /// Restore a persisted session.
    ///
    /// Returns the user when both keys are present and the profile
    /// parses; in every other case (missing keys, read error, corrupt
    /// blob) the store stays logged out.
    pub async fn restore(&self) -> Option<User> {
        let token = self.storage.get(TOKEN_STORAGE_KEY).await.ok().flatten()?;
        let data = self.storage.get(USER_STORAGE_KEY).await.ok().flatten()?;

        if token.is_empty() {
            return None;
        }

        let user = match serde_json::from_str::<User>(&data) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt session blob, staying logged out");
                return None;
            }
        };

        *self.user.write().await = Some(user.clone());
        Some(user)
    }

    /// Log out and delete the persisted session.
    pub async fn logout(&self) {
        *self.user.write().await = None;

        if let Err(e) = self.storage.remove(TOKEN_STORAGE_KEY).await {
            tracing::warn!(error = %e, "failed to remove session token");
        }
        if let Err(e) = self.storage.remove(USER_STORAGE_KEY).await {
            tracing::warn!(error = %e, "failed to remove session user");
        }
    }

    /// Currently logged-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Whether a user is logged in.
    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Fire-and-forget persistence of token and profile.
    fn persist(&self, user: &User) {
        let json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize session user");
                return;
            }
        };
        let token = user.token.clone();

        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(e) = storage.set(TOKEN_STORAGE_KEY, &token).await {
                tracing::warn!(error = %e, "failed to save session token");
            }
            if let Err(e) = storage.set(USER_STORAGE_KEY, &json).await {
                tracing::warn!(error = %e, "failed to save session user");
            }
        });
    }
}
