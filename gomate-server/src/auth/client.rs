//! Auth HTTP client.
//!
//! Talks to the mock authentication service. Only the login endpoint
//! exists upstream; registration is fabricated locally by the session
//! store.

use serde::{Deserialize, Serialize};

use crate::domain::User;

use super::error::AuthError;

/// Default base URL for the auth API.
const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Login request body.
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    id: u64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    access_token: String,
}

/// Configuration for the auth client.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AuthConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Auth API client.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client with the given configuration.
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Log in via `POST /auth/login`.
    ///
    /// HTTP 400 means the credentials were rejected; any other error
    /// status is surfaced as an API error.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&Credentials { username, password })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(AuthError::InvalidCredentials);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Json(e.to_string()))?;

        Ok(User {
            id: login.id,
            username: login.username,
            email: login.email,
            first_name: login.first_name,
            last_name: login.last_name,
            token: login.access_token,
        })
    }
}
