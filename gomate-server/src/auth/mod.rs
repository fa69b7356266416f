//! Mock authentication API client.

pub mod client;
pub mod error;

pub use client::{AuthClient, AuthConfig};
pub use error::AuthError;
