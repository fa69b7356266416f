//! Application state containers.
//!
//! Each store owns one slice of app state behind an `Arc<RwLock>`,
//! mutated only by its own methods: async fetch against an API client,
//! normalize, swap state. Favorites, theme, and session additionally
//! persist to the key-value store as a best-effort side effect.

pub mod connections;
pub mod destinations;
pub mod favorites;
pub mod session;
pub mod theme;

pub use connections::{ConnectionsError, ConnectionsStore};
pub use destinations::{DestinationsError, DestinationsStore};
pub use favorites::FavoritesStore;
pub use session::{Registration, SessionStore};
pub use theme::ThemeStore;
