//! View-model types and the pure formatting helpers that produce them.

pub mod categories;
pub mod connection;
pub mod destination;
pub mod time;
pub mod user;

pub use categories::{classify_transport, expand_train_types, train_type_name};
pub use connection::Connection;
pub use destination::{Departure, Destination};
pub use time::{format_duration, format_time, parse_timestamp};
pub use user::User;
