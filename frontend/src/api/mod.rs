mod auth;
pub mod client;
pub mod events;
pub mod query;
pub mod storage;
pub mod types;

pub use client::*;
pub use events::{AuthChangeEvent, AuthEvents, AuthStateChange, AuthSubscription};
pub use query::Query;
pub use types::*;
