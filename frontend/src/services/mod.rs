//! Purpose-grouped wrappers over [`crate::api::ApiClient`] used by the state
//! and page layers.

pub mod auth;
pub mod db;
pub mod storage;
