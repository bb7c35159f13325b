//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use sailing_log_core::ports::DatabaseService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store is injected here rather than reached through a global, so handlers
/// run the same against Postgres or a test double.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
}
