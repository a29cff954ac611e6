// src/state.rs

use crate::config::AppConfig;
use crate::store::Store;
use std::sync::Arc;

/// Shared handler state. The store is injected here (never reached for as
/// ambient process state), so tests can swap in `MemStore`.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub config: Arc<AppConfig>,
}
