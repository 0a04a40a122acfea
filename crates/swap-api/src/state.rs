//! Application state shared across API handlers

use std::sync::Arc;

use swap_core::TokenRegistry;
use swap_planner::SwapPlanner;

/// Shared application state.
///
/// Everything inside is immutable after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    planner: SwapPlanner,
}

impl AppState {
    pub fn new(planner: SwapPlanner) -> Self {
        Self {
            inner: Arc::new(AppStateInner { planner }),
        }
    }

    pub fn planner(&self) -> &SwapPlanner {
        &self.inner.planner
    }

    /// Registry the planner resolves symbols against
    pub fn registry(&self) -> &TokenRegistry {
        self.inner.planner.registry()
    }
}
