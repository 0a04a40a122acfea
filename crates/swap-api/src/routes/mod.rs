//! API route handlers

pub mod health;
pub mod swap;
pub mod tokens;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/swap", post(swap::plan_swap))
        .route("/tokens", get(tokens::list_tokens))
        .with_state(state)
}
