//! swap-api: HTTP API layer for the swap gateway
//!
//! Exposes `POST /swap` and `GET /tokens` over the swap planner and the
//! static token registry.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
