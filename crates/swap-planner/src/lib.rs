//! Swap planning
//!
//! The one piece of original logic in the gateway: validate a swap request,
//! resolve symbols through the token registry, convert units, delegate route
//! search to the routing engine, and shape the answer.

pub mod planner;
pub mod state;

// Re-exports
pub use planner::{Clock, SwapPlanner, SystemClock};
pub use state::{SwapPlan, SwapRequest};
