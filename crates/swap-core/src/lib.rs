//! swap-core: Shared types, errors, and configuration
//!
//! This crate provides the foundational types used across the swap gateway
//! workspace: the static token registry, fixed-point unit conversion, the
//! error taxonomy surfaced to HTTP callers, and process configuration.

pub mod config;
pub mod errors;
pub mod tokens;
pub mod types;
pub mod units;

pub use config::*;
pub use errors::*;
pub use tokens::{TokenDescriptor, TokenRegistry};
pub use types::*;
pub use units::{format_units, parse_units, FixedPointAmount, UnitsError};
