//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`rooms`] - room inventory and availability views
//! - [`bookings`] - reservation, checkout and reconciliation
//! - [`customers`] - guest records
//!
//! Every resource follows the same shape: a `mod.rs` that owns the
//! routes and a `handler.rs` with the request handlers.

pub mod health;

pub mod bookings;
pub mod customers;
pub mod rooms;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .merge(customers::router())
        .with_state(state)
}
