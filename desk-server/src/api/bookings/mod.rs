//! Booking API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/bookings | POST | Reserve one or more rooms for a guest |
//! | /api/bookings | GET | List bookings, newest first |
//! | /api/bookings/{id} | GET | Booking detail with resolved room and guest |
//! | /api/bookings/{id}/checkout | POST | Check out a single booking |
//! | /api/bookings/checkout | POST | Check out every active booking of a guest |
//! | /api/bookings/reconcile | POST | Run a reconciliation sweep on demand |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::reserve).get(handler::list))
        .route("/checkout", post(handler::checkout_customer))
        .route("/reconcile", post(handler::reconcile))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/checkout", post(handler::checkout_booking))
}
