//! Room API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/rooms | GET | Full inventory with derived availability |
//! | /api/rooms/available | GET | Bookable rooms only |
//! | /api/rooms/stats | GET | Dashboard counts |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/rooms", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/available", get(handler::available))
        .route("/stats", get(handler::stats))
}
