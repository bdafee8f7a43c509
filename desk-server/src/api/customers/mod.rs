//! Customer API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/customers | POST | Register a guest |
//! | /api/customers | GET | List guests |
//! | /api/customers/{id} | GET | Single guest record |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
