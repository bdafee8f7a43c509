//! Room API handlers

use axum::{Json, extract::State};

use crate::booking::{RoomStats, RoomView};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/rooms - full inventory, sorted by room number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RoomView>>> {
    let rooms = state.manager.list_rooms().await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/available - bookable rooms only
pub async fn available(State(state): State<ServerState>) -> AppResult<Json<Vec<RoomView>>> {
    let rooms = state.manager.available_rooms().await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/stats - occupancy counts against the fixed inventory
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<RoomStats>> {
    let stats = state.manager.room_stats().await?;
    Ok(Json(stats))
}
