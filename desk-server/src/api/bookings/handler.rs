//! Booking API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{BookingDetail, BookingSummary, CheckoutTarget, RoomReleaseOutcome};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub customer_id: String,
    pub room_nos: Vec<u32>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReservedRoom {
    pub room_no: u32,
    pub booking_id: String,
}

#[derive(Debug, Serialize)]
pub struct FailedRoom {
    pub room_no: u32,
    pub error: String,
}

/// Per-room results of a multi-room reservation request
#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    pub reserved: Vec<ReservedRoom>,
    pub failed: Vec<FailedRoom>,
}

/// POST /api/bookings - reserve rooms for a guest
///
/// Rooms are reserved independently; the response reports which rooms
/// were won and which were not. A partially failed request is HTTP 200.
pub async fn reserve(
    State(state): State<ServerState>,
    Json(payload): Json<ReserveRequest>,
) -> AppResult<Json<ReserveResponse>> {
    if payload.room_nos.is_empty() {
        return Err(AppError::validation("room_nos must not be empty"));
    }

    let results = state
        .manager
        .reserve_rooms(
            &payload.customer_id,
            &payload.room_nos,
            payload.check_in,
            payload.check_out,
        )
        .await;

    let mut response = ReserveResponse {
        reserved: Vec::new(),
        failed: Vec::new(),
    };
    for (room_no, result) in results {
        match result {
            Ok(booking_id) => response.reserved.push(ReservedRoom {
                room_no,
                booking_id,
            }),
            Err(error) => response.failed.push(FailedRoom {
                room_no,
                error: error.to_string(),
            }),
        }
    }
    Ok(Json(response))
}

/// GET /api/bookings - list bookings, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BookingSummary>>> {
    let bookings = state.manager.list_bookings().await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - booking detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingDetail>> {
    let detail = state.manager.booking_detail(&id).await?;
    Ok(Json(detail))
}

/// POST /api/bookings/:id/checkout - check out a single booking
pub async fn checkout_booking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<RoomReleaseOutcome>>> {
    let outcomes = state.manager.checkout(CheckoutTarget::Booking(id)).await?;
    Ok(Json(outcomes))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutCustomerRequest {
    pub customer_id: String,
}

/// POST /api/bookings/checkout - check out every active booking of a guest
pub async fn checkout_customer(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutCustomerRequest>,
) -> AppResult<Json<Vec<RoomReleaseOutcome>>> {
    let outcomes = state
        .manager
        .checkout(CheckoutTarget::Customer(payload.customer_id))
        .await?;
    Ok(Json(outcomes))
}

#[derive(Debug, Deserialize)]
pub struct ReconcileParams {
    /// Optional label recorded in the sweep logs (e.g. "manual")
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub corrected: u32,
}

/// POST /api/bookings/reconcile - run a reconciliation sweep now
pub async fn reconcile(
    State(state): State<ServerState>,
    Query(params): Query<ReconcileParams>,
) -> AppResult<Json<ReconcileResponse>> {
    let corrected = state.manager.reconcile(params.scope.as_deref()).await?;
    Ok(Json(ReconcileResponse { corrected }))
}
