//! Customer API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;

use shared::models::{CustomerCreate, CustomerRecord};

use crate::core::ServerState;
use crate::store::DeskStore;
use crate::utils::{AppError, AppResult};

/// Customer record with its store key
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: String,
    #[serde(flatten)]
    pub record: CustomerRecord,
}

/// POST /api/customers - register a guest
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<CustomerView>> {
    if payload.guest_name.trim().is_empty() {
        return Err(AppError::validation("guest_name must not be empty"));
    }

    let record = payload.into_record(Utc::now().timestamp_millis());
    let id = state
        .store
        .create_customer(&record)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(customer_id = %id, "customer registered");
    Ok(Json(CustomerView { id, record }))
}

/// GET /api/customers - list guests
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CustomerView>>> {
    let customers = state
        .store
        .customers()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let views = customers
        .into_iter()
        .map(|(id, record)| CustomerView { id, record })
        .collect();
    Ok(Json(views))
}

/// GET /api/customers/:id - single guest record
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CustomerView>> {
    let record = state
        .store
        .customer(&id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", id)))?;
    Ok(Json(CustomerView { id, record }))
}
