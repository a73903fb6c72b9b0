use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::services::AdminUser,
    error::{store_rejection, validation_rejection, Rejection},
    forms::StatusForm,
    shipments::ShipmentListItem,
    state::AppState,
    store::{Shipment, User},
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/shipments", get(list_all_shipments))
        .route("/admin/shipments/:id/status", post(update_status))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>, _admin: AdminUser) -> Json<Vec<User>> {
    Json(state.store.get_all_users().await)
}

#[instrument(skip(state))]
pub async fn list_all_shipments(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Json<Vec<ShipmentListItem>> {
    let shipments = state.store.get_all_shipments().await;
    Json(shipments.into_iter().map(ShipmentListItem::from).collect())
}

/// POST /admin/shipments/:id/status { status, location }
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusForm>,
) -> Result<Json<Shipment>, Rejection> {
    let (status, location) = payload.validate().map_err(validation_rejection)?;
    let shipment = state
        .store
        .update_shipment_status(&id, status, location)
        .await
        .map_err(store_rejection)?;
    info!(shipment_id = %id, admin_id = %admin.user_id, %status, "status updated by admin");
    Ok(Json(shipment))
}
