use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::{stream, Stream};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::services::{AuthUser, MaybeAuthUser},
    error::{store_rejection, validation_rejection, Rejection},
    forms::{validate_tracking_id, BookingForm},
    session::{
        views::{back_destination, can_view_shipment, StatusTone, Viewer, ACCESS_DENIED},
        Page,
    },
    state::AppState,
};

use super::dto::{BookedShipmentResponse, ShipmentListItem, ShipmentView};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/shipments", get(list_shipments))
        .route("/shipments/:id", get(get_shipment))
        .route("/shipments/:id/events", get(shipment_events))
        .route("/track/:tracking_id", get(track))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/shipments", post(book_shipment))
}

#[instrument(skip(state))]
pub async fn list_shipments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<Vec<ShipmentListItem>> {
    let shipments = state.store.get_user_shipments(&user.user_id).await;
    Json(shipments.into_iter().map(ShipmentListItem::from).collect())
}

#[instrument(skip(state))]
pub async fn get_shipment(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(id): Path<String>,
) -> Result<Json<ShipmentView>, Rejection> {
    let viewer = user.map(Viewer::from);
    let shipment = state
        .store
        .get_shipment_by_id(&id)
        .await
        .map_err(store_rejection)?;

    if !can_view_shipment(viewer.as_ref(), &shipment) {
        warn!(shipment_id = %id, "shipment belongs to another user");
        return Err((StatusCode::FORBIDDEN, ACCESS_DENIED.to_string()));
    }

    Ok(Json(ShipmentView {
        tone: StatusTone::of(&shipment.status),
        back: back_destination(viewer.as_ref()),
        shipment,
    }))
}

/// GET /shipments/:id/events
/// Streams the detail view: one event right away, then one per poll
/// interval. The stream ends after the first failure.
#[instrument(skip(state))]
pub async fn shipment_events(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!(shipment_id = %id, "live tracking subscribed");
    let handle = state.poller.watch(user.map(Viewer::from), id);
    // the handle lives inside the stream; a client disconnect drops it
    let events = stream::unfold(handle, |mut handle| async move {
        let event = handle.next().await?;
        Some((Event::default().json_data(&event), handle))
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}

#[instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<ShipmentView>, Rejection> {
    let tracking_id = validate_tracking_id(&tracking_id).map_err(validation_rejection)?;
    let shipment = state
        .store
        .get_shipment_by_tracking_id(tracking_id)
        .await
        .map_err(store_rejection)?;
    Ok(Json(ShipmentView {
        tone: StatusTone::of(&shipment.status),
        back: Page::Home,
        shipment,
    }))
}

/// POST /shipments { kind, courier, origin, destination, destination_country? }
#[instrument(skip(state, payload))]
pub async fn book_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BookingForm>,
) -> Result<(StatusCode, HeaderMap, Json<BookedShipmentResponse>), Rejection> {
    let (courier, details) = payload.validate().map_err(validation_rejection)?;

    let shipment = state
        .store
        .book_shipment(&user.user_id, &courier, details)
        .await
        .map_err(store_rejection)?;
    info!(shipment_id = %shipment.id, tracking_id = %shipment.tracking_id, "booking confirmed");

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/v1/shipments/{}", shipment.id))
        .map_err(|e| {
            error!(error = %e, "invalid location header");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    headers.insert(header::LOCATION, location);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(BookedShipmentResponse {
            message: format!(
                "Shipment booked successfully! Your tracking ID is {}.",
                shipment.tracking_id
            ),
            shipment,
            next: Page::Dashboard,
        }),
    ))
}
