use abi::{
    Availability, DateRange, NewReservation, Page, Reservation, ReservationFilterBuilder,
    ReservationId, ReservationStatus,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::debug;

use super::StatusUpdate;
use crate::{AdminSession, ApiError, AppState, JsonBody, PathParam, QueryParams};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    check_in_date: Option<String>,
    check_out_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationParams {
    homestay: Option<String>,
    status: Option<String>,
    cursor: Option<i64>,
    page_size: Option<i64>,
    #[serde(default)]
    desc: bool,
}

/// `GET /api/homestays/:slug/availability?checkInDate=..&checkOutDate=..`
pub async fn check_availability(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    QueryParams(params): QueryParams<AvailabilityParams>,
) -> Result<Json<Availability>, ApiError> {
    let range = DateRange::from_params(
        params.check_in_date.as_deref(),
        params.check_out_date.as_deref(),
    )?;
    let availability = state.store.check_availability(&slug, range).await?;
    debug!(
        slug = %slug,
        check_in = %range.check_in,
        check_out = %range.check_out,
        available = availability.available,
        "availability checked"
    );
    Ok(Json(availability))
}

pub async fn reserve(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    JsonBody(rsvp): JsonBody<NewReservation>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let reservation = state.store.reserve(&slug, rsvp).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn list_reservations(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ReservationParams>,
) -> Result<Json<Page<Reservation>>, ApiError> {
    let mut builder = ReservationFilterBuilder::default();
    builder.desc(params.desc);
    if let Some(homestay) = params.homestay {
        builder.homestay(homestay);
    }
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        builder.status(status.parse::<ReservationStatus>()?);
    }
    if let Some(cursor) = params.cursor {
        builder.cursor(cursor);
    }
    if let Some(page_size) = params.page_size {
        builder.page_size(page_size);
    }
    let filter = builder.build()?;
    Ok(Json(state.store.query(filter).await?))
}

pub async fn get_reservation(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<ReservationId>,
) -> Result<Json<Reservation>, ApiError> {
    Ok(Json(state.store.get(id).await?))
}

pub async fn update_reservation(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<ReservationId>,
    JsonBody(update): JsonBody<StatusUpdate<ReservationStatus>>,
) -> Result<Json<Reservation>, ApiError> {
    Ok(Json(state.store.change_status(id, update.status).await?))
}
