use abi::{Facility, Homestay, HomestayFilter, HomestayForm};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use super::Success;
use crate::{AdminSession, ApiError, AppState, JsonBody, PathParam, QueryParams};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    q: Option<String>,
    max_price: Option<i64>,
}

pub async fn list_homestays(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<Homestay>>, ApiError> {
    let filter = HomestayFilter {
        q: params.q,
        max_price: params.max_price,
    };
    Ok(Json(state.store.list_homestays(filter).await?))
}

pub async fn get_homestay(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Homestay>, ApiError> {
    Ok(Json(state.store.homestay(&slug).await?))
}

pub async fn facilities(State(state): State<AppState>) -> Result<Json<Vec<Facility>>, ApiError> {
    Ok(Json(state.store.facilities().await?))
}

pub async fn create_homestay(
    _admin: AdminSession,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<HomestayForm>,
) -> Result<(StatusCode, Json<Homestay>), ApiError> {
    let homestay = state.store.create_homestay(form).await?;
    Ok((StatusCode::CREATED, Json(homestay)))
}

pub async fn update_homestay(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    JsonBody(form): JsonBody<HomestayForm>,
) -> Result<Json<Homestay>, ApiError> {
    Ok(Json(state.store.update_homestay(&slug, form).await?))
}

pub async fn delete_homestay(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Success>, ApiError> {
    state.store.delete_homestay(&slug).await?;
    info!(slug = %slug, "homestay removed by admin");
    Ok(Success::json())
}
