use abi::{Listing, ListingKind};
use axum::{extract::State, Json};

use crate::{ApiError, AppState};

pub async fn attractions(State(state): State<AppState>) -> Result<Json<Vec<Listing>>, ApiError> {
    Ok(Json(state.store.listings(ListingKind::Attraction).await?))
}

pub async fn culinary(State(state): State<AppState>) -> Result<Json<Vec<Listing>>, ApiError> {
    Ok(Json(state.store.listings(ListingKind::Culinary).await?))
}
