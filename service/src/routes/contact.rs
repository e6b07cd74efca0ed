use abi::{ContactInfo, ContactInfoForm, ContactMessage, MessageId, MessageStatus, NewContactMessage};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::{StatusUpdate, Success};
use crate::{AdminSession, ApiError, AppState, JsonBody, PathParam, QueryParams};

#[derive(Debug, Default, Deserialize)]
pub struct MessageParams {
    status: Option<String>,
}

pub async fn contact_info(State(state): State<AppState>) -> Result<Json<ContactInfo>, ApiError> {
    Ok(Json(state.store.contact_info().await?))
}

pub async fn submit_message(
    State(state): State<AppState>,
    JsonBody(msg): JsonBody<NewContactMessage>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    let msg = state.store.submit_message(msg).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

pub async fn update_contact_info(
    _admin: AdminSession,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ContactInfoForm>,
) -> Result<Json<ContactInfo>, ApiError> {
    Ok(Json(state.store.update_contact_info(form).await?))
}

pub async fn list_messages(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<MessageParams>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<MessageStatus>)
        .transpose()?;
    Ok(Json(state.store.messages(status).await?))
}

pub async fn update_message(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<MessageId>,
    JsonBody(update): JsonBody<StatusUpdate<MessageStatus>>,
) -> Result<Json<ContactMessage>, ApiError> {
    Ok(Json(state.store.set_message_status(id, update.status).await?))
}

pub async fn delete_message(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<MessageId>,
) -> Result<Json<Success>, ApiError> {
    state.store.delete_message(id).await?;
    Ok(Success::json())
}
