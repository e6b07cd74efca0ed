mod contact;
mod homestay;
mod listing;
mod reservation;

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// `{"success": true}` for handlers with nothing else to say
#[derive(Debug, Serialize)]
pub struct Success {
    success: bool,
}

impl Success {
    fn json() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate<T> {
    pub status: T,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let admin = Router::new()
        .route("/homestays", post(homestay::create_homestay))
        .route(
            "/homestays/:slug",
            put(homestay::update_homestay).delete(homestay::delete_homestay),
        )
        .route("/contact", put(contact::update_contact_info))
        .route("/messages", get(contact::list_messages))
        .route(
            "/messages/:id",
            patch(contact::update_message).delete(contact::delete_message),
        )
        .route("/reservations", get(reservation::list_reservations))
        .route(
            "/reservations/:id",
            get(reservation::get_reservation).patch(reservation::update_reservation),
        );

    let api = Router::new()
        .route("/homestays", get(homestay::list_homestays))
        .route("/homestays/:slug", get(homestay::get_homestay))
        .route(
            "/homestays/:slug/availability",
            get(reservation::check_availability),
        )
        .route("/homestays/:slug/reservations", post(reservation::reserve))
        .route("/facilities", get(homestay::facilities))
        .route("/attractions", get(listing::attractions))
        .route("/culinary", get(listing::culinary))
        .route("/contact", get(contact::contact_info))
        .route("/contact/messages", post(contact::submit_message))
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
