pub mod calendar;
pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/chat", post(chat::send_message))
        .route("/api/chat/form", post(chat::submit_form))
        .route("/api/chat/:session_id", get(chat::get_transcript))
        .route("/api/chat/:session_id/form", delete(chat::dismiss_form))
        .route("/api/calendar/upcoming", get(calendar::upcoming))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
