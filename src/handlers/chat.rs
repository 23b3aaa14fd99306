use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingForm, ConversationMessage, ConversationState, Route};
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    pub state: ConversationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct FormSubmission {
    pub session_id: String,
    #[serde(flatten)]
    pub form: BookingForm,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub state: ConversationState,
    pub messages: Vec<ConversationMessage>,
}

// POST /api/chat
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let (session_id, handle) = state.sessions.get_or_create(payload.session_id.as_deref());
    let mut session = handle.lock().await;

    let outcome = conversation::process_message(&state, &mut session, payload.message.trim()).await;

    Json(ChatResponse {
        session_id,
        reply: outcome.reply,
        route: outcome.route,
        state: outcome.state,
        booking: outcome.booking,
    })
}

// POST /api/chat/form
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FormSubmission>,
) -> Result<Json<ChatResponse>, AppError> {
    let handle = state
        .sessions
        .get(&payload.session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {}", payload.session_id)))?;
    let mut session = handle.lock().await;

    let outcome = conversation::submit_form(&state, &mut session, payload.form).await?;

    Ok(Json(ChatResponse {
        session_id: payload.session_id,
        reply: outcome.reply,
        route: outcome.route,
        state: outcome.state,
        booking: outcome.booking,
    }))
}

// DELETE /api/chat/:session_id/form
pub async fn dismiss_form(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatResponse>, AppError> {
    let handle = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
    let mut session = handle.lock().await;

    let outcome = conversation::dismiss_form(&state, &mut session)?;

    Ok(Json(ChatResponse {
        session_id,
        reply: outcome.reply,
        route: outcome.route,
        state: outcome.state,
        booking: outcome.booking,
    }))
}

// GET /api/chat/:session_id
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let handle = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
    let session = handle.lock().await;

    Ok(Json(TranscriptResponse {
        session_id,
        state: session.state,
        messages: session.messages.clone(),
    }))
}
