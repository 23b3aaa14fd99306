use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::errors::AppError;
use crate::models::CalendarEvent;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/calendar/upcoming
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let calendar = state
        .calendar
        .as_ref()
        .ok_or_else(|| AppError::Config("calendar listing is not configured".to_string()))?;

    let events = calendar.upcoming_events().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list upcoming events");
        e
    })?;

    Ok(Json(events))
}
