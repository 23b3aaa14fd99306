use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("the booking form is not open for this session")]
    FormNotOpen,

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Calendar(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::FormNotOpen => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("invalid start timestamp {value:?}: {source}")]
    InvalidStart {
        value: String,
        source: chrono::ParseError,
    },

    #[error("booking request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("booking rejected ({status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },
}

impl BookingError {
    /// Provider-supplied explanation, when the provider gave one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            BookingError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("could not read the date {0:?}, please use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("could not read the time {0:?}, please use HH:MM or HH:MM:SS")]
    InvalidTime(String),

    #[error("could not read the GMT offset {0:?}, please use a form like +05:00")]
    InvalidOffset(String),

    #[error("unknown location {0:?}, choose inPerson, online or phone")]
    InvalidLocation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("no cached calendar token at {0}; complete the OAuth consent flow first")]
    MissingToken(String),

    #[error("calendar token cache is unreadable: {0}")]
    TokenCache(String),

    #[error("calendar token expired and has no refresh token")]
    NotRefreshable,

    #[error("calendar request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("calendar API error ({status}): {body}")]
    Api { status: u16, body: String },
}
