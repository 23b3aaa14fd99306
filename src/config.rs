use std::env;
use std::time::Duration;

use crate::errors::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub admin_token: String,
    pub brand: String,
    pub llm_provider: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub calcom_api_key: String,
    pub calcom_base_url: String,
    pub calcom_event_type_id: Option<u64>,
    pub http_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub google_token_path: String,
    pub google_calendar_base_url: String,
    pub calendar_page_size: u32,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parsed("PORT").unwrap_or(3000),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            brand: env::var("BRAND").unwrap_or_else(|_| "engageai".to_string()),
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            calcom_api_key: env::var("CALCOM_API_KEY").unwrap_or_default(),
            calcom_base_url: env::var("CALCOM_BASE_URL")
                .unwrap_or_else(|_| "https://api.cal.com/v1".to_string()),
            calcom_event_type_id: parsed("CALCOM_EVENT_TYPE_ID"),
            http_timeout_secs: parsed("HTTP_TIMEOUT_SECS").unwrap_or(10),
            session_ttl_minutes: parsed("SESSION_TTL_MINUTES").unwrap_or(30),
            google_token_path: env::var("GOOGLE_TOKEN_PATH")
                .unwrap_or_else(|_| "token.json".to_string()),
            google_calendar_base_url: env::var("GOOGLE_CALENDAR_BASE_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/calendar/v3".to_string()),
            calendar_page_size: parsed("CALENDAR_PAGE_SIZE").unwrap_or(10),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes.max(1))
    }

    /// Checks the credentials the chat surfaces cannot run without.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.calcom_api_key.trim().is_empty() {
            return Err(AppError::Config("CALCOM_API_KEY must be set".to_string()));
        }
        match self.llm_provider.as_str() {
            "gemini" if self.gemini_api_key.trim().is_empty() => Err(AppError::Config(
                "GEMINI_API_KEY must be set when LLM_PROVIDER=gemini".to_string(),
            )),
            "groq" if self.groq_api_key.trim().is_empty() => Err(AppError::Config(
                "GROQ_API_KEY must be set when LLM_PROVIDER=groq".to_string(),
            )),
            "gemini" | "groq" | "ollama" => Ok(()),
            other => Err(AppError::Config(format!(
                "unknown LLM_PROVIDER {other:?} (expected gemini, groq or ollama)"
            ))),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        admin_token: "test-token".to_string(),
        brand: "engageai".to_string(),
        llm_provider: "gemini".to_string(),
        gemini_api_key: "gemini-key".to_string(),
        gemini_model: "gemini-2.0-flash".to_string(),
        groq_api_key: String::new(),
        groq_model: "llama-3.3-70b-versatile".to_string(),
        ollama_url: "http://localhost:11434".to_string(),
        ollama_model: "llama3.2".to_string(),
        calcom_api_key: "cal-key".to_string(),
        calcom_base_url: "https://api.cal.com/v1".to_string(),
        calcom_event_type_id: None,
        http_timeout_secs: 10,
        session_ttl_minutes: 30,
        google_token_path: "token.json".to_string(),
        google_calendar_base_url: "https://www.googleapis.com/calendar/v3".to_string(),
        calendar_page_size: 10,
    }
}
