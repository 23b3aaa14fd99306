use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::Brand;
use crate::services::ai::{self, LlmProvider};
use crate::services::booking::{BookingClient, CalComClient};
use crate::services::calendar::GoogleCalendar;
use crate::services::sessions::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub brand: Brand,
    pub llm: Box<dyn LlmProvider>,
    pub booking: Box<dyn BookingClient>,
    pub calendar: Option<GoogleCalendar>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let brand = Brand::builtin(&config.brand).ok_or_else(|| {
            AppError::Config(format!(
                "unknown BRAND {:?} (expected engageai or aicognitech)",
                config.brand
            ))
        })?;
        tracing::info!(brand = %brand.name, "loaded brand profile");

        let llm = ai::from_config(&config)?;
        let booking = CalComClient::new(
            config.calcom_base_url.clone(),
            config.calcom_api_key.clone(),
            config.http_timeout(),
        )?;
        let calendar = GoogleCalendar::new(
            config.google_calendar_base_url.clone(),
            config.google_token_path.clone(),
            config.calendar_page_size,
            config.http_timeout(),
        )?;
        let sessions = SessionStore::new(config.session_ttl(), brand.welcome.clone());

        Ok(Self {
            config,
            brand,
            llm,
            booking: Box::new(booking),
            calendar: Some(calendar),
            sessions,
        })
    }

    /// Event type every booking is made against; `CALCOM_EVENT_TYPE_ID` wins
    /// over the brand default.
    pub fn event_type_id(&self) -> u64 {
        self.config
            .calcom_event_type_id
            .unwrap_or(self.brand.event_type.id)
    }
}
