use std::time::Duration;

use async_trait::async_trait;

use crate::errors::BookingError;
use crate::models::{BookingConfirmation, BookingRequest};

#[async_trait]
pub trait BookingClient: Send + Sync {
    /// One create-booking call. Never retried: a second call books twice.
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingError>;
}

/// Cal.com v1 bookings endpoint, authenticated with an `apiKey` query parameter.
pub struct CalComClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl CalComClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl BookingClient for CalComClient {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let resp = self
            .client
            .post(format!("{}/bookings", self.base_url))
            .query(&[("apiKey", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body["message"].as_str().map(str::to_string));
            tracing::warn!(status = status.as_u16(), message = ?message, "booking rejected");
            return Err(BookingError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = resp.json().await?;
        Ok(BookingConfirmation { payload })
    }
}
