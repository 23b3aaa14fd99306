use std::path::PathBuf;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::errors::CalendarError;
use crate::models::{CachedToken, CalendarEvent};

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Read-only listing of upcoming events on the authenticated primary calendar.
pub struct GoogleCalendar {
    base_url: String,
    token_path: PathBuf,
    page_size: u32,
    client: reqwest::Client,
}

impl GoogleCalendar {
    pub fn new(
        base_url: String,
        token_path: impl Into<PathBuf>,
        page_size: u32,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_path: token_path.into(),
            page_size,
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    async fn load_token(&self) -> Result<CachedToken, CalendarError> {
        let raw = match tokio::fs::read_to_string(&self.token_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CalendarError::MissingToken(self.token_path.display().to_string()));
            }
            Err(e) => return Err(CalendarError::TokenCache(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| CalendarError::TokenCache(e.to_string()))
    }

    async fn store_token(&self, token: &CachedToken) -> Result<(), CalendarError> {
        let raw =
            serde_json::to_string_pretty(token).map_err(|e| CalendarError::TokenCache(e.to_string()))?;
        tokio::fs::write(&self.token_path, raw)
            .await
            .map_err(|e| CalendarError::TokenCache(e.to_string()))
    }

    async fn refresh(&self, mut token: CachedToken) -> Result<CachedToken, CalendarError> {
        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or(CalendarError::NotRefreshable)?;

        let mut form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token),
        ];
        if let Some(id) = &token.client_id {
            form.push(("client_id", id.clone()));
        }
        if let Some(secret) = &token.client_secret {
            form.push(("client_secret", secret.clone()));
        }

        let resp = self.client.post(&token.token_uri).form(&form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let refreshed: RefreshResponse = resp.json().await?;
        token.token = Some(refreshed.access_token);
        token.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        self.store_token(&token).await?;
        tracing::info!(path = %self.token_path.display(), "refreshed calendar access token");
        Ok(token)
    }

    /// Cached access token, refreshed first when it has expired.
    pub async fn access_token(&self) -> Result<String, CalendarError> {
        let mut token = self.load_token().await?;
        if !token.is_valid(Utc::now()) {
            token = self.refresh(token).await?;
        }
        token.token.ok_or(CalendarError::NotRefreshable)
    }

    pub async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>, CalendarError> {
        let access_token = self.access_token().await?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let resp = self
            .client
            .get(format!("{}/calendars/primary/events", self.base_url))
            .bearer_auth(access_token)
            .query(&[
                ("timeMin", now),
                ("maxResults", self.page_size.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = resp.json().await?;
        let events = data["items"]
            .as_array()
            .map(|items| items.iter().map(parse_event).collect())
            .unwrap_or_default();
        Ok(events)
    }
}

fn parse_event(item: &serde_json::Value) -> CalendarEvent {
    let start = item["start"]["dateTime"]
        .as_str()
        .or_else(|| item["start"]["date"].as_str())
        .unwrap_or_default();
    CalendarEvent {
        start: start.to_string(),
        summary: item["summary"].as_str().unwrap_or("(no title)").to_string(),
    }
}
