use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{BookingError, FormError};

/// Every booking is a one-hour slot.
pub const BOOKING_DURATION_MINUTES: i64 = 60;

pub const DEFAULT_TIMEZONE: &str = "Asia/Karachi";
pub const DEFAULT_GMT_OFFSET: &str = "+05:00";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventType {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MeetingLocation {
    #[default]
    #[serde(rename = "inPerson")]
    InPerson,
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "phone")]
    Phone,
}

impl MeetingLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingLocation::InPerson => "inPerson",
            MeetingLocation::Online => "online",
            MeetingLocation::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "inperson" => Some(MeetingLocation::InPerson),
            "online" => Some(MeetingLocation::Online),
            "phone" => Some(MeetingLocation::Phone),
            _ => None,
        }
    }
}

/// Fields the booking form collects. Everything is optional until submission;
/// blank strings count as not provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub gmt_offset: Option<String>,
    pub timezone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl BookingForm {
    /// Overwrites fields with every non-blank value from `update`.
    pub fn merge(&mut self, update: BookingForm) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                *slot = Some(v.trim().to_string());
            }
        }
        take(&mut self.name, update.name);
        take(&mut self.email, update.email);
        take(&mut self.date, update.date);
        take(&mut self.time, update.time);
        take(&mut self.gmt_offset, update.gmt_offset);
        take(&mut self.timezone, update.timezone);
        take(&mut self.location, update.location);
        take(&mut self.title, update.title);
        take(&mut self.description, update.description);
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("date", &self.date),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, v)| filled(v).is_none())
        .map(|(k, _)| k)
        .collect()
    }

    pub fn parsed_date(&self) -> Result<NaiveDate, FormError> {
        let raw = filled(&self.date).ok_or(FormError::MissingFields(vec!["date"]))?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FormError::InvalidDate(raw.to_string()))
    }

    pub fn parsed_time(&self) -> Result<NaiveTime, FormError> {
        let raw = filled(&self.time).ok_or(FormError::MissingFields(vec!["time"]))?;
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(|_| FormError::InvalidTime(raw.to_string()))
    }

    pub fn gmt_offset(&self) -> &str {
        filled(&self.gmt_offset).unwrap_or(DEFAULT_GMT_OFFSET)
    }

    pub fn timezone(&self) -> &str {
        filled(&self.timezone).unwrap_or(DEFAULT_TIMEZONE)
    }

    pub fn title<'a>(&'a self, default: &'a str) -> &'a str {
        filled(&self.title).unwrap_or(default)
    }

    pub fn description(&self) -> &str {
        filled(&self.description).unwrap_or("")
    }

    pub fn meeting_location(&self) -> Result<MeetingLocation, FormError> {
        match filled(&self.location) {
            None => Ok(MeetingLocation::default()),
            Some(raw) => {
                MeetingLocation::parse(raw).ok_or_else(|| FormError::InvalidLocation(raw.to_string()))
            }
        }
    }

    /// Start timestamp in the `YYYY-MM-DDTHH:MM:SS+HH:MM` form the booking API expects.
    pub fn start_iso(&self) -> Result<String, FormError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }
        let date = self.parsed_date()?;
        let time = self.parsed_time()?;
        let offset = self.gmt_offset();
        let start = format!("{}T{}{}", date.format("%Y-%m-%d"), time.format("%H:%M:%S"), offset);
        DateTime::parse_from_rfc3339(&start).map_err(|_| FormError::InvalidOffset(offset.to_string()))?;
        Ok(start)
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<FixedOffset>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, false))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub option_value: String,
    pub value: MeetingLocation,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InviteeResponses {
    pub name: String,
    pub email: String,
    pub location: LocationResponse,
}

/// Outbound create-booking payload. Built right before the call and dropped after.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_type_id: u64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub start: DateTime<FixedOffset>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub end: DateTime<FixedOffset>,
    pub responses: InviteeResponses,
    pub metadata: serde_json::Value,
    pub time_zone: String,
    pub language: String,
    pub title: String,
    pub description: String,
    pub status: String,
}

impl BookingRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_id: u64,
        name: &str,
        email: &str,
        start_iso: &str,
        location: MeetingLocation,
        title: &str,
        description: &str,
        timezone: &str,
    ) -> Result<Self, BookingError> {
        let start = DateTime::parse_from_rfc3339(start_iso).map_err(|source| {
            BookingError::InvalidStart {
                value: start_iso.to_string(),
                source,
            }
        })?;
        let end = start + Duration::minutes(BOOKING_DURATION_MINUTES);

        Ok(Self {
            event_type_id: event_id,
            start,
            end,
            responses: InviteeResponses {
                name: name.to_string(),
                email: email.to_string(),
                location: LocationResponse {
                    option_value: String::new(),
                    value: location,
                },
            },
            metadata: serde_json::json!({}),
            time_zone: timezone.to_string(),
            language: "en".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: "PENDING".to_string(),
        })
    }

    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// Provider payload for a created booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BookingConfirmation {
    pub payload: serde_json::Value,
}

impl BookingConfirmation {
    pub fn uid(&self) -> Option<String> {
        match (&self.payload["uid"], &self.payload["id"]) {
            (serde_json::Value::String(uid), _) => Some(uid.clone()),
            (_, serde_json::Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> BookingForm {
        BookingForm {
            name: Some("Ana".to_string()),
            email: Some("a@x.com".to_string()),
            date: Some("2025-06-01".to_string()),
            time: Some("10:00:00".to_string()),
            timezone: Some("Asia/Karachi".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_is_one_hour_after_start() {
        for start in [
            "2025-06-01T10:00:00+05:00",
            "2025-12-31T23:30:00-08:00",
            "2024-02-29T00:00:00+00:00",
        ] {
            let req = BookingRequest::new(1, "Ana", "a@x.com", start, MeetingLocation::Online, "Meeting", "", "UTC")
                .unwrap();
            assert_eq!(req.end - req.start, Duration::minutes(60));
        }
    }

    #[test]
    fn test_end_crosses_midnight() {
        let req = BookingRequest::new(
            1,
            "Ana",
            "a@x.com",
            "2025-12-31T23:30:00-08:00",
            MeetingLocation::Phone,
            "Meeting",
            "",
            "America/Los_Angeles",
        )
        .unwrap();
        assert_eq!(req.end_iso(), "2026-01-01T00:30:00-08:00");
    }

    #[test]
    fn test_invalid_start_is_an_error() {
        let err = BookingRequest::new(1, "Ana", "a@x.com", "tomorrow at 3", MeetingLocation::InPerson, "Meeting", "", "UTC")
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidStart { .. }));
    }

    #[test]
    fn test_payload_shape() {
        let req = BookingRequest::new(
            1854515,
            "Ana",
            "a@x.com",
            "2025-06-01T10:00:00+05:00",
            MeetingLocation::InPerson,
            "Meeting",
            "Intro call",
            "Asia/Karachi",
        )
        .unwrap();
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["eventTypeId"], 1854515);
        assert_eq!(json["start"], "2025-06-01T10:00:00+05:00");
        assert_eq!(json["end"], "2025-06-01T11:00:00+05:00");
        assert_eq!(json["responses"]["name"], "Ana");
        assert_eq!(json["responses"]["email"], "a@x.com");
        assert_eq!(json["responses"]["location"]["optionValue"], "");
        assert_eq!(json["responses"]["location"]["value"], "inPerson");
        assert_eq!(json["metadata"], serde_json::json!({}));
        assert_eq!(json["timeZone"], "Asia/Karachi");
        assert_eq!(json["language"], "en");
        assert_eq!(json["title"], "Meeting");
        assert_eq!(json["description"], "Intro call");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut form = complete_form();
        assert!(form.missing_required().is_empty());

        form.email = Some("   ".to_string());
        form.time = None;
        assert_eq!(form.missing_required(), vec!["email", "time"]);
    }

    #[test]
    fn test_start_iso_uses_default_offset() {
        let form = complete_form();
        assert_eq!(form.start_iso().unwrap(), "2025-06-01T10:00:00+05:00");
    }

    #[test]
    fn test_start_iso_accepts_short_time_and_custom_offset() {
        let mut form = complete_form();
        form.time = Some("14:30".to_string());
        form.gmt_offset = Some("-03:00".to_string());
        assert_eq!(form.start_iso().unwrap(), "2025-06-01T14:30:00-03:00");
    }

    #[test]
    fn test_start_iso_rejects_bad_input() {
        let mut form = complete_form();
        form.date = Some("01/06/2025".to_string());
        assert!(matches!(form.start_iso(), Err(FormError::InvalidDate(_))));

        let mut form = complete_form();
        form.time = Some("ten".to_string());
        assert!(matches!(form.start_iso(), Err(FormError::InvalidTime(_))));

        let mut form = complete_form();
        form.gmt_offset = Some("PKT".to_string());
        assert!(matches!(form.start_iso(), Err(FormError::InvalidOffset(_))));
    }

    #[test]
    fn test_merge_keeps_existing_values_for_blank_updates() {
        let mut form = complete_form();
        form.merge(BookingForm {
            name: Some(" ".to_string()),
            location: Some("online".to_string()),
            ..Default::default()
        });
        assert_eq!(form.name.as_deref(), Some("Ana"));
        assert_eq!(form.location.as_deref(), Some("online"));
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!(MeetingLocation::parse("In Person"), Some(MeetingLocation::InPerson));
        assert_eq!(MeetingLocation::parse("inPerson"), Some(MeetingLocation::InPerson));
        assert_eq!(MeetingLocation::parse("ONLINE"), Some(MeetingLocation::Online));
        assert_eq!(MeetingLocation::parse("carrier pigeon"), None);

        let form = BookingForm::default();
        assert_eq!(form.meeting_location().unwrap(), MeetingLocation::InPerson);
    }

    #[test]
    fn test_confirmation_uid() {
        let c = BookingConfirmation {
            payload: serde_json::json!({"uid": "abc"}),
        };
        assert_eq!(c.uid().as_deref(), Some("abc"));
        let c = BookingConfirmation {
            payload: serde_json::json!({"id": 42}),
        };
        assert_eq!(c.uid().as_deref(), Some("42"));
    }
}
