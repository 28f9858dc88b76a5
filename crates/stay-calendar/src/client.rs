//! Hosted calendar API client.
//!
//! Synchronous wrapper over the Google Calendar v3 events surface. Like the
//! spreadsheet client, one instance is built at process start and reused.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::event::{EventContent, EventSink};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Client bound to a single calendar.
pub struct CalendarClient {
    http: reqwest::blocking::Client,
    access_token: String,
    calendar_id: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct InsertedEvent {
    #[serde(default)]
    id: String,
}

impl CalendarClient {
    pub fn new(access_token: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            access_token: access_token.into(),
            calendar_id: calendar_id.into(),
            base_url: CALENDAR_API_BASE.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    fn events_url(&self, suffix: &str) -> String {
        format!(
            "{}/calendars/{}/events{}",
            self.base_url,
            urlencoding::encode(&self.calendar_id),
            suffix,
        )
    }

    fn check(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let code = status.as_u16();
        let message = api_error_message(response);
        if code == 401 || code == 403 {
            Err(CalendarError::Permission {
                status: code,
                message,
            })
        } else {
            Err(CalendarError::Api {
                status: code,
                message,
            })
        }
    }
}

fn api_error_message(response: reqwest::blocking::Response) -> String {
    let body = response.text().unwrap_or_default();
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body)
}

impl EventSink for CalendarClient {
    fn create_event(&self, event: &EventContent) -> Result<String> {
        let date = event.date.format("%Y-%m-%d").to_string();
        debug!(summary = %event.summary, %date, "creating calendar event");
        let response = self
            .http
            .post(self.events_url(""))
            .header("Authorization", self.auth_header())
            .json(&json!({
                "summary": event.summary,
                "description": event.description,
                "start": { "date": date },
                "end": { "date": date },
            }))
            .send()?;
        let inserted: InsertedEvent = self
            .check(response)?
            .json()
            .map_err(|error| CalendarError::Decode(error.to_string()))?;
        Ok(inserted.id)
    }

    fn delete_event(&self, event_id: &str) -> Result<()> {
        let event_id = event_id.trim();
        if event_id.is_empty() || event_id == "nan" {
            return Err(CalendarError::MissingEventId);
        }
        debug!(%event_id, "deleting calendar event");
        let response = self
            .http
            .delete(self.events_url(&format!("/{}", urlencoding::encode(event_id))))
            .header("Authorization", self.auth_header())
            .send()?;
        self.check(response)?;
        Ok(())
    }
}
