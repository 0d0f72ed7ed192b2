//! Google Calendar v3 listing over blocking HTTP.

use super::{RemoteError, RemoteResult, UpcomingEvent, UpcomingEventsSource, UpcomingStart};
use crate::config::RemoteConfig;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::warn;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct GoogleCalendarSource {
    client: Client,
    base_url: String,
    calendar_id: String,
}

impl GoogleCalendarSource {
    pub fn new(base_url: impl Into<String>, calendar_id: impl Into<String>) -> RemoteResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            calendar_id: calendar_id.into(),
        })
    }

    pub fn from_config(config: &RemoteConfig) -> RemoteResult<Self> {
        Self::new(config.base_url.as_str(), config.calendar_id.as_str())
    }

    pub fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }
}

impl UpcomingEventsSource for GoogleCalendarSource {
    fn list_upcoming(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
        max_results: u32,
    ) -> RemoteResult<Vec<UpcomingEvent>> {
        let response = self
            .client
            .get(self.events_url())
            .bearer_auth(access_token)
            .query(&upcoming_query(now, max_results))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(RemoteError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        decode_events(&body)
    }
}

/// Query parameters for the upcoming-events listing.
pub fn upcoming_query(now: DateTime<Utc>, max_results: u32) -> Vec<(&'static str, String)> {
    vec![
        ("timeMin", now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ("showDeleted", "false".to_string()),
        ("singleEvents", "true".to_string()),
        ("maxResults", max_results.to_string()),
        ("orderBy", "startTime".to_string()),
    ]
}

/// Decodes an events-list response body.
///
/// Items without a usable start are skipped with a warning.
pub fn decode_events(body: &str) -> RemoteResult<Vec<UpcomingEvent>> {
    let response: GoogleEventsResponse =
        serde_json::from_str(body).map_err(|err| RemoteError::Decode(err.to_string()))?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let Some(start) = parse_start(&item.start) else {
                warn!(
                    "event=calendar_decode module=remote status=skip reason=bad_start item={}",
                    item.id
                );
                return None;
            };
            Some(UpcomingEvent {
                id: item.id,
                summary: item.summary.filter(|summary| !summary.trim().is_empty()),
                start,
            })
        })
        .collect())
}

fn parse_start(start: &GoogleEventTime) -> Option<UpcomingStart> {
    if let Some(date_time) = &start.date_time {
        return DateTime::parse_from_rfc3339(date_time)
            .ok()
            .map(|at| UpcomingStart::At(at.with_timezone(&Utc)));
    }
    start
        .date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(UpcomingStart::AllDay)
}

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    summary: Option<String>,
    #[serde(default)]
    start: GoogleEventTime,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleEventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}
