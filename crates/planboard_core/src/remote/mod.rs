//! Read-only external calendar listing.
//!
//! # Responsibility
//! - Track whether the user has signed in to the external calendar.
//! - Fetch a short list of upcoming external entries on demand.
//!
//! # Invariants
//! - External entries are display-only and never enter the record store.
//! - Failures degrade to an empty listing; they are logged, never raised to
//!   the caller of `fetch_upcoming`.

pub mod google;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use google::GoogleCalendarSource;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Largest listing the integration ever requests.
pub const MAX_UPCOMING: u32 = 10;

#[derive(Debug)]
pub enum RemoteError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    Http(reqwest::Error),
    /// Provider answered with a non-success status.
    Status { code: u16, body: String },
    /// Response body did not match the expected shape.
    Decode(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "calendar request failed: {err}"),
            Self::Status { code, body } => write!(f, "calendar provider error ({code}): {body}"),
            Self::Decode(message) => write!(f, "calendar response invalid: {message}"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Status { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Start of an external entry: timed or all-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpcomingStart {
    At(DateTime<Utc>),
    AllDay(NaiveDate),
}

impl UpcomingStart {
    /// Instant used for ordering; all-day entries start at UTC midnight.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            Self::At(at) => *at,
            Self::AllDay(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        }
    }
}

impl Display for UpcomingStart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::At(at) => write!(f, "{}", at.to_rfc3339()),
            Self::AllDay(date) => write!(f, "{date}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: UpcomingStart,
}

impl UpcomingEvent {
    /// `summary - start` line for the listing.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.summary.as_deref().unwrap_or("(no title)"),
            self.start
        )
    }
}

/// Provider of upcoming external calendar entries.
pub trait UpcomingEventsSource {
    /// Lists at most `max_results` entries starting at or after `now`,
    /// ordered by start time.
    fn list_upcoming(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
        max_results: u32,
    ) -> RemoteResult<Vec<UpcomingEvent>>;
}

/// Sign-in state for the external calendar.
///
/// Token acquisition happens outside this crate; the session only holds the
/// resulting bearer token.
#[derive(Debug, Clone, Default)]
pub struct CalendarSession {
    access_token: Option<String>,
}

impl CalendarSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful sign-in. Blank tokens leave the session signed out.
    pub fn sign_in(&mut self, access_token: impl Into<String>) {
        let token = access_token.into();
        if token.trim().is_empty() {
            warn!("event=calendar_sign_in module=remote status=skip reason=blank_token");
            return;
        }
        self.access_token = Some(token);
        info!("event=calendar_sign_in module=remote status=ok");
    }

    pub fn sign_out(&mut self) {
        self.access_token = None;
        info!("event=calendar_sign_out module=remote status=ok");
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// Lists upcoming entries, degrading every failure to an empty list.
pub fn fetch_upcoming(
    source: &dyn UpcomingEventsSource,
    session: &CalendarSession,
    now: DateTime<Utc>,
    max_results: u32,
) -> Vec<UpcomingEvent> {
    let Some(token) = session.access_token() else {
        info!("event=calendar_list module=remote status=skip reason=signed_out");
        return Vec::new();
    };
    let max_results = max_results.clamp(1, MAX_UPCOMING);

    match source.list_upcoming(token, now, max_results) {
        Ok(mut events) => {
            events.sort_by_key(|event| event.start.instant());
            events.truncate(max_results as usize);
            info!(
                "event=calendar_list module=remote status=ok count={}",
                events.len()
            );
            events
        }
        Err(err) => {
            warn!("event=calendar_list module=remote status=error error={err}");
            Vec::new()
        }
    }
}
