//! Event/task record model.
//!
//! # Responsibility
//! - Define the canonical record rendered by both calendar and board views.
//! - Provide constructors for every creation path (form, slot, card, task).
//! - Validate record-level invariants before records enter a collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `end` is never earlier than `start`.
//! - Checklist item ids are unique within their parent record.
//! - `logged_time` only grows.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a record.
pub type RecordId = Uuid;

/// Identifier for a checklist item, unique within its parent record only.
pub type ChecklistItemId = Uuid;

/// Display color for planner records and board cards.
pub const DEFAULT_COLOR: &str = "#3788d8";
/// Display color for routine records created from the form.
pub const ROUTINE_COLOR: &str = "#f39c12";
/// Display color for records materialized from a dropped checklist item.
pub const TASK_COLOR: &str = "#ff7f50";

const DEFAULT_BLOCK_MINUTES: i64 = 60;

/// Length of a record created without an explicit end, and the duration
/// used when moving a record that has none.
pub fn default_block() -> Duration {
    Duration::minutes(DEFAULT_BLOCK_MINUTES)
}

/// End of a default block starting at `start`; zero-length at the end of
/// the representable range.
fn block_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start.checked_add_signed(default_block()).unwrap_or(start)
}

/// Board partition of a record.
///
/// `InCalendar` records are placed on the calendar only and do not show up
/// in any board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Todo,
    InProgress,
    Done,
    InCalendar,
}

impl Status {
    /// Board columns in display order.
    pub const BOARD_COLUMNS: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
            Self::InCalendar => "inCalendar",
        }
    }

    pub fn is_board_column(self) -> bool {
        !matches!(self, Self::InCalendar)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary classification used for display filtering only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[default]
    Planner,
    Routine,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planner => "planner",
            Self::Routine => "routine",
        }
    }

    /// Color assigned to records created from the event form.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Planner => DEFAULT_COLOR,
            Self::Routine => ROUTINE_COLOR,
        }
    }
}

/// Sub-item nested inside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Wall-clock time persisted as `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "clock_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "clock_time")]
    pub end_time: Option<NaiveTime>,
}

impl ChecklistItem {
    /// Creates an open checklist item with a generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            start_time: None,
            end_time: None,
        }
    }
}

/// Form input for explicit record creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub category: Category,
}

/// Canonical event/task record.
///
/// Field names on the wire follow the persisted blob layout (`desc`,
/// `loggedTime`, `allDay`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub status: Status,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Accumulated minutes.
    #[serde(default)]
    pub logged_time: u32,
    #[serde(default)]
    pub all_day: bool,
}

impl Record {
    /// Creates a record with a generated id and empty optional parts.
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Status,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            color: category.default_color().to_string(),
            description: String::new(),
            status,
            category,
            checklist: Vec::new(),
            logged_time: 0,
            all_day: false,
        }
    }

    /// Record submitted through the event form. Lands in the `todo` column.
    pub fn from_form(draft: RecordDraft) -> Self {
        let mut record = Self::new(
            draft.title,
            draft.start,
            draft.end,
            Status::Todo,
            draft.category,
        );
        record.description = draft.description;
        record
    }

    /// Record created by selecting a calendar slot.
    pub fn from_slot(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let mut record = Self::new(
            "New Event",
            start,
            end,
            Status::InCalendar,
            Category::Planner,
        );
        record.description = "Created via selection".to_string();
        record
    }

    /// Card added to a board column, blocked out for one hour from `now`.
    pub fn card(column: Status, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(title, now, block_end(now), column, Category::Planner)
    }

    /// Record materialized from a checklist item dropped on the calendar.
    pub fn from_task(text: impl Into<String>, start: DateTime<Utc>) -> Self {
        let mut record = Self::new(
            text,
            start,
            block_end(start),
            Status::InCalendar,
            Category::Planner,
        );
        record.color = TASK_COLOR.to_string();
        record
    }

    /// Fixed record used when no valid persisted collection exists.
    pub fn seed(now: DateTime<Utc>) -> Self {
        let mut record = Self::new(
            "Test Meeting",
            now,
            block_end(now),
            Status::Todo,
            Category::Planner,
        );
        record.description = "Discuss project updates".to_string();
        record
    }

    /// Length of the record's time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns whether the record intersects the half-open window `[from, to)`.
    ///
    /// Zero-length records count when their instant falls inside the window.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        if self.start == self.end {
            return self.start >= from && self.start < to;
        }
        self.start < to && self.end > from
    }

    pub fn checklist_item(&self, item_id: ChecklistItemId) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.id == item_id)
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `NilId` when the id is the nil UUID.
    /// - `InvalidTimeWindow` when `end < start`.
    /// - `DuplicateChecklistItem` when two checklist items share an id.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        if self.end < self.start {
            return Err(RecordValidationError::InvalidTimeWindow {
                start: self.start,
                end: self.end,
            });
        }
        let mut seen = HashSet::with_capacity(self.checklist.len());
        for item in &self.checklist {
            if !seen.insert(item.id) {
                return Err(RecordValidationError::DuplicateChecklistItem(item.id));
            }
        }
        Ok(())
    }
}

/// Record invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NilId,
    InvalidTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    DuplicateChecklistItem(ChecklistItemId),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::InvalidTimeWindow { start, end } => write!(
                f,
                "record end ({}) must not be earlier than start ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
            Self::DuplicateChecklistItem(id) => write!(f, "duplicate checklist item id: {id}"),
        }
    }
}

impl Error for RecordValidationError {}

/// Serde adapter for optional `HH:MM` wall-clock values.
///
/// Empty strings decode to `None`; `HH:MM:SS` input is accepted.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(text, FORMAT_WITH_SECONDS))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
