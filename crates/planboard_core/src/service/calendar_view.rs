//! Calendar view adapter.
//!
//! # Responsibility
//! - Project records into time-ordered calendar entries for a visible range.
//! - Translate calendar gestures (slot select, drag, resize, external drop)
//!   into intents.
//!
//! # Invariants
//! - Every record is eligible for the calendar regardless of its status.
//! - Entries are ordered by `(start, end)`, ties keep collection order.

use crate::model::drag::{DragPayload, DropTarget};
use crate::model::intent::Intent;
use crate::model::record::{Category, Record, RecordId};
use crate::service::drag_bridge::{resolve_drop, DropPolicy};
use chrono::{DateTime, Utc};

const TIME_FORMAT: &str = "%H:%M";

/// Visible calendar window, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One rendered calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub id: RecordId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub all_day: bool,
    /// `title`, or `title: description` when a description exists.
    pub label: String,
}

impl CalendarEntry {
    fn from_record(record: &Record) -> Self {
        let label = if record.description.is_empty() {
            record.title.clone()
        } else {
            format!("{}: {}", record.title, record.description)
        };
        Self {
            id: record.id,
            title: record.title.clone(),
            start: record.start,
            end: record.end,
            color: record.color.clone(),
            all_day: record.all_day,
            label,
        }
    }

    /// `HH:MM - HH:MM`, or `All day`.
    pub fn time_range_label(&self) -> String {
        if self.all_day {
            return "All day".to_string();
        }
        format!(
            "{} - {}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// User gestures reported by the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarGesture {
    /// Empty slot range selected.
    SelectSlot {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Existing event dragged to a new start.
    EventDrop {
        id: RecordId,
        start: DateTime<Utc>,
        all_day: bool,
    },
    /// Existing event resized.
    EventResize {
        id: RecordId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Payload from another view dropped on a time slot.
    ExternalDrop {
        payload: DragPayload,
        slot_start: DateTime<Utc>,
    },
}

/// Calendar projection over the shared record collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarView {
    policy: DropPolicy,
    category: Option<Category>,
}

impl CalendarView {
    pub fn new(policy: DropPolicy) -> Self {
        Self {
            policy,
            category: None,
        }
    }

    /// Restricts projection to one category.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Entries intersecting `range`, in time order.
    pub fn project(&self, records: &[Record], range: CalendarRange) -> Vec<CalendarEntry> {
        let mut visible: Vec<&Record> = records
            .iter()
            .filter(|record| self.category.map_or(true, |c| record.category == c))
            .filter(|record| record.overlaps(range.start, range.end))
            .collect();
        // Stable sort keeps collection order for identical windows.
        visible.sort_by_key(|record| (record.start, record.end));
        visible.into_iter().map(CalendarEntry::from_record).collect()
    }

    /// Intents produced by a calendar gesture.
    pub fn intents_for(&self, gesture: CalendarGesture) -> Vec<Intent> {
        match gesture {
            CalendarGesture::SelectSlot { start, end } => {
                vec![Intent::Add(Record::from_slot(start, end))]
            }
            CalendarGesture::EventDrop { id, start, all_day } => vec![Intent::Move {
                id,
                start,
                all_day: Some(all_day),
            }],
            CalendarGesture::EventResize { id, start, end } => {
                vec![Intent::Resize { id, start, end }]
            }
            CalendarGesture::ExternalDrop {
                payload,
                slot_start,
            } => resolve_drop(
                &payload,
                DropTarget::CalendarSlot { start: slot_start },
                self.policy,
            ),
        }
    }
}
