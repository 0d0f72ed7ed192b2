//! Mutation intents produced by views.
//!
//! An intent describes a requested change to the record collection. Views
//! never mutate records directly; they emit intents and the store applies
//! them through the reconciliation functions.

use crate::model::record::{
    Category, ChecklistItem, ChecklistItemId, Record, RecordId, Status,
};
use chrono::{DateTime, NaiveTime, Utc};

/// Requested mutation of the record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Append a new record.
    Add(Record),
    /// Move a record to a new start, keeping its duration.
    Move {
        id: RecordId,
        start: DateTime<Utc>,
        all_day: Option<bool>,
    },
    /// Set both ends of a record's window.
    Resize {
        id: RecordId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Reassign a record to another board column.
    SetStatus { id: RecordId, status: Status },
    /// Reorder a record inside its current column.
    Reorder {
        id: RecordId,
        column: Status,
        to_index: usize,
    },
    /// Merge a partial update into a record.
    Edit { id: RecordId, patch: RecordPatch },
    /// Remove a record. Missing ids are ignored.
    Delete { id: RecordId },
    ChecklistAdd { id: RecordId, item: ChecklistItem },
    ChecklistToggle {
        id: RecordId,
        item_id: ChecklistItemId,
    },
    ChecklistSetTimes {
        id: RecordId,
        item_id: ChecklistItemId,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    },
    ChecklistRemove {
        id: RecordId,
        item_id: ChecklistItemId,
    },
    /// Add user-entered minutes to a record's logged time.
    LogTime { id: RecordId, input: String },
}

impl Intent {
    /// Stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Move { .. } => "move",
            Self::Resize { .. } => "resize",
            Self::SetStatus { .. } => "set_status",
            Self::Reorder { .. } => "reorder",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::ChecklistAdd { .. } => "checklist_add",
            Self::ChecklistToggle { .. } => "checklist_toggle",
            Self::ChecklistSetTimes { .. } => "checklist_set_times",
            Self::ChecklistRemove { .. } => "checklist_remove",
            Self::LogTime { .. } => "log_time",
        }
    }

    /// Id of the record this intent targets.
    pub fn target(&self) -> RecordId {
        match self {
            Self::Add(record) => record.id,
            Self::Move { id, .. }
            | Self::Resize { id, .. }
            | Self::SetStatus { id, .. }
            | Self::Reorder { id, .. }
            | Self::Edit { id, .. }
            | Self::Delete { id }
            | Self::ChecklistAdd { id, .. }
            | Self::ChecklistToggle { id, .. }
            | Self::ChecklistSetTimes { id, .. }
            | Self::ChecklistRemove { id, .. }
            | Self::LogTime { id, .. } => *id,
        }
    }
}

/// Partial record update. `None` fields are left untouched.
///
/// Ids cannot be patched. Logged time only grows through `Intent::LogTime`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub all_day: Option<bool>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `record` with every present field of this patch applied.
    pub fn merge_into(&self, record: &Record) -> Record {
        let mut merged = record.clone();
        if let Some(title) = &self.title {
            merged.title.clone_from(title);
        }
        if let Some(start) = self.start {
            merged.start = start;
        }
        if let Some(end) = self.end {
            merged.end = end;
        }
        if let Some(color) = &self.color {
            merged.color.clone_from(color);
        }
        if let Some(description) = &self.description {
            merged.description.clone_from(description);
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(checklist) = &self.checklist {
            merged.checklist.clone_from(checklist);
        }
        if let Some(all_day) = self.all_day {
            merged.all_day = all_day;
        }
        merged
    }
}
