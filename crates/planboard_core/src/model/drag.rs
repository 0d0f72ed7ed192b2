//! Drag payloads shared by the calendar and the board.
//!
//! A single drop target may receive either a checklist item or a whole card;
//! the payload variant decides whether a drop materializes a new record or
//! moves an existing one.

use crate::model::record::{ChecklistItemId, RecordId, Status};
use chrono::{DateTime, Utc};

/// Checklist item dragged out of its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDrag {
    /// Record owning the checklist item.
    pub source_record: RecordId,
    pub item_id: ChecklistItemId,
    pub text: String,
}

/// Whole record dragged from the board or within the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDrag {
    pub record_id: RecordId,
    /// Column the card was in when the drag started.
    pub column: Status,
    /// Position of the card inside `column`.
    pub index: usize,
}

/// What is being dragged: a checklist item or a whole card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    Task(TaskDrag),
    Card(CardDrag),
}

/// Place a payload can be dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Calendar time slot starting at `start`.
    CalendarSlot { start: DateTime<Utc> },
    /// Empty area of a board column.
    BoardColumn { status: Status },
    /// Position of an existing card inside a column.
    BoardCard { status: Status, index: usize },
}
