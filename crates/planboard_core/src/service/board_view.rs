//! Kanban board view adapter.
//!
//! # Responsibility
//! - Partition records into the fixed board columns.
//! - Translate card, checklist and time-log gestures into intents.
//!
//! # Invariants
//! - Columns are always `todo`, `inProgress`, `done`, in that order.
//! - Cards inside a column keep collection order.
//! - `inCalendar` records are not shown on the board.

use crate::model::drag::{CardDrag, DragPayload, DropTarget, TaskDrag};
use crate::model::intent::Intent;
use crate::model::record::{ChecklistItem, ChecklistItemId, Record, RecordId, Status};
use crate::service::drag_bridge::{resolve_drop, DropPolicy};
use chrono::{DateTime, NaiveTime, Utc};

/// One board column and its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub cards: Vec<&'a Record>,
}

impl BoardColumn<'_> {
    /// Drag payload for the card at `index`.
    pub fn card_drag(&self, index: usize) -> Option<CardDrag> {
        self.cards.get(index).map(|card| CardDrag {
            record_id: card.id,
            column: self.status,
            index,
        })
    }
}

/// User gestures reported by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardGesture {
    AddCard {
        column: Status,
        title: String,
        now: DateTime<Utc>,
    },
    /// Dragged card hovers over another card's position.
    HoverCard {
        drag: CardDrag,
        column: Status,
        index: usize,
    },
    /// Dragged card released over a column.
    DropOnColumn { drag: CardDrag, column: Status },
    AddChecklistItem { card: RecordId, text: String },
    ToggleChecklistItem {
        card: RecordId,
        item: ChecklistItemId,
    },
    SetChecklistTimes {
        card: RecordId,
        item: ChecklistItemId,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    },
    LogTime { card: RecordId, input: String },
}

/// Kanban projection over the shared record collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    /// Records partitioned into board columns.
    pub fn project<'a>(&self, records: &'a [Record]) -> Vec<BoardColumn<'a>> {
        Status::BOARD_COLUMNS
            .into_iter()
            .map(|status| BoardColumn {
                status,
                cards: records
                    .iter()
                    .filter(|record| record.status == status)
                    .collect(),
            })
            .collect()
    }

    /// Drag payload for a checklist item of `card`.
    pub fn task_drag(&self, card: &Record, item_id: ChecklistItemId) -> Option<DragPayload> {
        card.checklist_item(item_id).map(|item| {
            DragPayload::Task(TaskDrag {
                source_record: card.id,
                item_id: item.id,
                text: item.text.clone(),
            })
        })
    }

    /// Intents produced by a board gesture.
    ///
    /// Blank card titles and blank checklist text produce nothing.
    pub fn intents_for(&self, gesture: BoardGesture) -> Vec<Intent> {
        match gesture {
            BoardGesture::AddCard { column, title, now } => {
                let title = title.trim();
                if title.is_empty() || !column.is_board_column() {
                    return Vec::new();
                }
                vec![Intent::Add(Record::card(column, title, now))]
            }
            BoardGesture::HoverCard {
                drag,
                column,
                index,
            } => resolve_drop(
                &DragPayload::Card(drag),
                DropTarget::BoardCard {
                    status: column,
                    index,
                },
                DropPolicy::default(),
            ),
            BoardGesture::DropOnColumn { drag, column } => resolve_drop(
                &DragPayload::Card(drag),
                DropTarget::BoardColumn { status: column },
                DropPolicy::default(),
            ),
            BoardGesture::AddChecklistItem { card, text } => {
                if text.trim().is_empty() {
                    return Vec::new();
                }
                vec![Intent::ChecklistAdd {
                    id: card,
                    item: ChecklistItem::new(text),
                }]
            }
            BoardGesture::ToggleChecklistItem { card, item } => vec![Intent::ChecklistToggle {
                id: card,
                item_id: item,
            }],
            BoardGesture::SetChecklistTimes {
                card,
                item,
                start_time,
                end_time,
            } => vec![Intent::ChecklistSetTimes {
                id: card,
                item_id: item,
                start_time,
                end_time,
            }],
            BoardGesture::LogTime { card, input } => vec![Intent::LogTime { id: card, input }],
        }
    }
}
