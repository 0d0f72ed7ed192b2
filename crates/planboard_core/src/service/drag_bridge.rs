//! Drop resolution shared by calendar slots and board columns.
//!
//! # Responsibility
//! - Decide, per payload variant and drop target, which intents a drop
//!   produces.
//!
//! # Invariants
//! - A task drop on the calendar materializes a new record; it never reuses
//!   the checklist item's identity.
//! - The source checklist item is kept unless the policy opts into removal.
//! - Board targets accept card drags only.
//! - A board card dropped on the calendar moves there and leaves the board.

use crate::model::drag::{CardDrag, DragPayload, DropTarget, TaskDrag};
use crate::model::intent::Intent;
use crate::model::record::{Record, Status};
use serde::Deserialize;

/// Configurable drop behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DropPolicy {
    /// Remove a checklist item from its card once it is dropped on the
    /// calendar.
    pub remove_task_on_calendar_drop: bool,
}

/// Returns the intents a drop produces, in application order.
pub fn resolve_drop(payload: &DragPayload, target: DropTarget, policy: DropPolicy) -> Vec<Intent> {
    match payload {
        DragPayload::Task(task) => resolve_task_drop(task, target, policy),
        DragPayload::Card(card) => resolve_card_drop(*card, target),
    }
}

fn resolve_task_drop(task: &TaskDrag, target: DropTarget, policy: DropPolicy) -> Vec<Intent> {
    let DropTarget::CalendarSlot { start } = target else {
        return Vec::new();
    };

    let mut intents = vec![Intent::Add(Record::from_task(task.text.clone(), start))];
    if policy.remove_task_on_calendar_drop {
        intents.push(Intent::ChecklistRemove {
            id: task.source_record,
            item_id: task.item_id,
        });
    }
    intents
}

fn resolve_card_drop(card: CardDrag, target: DropTarget) -> Vec<Intent> {
    match target {
        DropTarget::CalendarSlot { start } => {
            let mut intents = vec![Intent::Move {
                id: card.record_id,
                start,
                all_day: None,
            }];
            // A card leaving the board is placed on the calendar only.
            if card.column.is_board_column() {
                intents.push(Intent::SetStatus {
                    id: card.record_id,
                    status: Status::InCalendar,
                });
            }
            intents
        }
        DropTarget::BoardColumn { status } if status != card.column => vec![Intent::SetStatus {
            id: card.record_id,
            status,
        }],
        DropTarget::BoardCard { status, index } if status == card.column && index != card.index => {
            vec![Intent::Reorder {
                id: card.record_id,
                column: status,
                to_index: index,
            }]
        }
        DropTarget::BoardColumn { .. } | DropTarget::BoardCard { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_drop, DropPolicy};
    use crate::model::drag::{CardDrag, DragPayload, DropTarget};
    use crate::model::intent::Intent;
    use crate::model::record::Status;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn card_hover_over_own_position_is_ignored() {
        let payload = DragPayload::Card(CardDrag {
            record_id: Uuid::new_v4(),
            column: Status::Todo,
            index: 2,
        });
        let target = DropTarget::BoardCard {
            status: Status::Todo,
            index: 2,
        };
        assert!(resolve_drop(&payload, target, DropPolicy::default()).is_empty());
    }

    #[test]
    fn card_hover_over_other_column_does_not_reorder() {
        let payload = DragPayload::Card(CardDrag {
            record_id: Uuid::new_v4(),
            column: Status::Todo,
            index: 0,
        });
        let target = DropTarget::BoardCard {
            status: Status::Done,
            index: 1,
        };
        assert!(resolve_drop(&payload, target, DropPolicy::default()).is_empty());
    }

    #[test]
    fn board_card_dropped_on_calendar_moves_and_leaves_board() {
        let id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap();
        let payload = DragPayload::Card(CardDrag {
            record_id: id,
            column: Status::InProgress,
            index: 0,
        });

        let intents = resolve_drop(
            &payload,
            DropTarget::CalendarSlot { start },
            DropPolicy::default(),
        );
        assert_eq!(
            intents,
            vec![
                Intent::Move {
                    id,
                    start,
                    all_day: None,
                },
                Intent::SetStatus {
                    id,
                    status: Status::InCalendar,
                },
            ]
        );
    }

    #[test]
    fn calendar_card_dropped_on_calendar_only_moves() {
        let id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap();
        let payload = DragPayload::Card(CardDrag {
            record_id: id,
            column: Status::InCalendar,
            index: 0,
        });

        let intents = resolve_drop(
            &payload,
            DropTarget::CalendarSlot { start },
            DropPolicy::default(),
        );
        assert_eq!(intents.len(), 1);
        assert!(matches!(intents[0], Intent::Move { .. }));
    }

    #[test]
    fn card_drop_on_new_column_reassigns_status() {
        let id = Uuid::new_v4();
        let payload = DragPayload::Card(CardDrag {
            record_id: id,
            column: Status::Todo,
            index: 0,
        });
        let intents = resolve_drop(
            &payload,
            DropTarget::BoardColumn {
                status: Status::InProgress,
            },
            DropPolicy::default(),
        );
        assert_eq!(
            intents,
            vec![Intent::SetStatus {
                id,
                status: Status::InProgress
            }]
        );
    }
}
