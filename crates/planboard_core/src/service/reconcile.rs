//! Pure reconciliation of the record collection.
//!
//! # Responsibility
//! - Turn `(collection, intent)` into the next collection.
//! - Reject intents that would break record invariants without touching the
//!   input.
//!
//! # Invariants
//! - Functions never mutate their input slice and never panic.
//! - Record ids stay unique; windows stay `start <= end`.
//! - Records not targeted by an intent keep their content and order.

use crate::model::intent::{Intent, RecordPatch};
use crate::model::record::{
    default_block, ChecklistItem, ChecklistItemId, Record, RecordId, Status,
};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

// Integer prefix, as typed into a numeric input: "45", " 45", "45 min".
static MINUTES_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("valid minutes regex"));

/// Why an intent left the collection unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Target record (or checklist item) does not exist.
    NotFound,
    /// Added record or checklist item reuses an existing id.
    DuplicateId,
    /// Result would violate a record invariant (e.g. `end < start`).
    InvalidRecord,
    /// Input text could not be interpreted.
    InvalidInput,
    /// Drag refers to a column the record no longer belongs to.
    ColumnMismatch,
    /// Intent is valid but changes nothing.
    NoOp,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateId => "duplicate_id",
            Self::InvalidRecord => "invalid_record",
            Self::InvalidInput => "invalid_input",
            Self::ColumnMismatch => "column_mismatch",
            Self::NoOp => "no_op",
        }
    }
}

/// Result of applying one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed(Vec<Record>),
    Unchanged(SkipReason),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Returns the new collection, or a copy of `records` when unchanged.
    pub fn into_records(self, records: &[Record]) -> Vec<Record> {
        match self {
            Self::Changed(next) => next,
            Self::Unchanged(_) => records.to_vec(),
        }
    }
}

/// Applies one intent to a collection.
pub fn apply(records: &[Record], intent: &Intent) -> Outcome {
    match intent {
        Intent::Add(record) => add(records, record.clone()),
        Intent::Move { id, start, all_day } => move_to(records, *id, *start, *all_day),
        Intent::Resize { id, start, end } => resize(records, *id, *start, *end),
        Intent::SetStatus { id, status } => set_status(records, *id, *status),
        Intent::Reorder {
            id,
            column,
            to_index,
        } => reorder(records, *id, *column, *to_index),
        Intent::Edit { id, patch } => edit(records, *id, patch),
        Intent::Delete { id } => delete(records, *id),
        Intent::ChecklistAdd { id, item } => checklist_add(records, *id, item.clone()),
        Intent::ChecklistToggle { id, item_id } => checklist_toggle(records, *id, *item_id),
        Intent::ChecklistSetTimes {
            id,
            item_id,
            start_time,
            end_time,
        } => checklist_set_times(records, *id, *item_id, *start_time, *end_time),
        Intent::ChecklistRemove { id, item_id } => checklist_remove(records, *id, *item_id),
        Intent::LogTime { id, input } => log_time(records, *id, input),
    }
}

/// Applies one intent and always returns a collection.
pub fn apply_or_keep(records: &[Record], intent: &Intent) -> Vec<Record> {
    apply(records, intent).into_records(records)
}

/// Appends a record.
pub fn add(records: &[Record], record: Record) -> Outcome {
    if record.validate().is_err() {
        return Outcome::Unchanged(SkipReason::InvalidRecord);
    }
    if records.iter().any(|existing| existing.id == record.id) {
        return Outcome::Unchanged(SkipReason::DuplicateId);
    }
    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend_from_slice(records);
    next.push(record);
    Outcome::Changed(next)
}

/// Replaces the matched record with `updater(record)`.
///
/// The updated record must keep its id and satisfy `Record::validate`.
pub fn replace_with(
    records: &[Record],
    id: RecordId,
    updater: impl FnOnce(&Record) -> Record,
) -> Outcome {
    update_one(records, id, |record| Ok(updater(record)))
}

/// Moves a record so it starts at `start`, keeping its duration.
///
/// Records without a positive duration get the default one-hour block.
pub fn move_to(
    records: &[Record],
    id: RecordId,
    start: DateTime<Utc>,
    all_day: Option<bool>,
) -> Outcome {
    update_one(records, id, |record| {
        let duration = record.duration();
        let duration = if duration > Duration::zero() {
            duration
        } else {
            default_block()
        };
        let end = start
            .checked_add_signed(duration)
            .ok_or(SkipReason::InvalidRecord)?;
        let mut moved = record.clone();
        moved.start = start;
        moved.end = end;
        if let Some(all_day) = all_day {
            moved.all_day = all_day;
        }
        Ok(moved)
    })
}

/// Sets both ends of a record's window.
pub fn resize(
    records: &[Record],
    id: RecordId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Outcome {
    update_one(records, id, |record| {
        let mut resized = record.clone();
        resized.start = start;
        resized.end = end;
        Ok(resized)
    })
}

/// Reassigns a record to another column. The window is untouched.
pub fn set_status(records: &[Record], id: RecordId, status: Status) -> Outcome {
    update_one(records, id, |record| {
        let mut updated = record.clone();
        updated.status = status;
        Ok(updated)
    })
}

/// Moves a record to `to_index` within its column.
///
/// Only the slots occupied by `column` records are rewritten; every other
/// record keeps its absolute position. `to_index` is clamped to the column.
pub fn reorder(records: &[Record], id: RecordId, column: Status, to_index: usize) -> Outcome {
    let slots: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.status == column)
        .map(|(slot, _)| slot)
        .collect();

    let Some(from) = slots.iter().position(|&slot| records[slot].id == id) else {
        let reason = if records.iter().any(|record| record.id == id) {
            SkipReason::ColumnMismatch
        } else {
            SkipReason::NotFound
        };
        return Outcome::Unchanged(reason);
    };

    let mut column_records: Vec<&Record> = slots.iter().map(|&slot| &records[slot]).collect();
    let moving = column_records.remove(from);
    let to = to_index.min(column_records.len());
    if to == from {
        return Outcome::Unchanged(SkipReason::NoOp);
    }
    column_records.insert(to, moving);

    let mut next = records.to_vec();
    for (&slot, record) in slots.iter().zip(column_records) {
        next[slot] = record.clone();
    }
    Outcome::Changed(next)
}

/// Merges a partial update into a record.
pub fn edit(records: &[Record], id: RecordId, patch: &RecordPatch) -> Outcome {
    if patch.is_empty() {
        return if records.iter().any(|record| record.id == id) {
            Outcome::Unchanged(SkipReason::NoOp)
        } else {
            Outcome::Unchanged(SkipReason::NotFound)
        };
    }
    update_one(records, id, |record| Ok(patch.merge_into(record)))
}

/// Removes a record. Missing ids leave the collection unchanged.
pub fn delete(records: &[Record], id: RecordId) -> Outcome {
    if !records.iter().any(|record| record.id == id) {
        return Outcome::Unchanged(SkipReason::NotFound);
    }
    Outcome::Changed(
        records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect(),
    )
}

/// Appends a checklist item to a record.
pub fn checklist_add(records: &[Record], id: RecordId, item: ChecklistItem) -> Outcome {
    update_one(records, id, |record| {
        if record.checklist_item(item.id).is_some() {
            return Err(SkipReason::DuplicateId);
        }
        let mut updated = record.clone();
        updated.checklist.push(item);
        Ok(updated)
    })
}

/// Flips the completion flag of one checklist item.
pub fn checklist_toggle(records: &[Record], id: RecordId, item_id: ChecklistItemId) -> Outcome {
    update_item(records, id, item_id, |item| item.completed = !item.completed)
}

/// Sets the wall-clock times of one checklist item.
pub fn checklist_set_times(
    records: &[Record],
    id: RecordId,
    item_id: ChecklistItemId,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> Outcome {
    update_item(records, id, item_id, |item| {
        item.start_time = start_time;
        item.end_time = end_time;
    })
}

/// Removes one checklist item from its record.
pub fn checklist_remove(records: &[Record], id: RecordId, item_id: ChecklistItemId) -> Outcome {
    update_one(records, id, |record| {
        if record.checklist_item(item_id).is_none() {
            return Err(SkipReason::NotFound);
        }
        let mut updated = record.clone();
        updated.checklist.retain(|item| item.id != item_id);
        Ok(updated)
    })
}

/// Adds user-entered minutes to a record's logged time.
///
/// Input that does not start with an integer, or is negative, is discarded.
pub fn log_time(records: &[Record], id: RecordId, input: &str) -> Outcome {
    let Some(minutes) = parse_minutes(input) else {
        return Outcome::Unchanged(SkipReason::InvalidInput);
    };
    update_one(records, id, |record| {
        let mut updated = record.clone();
        updated.logged_time = record.logged_time.saturating_add(minutes);
        Ok(updated)
    })
}

/// Parses the leading integer of `input` as a non-negative minute count.
///
/// Trailing text is ignored (`"45 min"` is 45). Values beyond `u32::MAX`
/// saturate.
pub fn parse_minutes(input: &str) -> Option<u32> {
    let captures = MINUTES_PREFIX_RE.captures(input)?;
    let negative = captures.get(1).is_some_and(|sign| sign.as_str() == "-");
    let digits = captures.get(2)?.as_str().trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    if negative {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

fn update_one(
    records: &[Record],
    id: RecordId,
    update: impl FnOnce(&Record) -> Result<Record, SkipReason>,
) -> Outcome {
    let Some(position) = records.iter().position(|record| record.id == id) else {
        return Outcome::Unchanged(SkipReason::NotFound);
    };
    let current = &records[position];
    let updated = match update(current) {
        Ok(updated) => updated,
        Err(reason) => return Outcome::Unchanged(reason),
    };
    if updated.id != current.id || updated.validate().is_err() {
        return Outcome::Unchanged(SkipReason::InvalidRecord);
    }
    if updated == *current {
        return Outcome::Unchanged(SkipReason::NoOp);
    }
    let mut next = records.to_vec();
    next[position] = updated;
    Outcome::Changed(next)
}

fn update_item(
    records: &[Record],
    id: RecordId,
    item_id: ChecklistItemId,
    change: impl FnOnce(&mut ChecklistItem),
) -> Outcome {
    update_one(records, id, |record| {
        let mut updated = record.clone();
        let item = updated
            .checklist
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(SkipReason::NotFound)?;
        change(item);
        Ok(updated)
    })
}

#[cfg(test)]
mod tests {
    use super::parse_minutes;

    #[test]
    fn parse_minutes_follows_integer_prefix_rules() {
        assert_eq!(parse_minutes("45"), Some(45));
        assert_eq!(parse_minutes("  15"), Some(15));
        assert_eq!(parse_minutes("30 min"), Some(30));
        assert_eq!(parse_minutes("+5"), Some(5));
        assert_eq!(parse_minutes("007"), Some(7));
        assert_eq!(parse_minutes("-0"), Some(0));
    }

    #[test]
    fn parse_minutes_rejects_non_numeric_and_negative_input() {
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("min 30"), None);
        assert_eq!(parse_minutes("-10"), None);
    }

    #[test]
    fn parse_minutes_saturates_huge_values() {
        assert_eq!(parse_minutes("99999999999999999999"), Some(u32::MAX));
    }
}
