use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use planboard_core::service::reconcile::{apply, apply_or_keep};
use planboard_core::{
    ChecklistItem, Intent, Outcome, Record, RecordPatch, SkipReason, Status,
};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

fn card(status: Status, title: &str) -> Record {
    Record::card(status, title, at(9, 0))
}

fn changed(outcome: Outcome) -> Vec<Record> {
    match outcome {
        Outcome::Changed(records) => records,
        Outcome::Unchanged(reason) => panic!("expected change, got {reason:?}"),
    }
}

fn find(records: &[Record], id: Uuid) -> &Record {
    records.iter().find(|record| record.id == id).unwrap()
}

#[test]
fn add_appends_once_and_keeps_existing_records() {
    let existing = vec![card(Status::Todo, "a"), card(Status::Done, "b")];
    let new_record = card(Status::InProgress, "c");

    let next = changed(apply(&existing, &Intent::Add(new_record.clone())));
    assert_eq!(next.len(), existing.len() + 1);
    assert_eq!(&next[..2], existing.as_slice());
    assert_eq!(next.iter().filter(|r| r.id == new_record.id).count(), 1);

    assert_eq!(
        apply(&next, &Intent::Add(new_record)),
        Outcome::Unchanged(SkipReason::DuplicateId)
    );
}

#[test]
fn add_rejects_inverted_window() {
    let existing = vec![card(Status::Todo, "a")];
    let inverted = Record::from_slot(at(11, 0), at(10, 0));

    let outcome = apply(&existing, &Intent::Add(inverted));
    assert_eq!(outcome, Outcome::Unchanged(SkipReason::InvalidRecord));
    assert_eq!(
        apply_or_keep(&existing, &Intent::Add(Record::from_slot(at(11, 0), at(10, 0)))),
        existing
    );
}

#[test]
fn set_status_changes_only_status() {
    let mut target = card(Status::Todo, "target");
    target.id = Uuid::from_u128(1);
    let other = card(Status::Todo, "other");
    let records = vec![target.clone(), other.clone()];

    let next = changed(apply(
        &records,
        &Intent::SetStatus {
            id: target.id,
            status: Status::Done,
        },
    ));

    let mut expected = target.clone();
    expected.status = Status::Done;
    assert_eq!(next, vec![expected, other]);
}

#[test]
fn move_preserves_duration_and_unknown_id_is_ignored() {
    let mut record = card(Status::Todo, "long");
    record.end = record.start + Duration::minutes(90);
    let records = vec![record.clone()];

    let next = changed(apply(
        &records,
        &Intent::Move {
            id: record.id,
            start: at(14, 0),
            all_day: None,
        },
    ));
    let moved = find(&next, record.id);
    assert_eq!(moved.start, at(14, 0));
    assert_eq!(moved.end - moved.start, Duration::minutes(90));
    assert_eq!(moved.status, Status::Todo);

    assert_eq!(
        apply(
            &records,
            &Intent::Move {
                id: Uuid::new_v4(),
                start: at(14, 0),
                all_day: None,
            }
        ),
        Outcome::Unchanged(SkipReason::NotFound)
    );
}

#[test]
fn move_gives_zero_length_records_a_default_block() {
    let record = Record::from_slot(at(9, 0), at(9, 0));
    let records = vec![record.clone()];

    let next = changed(apply(
        &records,
        &Intent::Move {
            id: record.id,
            start: at(12, 0),
            all_day: Some(true),
        },
    ));
    let moved = find(&next, record.id);
    assert_eq!(moved.end, at(13, 0));
    assert!(moved.all_day);
}

#[test]
fn resize_sets_window_and_rejects_inversion() {
    let record = card(Status::Todo, "meeting");
    let records = vec![record.clone()];

    let next = changed(apply(
        &records,
        &Intent::Resize {
            id: record.id,
            start: at(8, 0),
            end: at(12, 0),
        },
    ));
    assert_eq!(find(&next, record.id).start, at(8, 0));
    assert_eq!(find(&next, record.id).end, at(12, 0));

    let outcome = apply(
        &records,
        &Intent::Resize {
            id: record.id,
            start: at(12, 0),
            end: at(8, 0),
        },
    );
    assert_eq!(outcome, Outcome::Unchanged(SkipReason::InvalidRecord));
}

#[test]
fn reorder_rewrites_only_column_slots() {
    let a = card(Status::Todo, "a");
    let b = card(Status::Done, "b");
    let c = card(Status::Todo, "c");
    let d = card(Status::InProgress, "d");
    let e = card(Status::Todo, "e");
    let records = vec![a.clone(), b.clone(), c.clone(), d.clone(), e.clone()];

    let next = changed(apply(
        &records,
        &Intent::Reorder {
            id: e.id,
            column: Status::Todo,
            to_index: 0,
        },
    ));

    let titles: Vec<&str> = next.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["e", "b", "a", "d", "c"]);

    let mut before: Vec<Uuid> = records.iter().map(|r| r.id).collect();
    let mut after: Vec<Uuid> = next.iter().map(|r| r.id).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn reorder_clamps_index_and_checks_column() {
    let a = card(Status::Todo, "a");
    let b = card(Status::Todo, "b");
    let records = vec![a.clone(), b.clone()];

    let next = changed(apply(
        &records,
        &Intent::Reorder {
            id: a.id,
            column: Status::Todo,
            to_index: 99,
        },
    ));
    assert_eq!(next[0].id, b.id);
    assert_eq!(next[1].id, a.id);

    assert_eq!(
        apply(
            &records,
            &Intent::Reorder {
                id: a.id,
                column: Status::Done,
                to_index: 0,
            }
        ),
        Outcome::Unchanged(SkipReason::ColumnMismatch)
    );
    assert_eq!(
        apply(
            &records,
            &Intent::Reorder {
                id: a.id,
                column: Status::Todo,
                to_index: 0,
            }
        ),
        Outcome::Unchanged(SkipReason::NoOp)
    );
}

#[test]
fn edit_merges_present_fields_only() {
    let record = card(Status::Todo, "draft");
    let records = vec![record.clone()];

    let patch = RecordPatch {
        title: Some("final".to_string()),
        description: Some("ready for review".to_string()),
        ..RecordPatch::default()
    };
    let next = changed(apply(
        &records,
        &Intent::Edit {
            id: record.id,
            patch,
        },
    ));
    let edited = find(&next, record.id);
    assert_eq!(edited.title, "final");
    assert_eq!(edited.description, "ready for review");
    assert_eq!(edited.start, record.start);
    assert_eq!(edited.status, record.status);

    assert_eq!(
        apply(
            &records,
            &Intent::Edit {
                id: record.id,
                patch: RecordPatch::default(),
            }
        ),
        Outcome::Unchanged(SkipReason::NoOp)
    );

    let inverted = RecordPatch {
        end: Some(record.start - Duration::minutes(1)),
        ..RecordPatch::default()
    };
    assert_eq!(
        apply(
            &records,
            &Intent::Edit {
                id: record.id,
                patch: inverted,
            }
        ),
        Outcome::Unchanged(SkipReason::InvalidRecord)
    );
}

#[test]
fn delete_of_missing_id_keeps_collection() {
    let records = vec![card(Status::Todo, "a"), card(Status::Done, "b")];

    let kept = apply_or_keep(&records, &Intent::Delete { id: Uuid::new_v4() });
    assert_eq!(kept, records);

    let next = changed(apply(&records, &Intent::Delete { id: records[0].id }));
    assert_eq!(next, vec![records[1].clone()]);
}

#[test]
fn logged_time_accumulates_and_ignores_garbage() {
    let record = card(Status::InProgress, "focus");
    let id = record.id;
    let mut records = vec![record];

    records = apply_or_keep(&records, &Intent::LogTime { id, input: "45".to_string() });
    records = apply_or_keep(&records, &Intent::LogTime { id, input: "15".to_string() });
    assert_eq!(records[0].logged_time, 60);

    assert_eq!(
        apply(&records, &Intent::LogTime { id, input: "abc".to_string() }),
        Outcome::Unchanged(SkipReason::InvalidInput)
    );
    assert_eq!(
        apply(&records, &Intent::LogTime { id, input: "-20".to_string() }),
        Outcome::Unchanged(SkipReason::InvalidInput)
    );
    assert_eq!(records[0].logged_time, 60);
}

#[test]
fn checklist_lifecycle() {
    let record = card(Status::Todo, "errands");
    let id = record.id;
    let records = vec![record];

    let item = ChecklistItem::new("buy milk");
    let item_id = item.id;
    let records = changed(apply(&records, &Intent::ChecklistAdd { id, item: item.clone() }));
    assert_eq!(records[0].checklist.len(), 1);
    assert!(!records[0].checklist[0].completed);

    assert_eq!(
        apply(&records, &Intent::ChecklistAdd { id, item }),
        Outcome::Unchanged(SkipReason::DuplicateId)
    );

    let toggled = changed(apply(&records, &Intent::ChecklistToggle { id, item_id }));
    assert!(toggled[0].checklist[0].completed);
    let toggled_back = changed(apply(&toggled, &Intent::ChecklistToggle { id, item_id }));
    assert_eq!(toggled_back, records);

    let timed = changed(apply(
        &records,
        &Intent::ChecklistSetTimes {
            id,
            item_id,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 30, 0),
        },
    ));
    assert_eq!(timed[0].checklist[0].end_time, NaiveTime::from_hms_opt(9, 30, 0));

    assert_eq!(
        apply(
            &records,
            &Intent::ChecklistToggle {
                id,
                item_id: Uuid::new_v4(),
            }
        ),
        Outcome::Unchanged(SkipReason::NotFound)
    );

    let removed = changed(apply(&records, &Intent::ChecklistRemove { id, item_id }));
    assert!(removed[0].checklist.is_empty());
}

#[test]
fn untargeted_records_are_untouched() {
    let target = card(Status::Todo, "target");
    let bystander = card(Status::Done, "bystander");
    let records = vec![bystander.clone(), target.clone()];

    let intents = [
        Intent::SetStatus {
            id: target.id,
            status: Status::InProgress,
        },
        Intent::Move {
            id: target.id,
            start: at(16, 0),
            all_day: None,
        },
        Intent::LogTime {
            id: target.id,
            input: "10".to_string(),
        },
        Intent::Delete { id: target.id },
    ];
    for intent in &intents {
        let next = apply_or_keep(&records, intent);
        assert_eq!(next[0], bystander, "intent {} touched bystander", intent.name());
    }
}
