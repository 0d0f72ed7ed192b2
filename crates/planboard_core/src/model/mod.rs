//! Domain model shared by the calendar and board projections.
//!
//! # Responsibility
//! - Define the single persisted record shape and its nested checklist.
//! - Define the intent vocabulary views use to request mutations.
//! - Define drag payloads and the closed theme set.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil `RecordId`.
//! - Status and category are closed enums; free-form labels are not accepted.

pub mod drag;
pub mod intent;
pub mod record;
pub mod theme;
