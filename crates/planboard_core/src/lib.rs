//! Core of the Planboard personal planner.
//!
//! One shared record collection backs both the calendar and the kanban
//! board. Views turn gestures into intents; the store applies them through
//! pure reconciliation functions and persists the result.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod service;

pub use config::{ConfigError, PlannerConfig, RemoteConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::drag::{CardDrag, DragPayload, DropTarget, TaskDrag};
pub use model::intent::{Intent, RecordPatch};
pub use model::record::{
    Category, ChecklistItem, ChecklistItemId, Record, RecordDraft, RecordId,
    RecordValidationError, Status,
};
pub use model::theme::{Palette, Theme};
pub use remote::{
    fetch_upcoming, CalendarSession, GoogleCalendarSource, RemoteError, UpcomingEvent,
    UpcomingEventsSource, UpcomingStart,
};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::board_view::{BoardColumn, BoardGesture, BoardView};
pub use service::calendar_view::{CalendarEntry, CalendarGesture, CalendarRange, CalendarView};
pub use service::dashboard::{DashboardItem, DashboardQuery};
pub use service::drag_bridge::{resolve_drop, DropPolicy};
pub use service::reconcile::{Outcome, SkipReason};
pub use service::record_store::{IntentSender, LoadSource, RecordStore, RECORDS_KEY};
pub use service::settings::{SettingsService, THEME_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
