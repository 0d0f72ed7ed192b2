//! Dashboard listing with search and filters.

use crate::model::intent::Intent;
use crate::model::record::{Category, Record, RecordId, Status};
use chrono::{DateTime, Utc};

/// Filters for the dashboard list. Empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Case-insensitive substring over title and description.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardItem {
    pub id: RecordId,
    pub title: String,
    pub start: DateTime<Utc>,
}

/// Lists matching records in collection order.
pub fn list(records: &[Record], query: &DashboardQuery) -> Vec<DashboardItem> {
    let needle = query
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    records
        .iter()
        .filter(|record| query.category.map_or(true, |c| record.category == c))
        .filter(|record| query.status.map_or(true, |s| record.status == s))
        .filter(|record| {
            needle.as_deref().map_or(true, |needle| {
                record.title.to_lowercase().contains(needle)
                    || record.description.to_lowercase().contains(needle)
            })
        })
        .map(|record| DashboardItem {
            id: record.id,
            title: record.title.clone(),
            start: record.start,
        })
        .collect()
}

/// Intent behind a dashboard row's delete button.
pub fn delete_intent(id: RecordId) -> Intent {
    Intent::Delete { id }
}
