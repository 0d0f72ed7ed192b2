//! Use-case services over the record collection.
//!
//! # Responsibility
//! - Own the record collection and apply intents (`record_store`,
//!   `reconcile`).
//! - Adapt the collection to calendar, board and dashboard views.
//! - Keep view code decoupled from storage details.

pub mod board_view;
pub mod calendar_view;
pub mod dashboard;
pub mod drag_bridge;
pub mod reconcile;
pub mod record_store;
pub mod settings;
