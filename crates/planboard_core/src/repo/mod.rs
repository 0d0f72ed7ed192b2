//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value blob contract that stands in for browser storage.
//! - Encode/decode the record collection blob.
//!
//! # Invariants
//! - Repositories store opaque strings; record semantics live in
//!   `record_blob` and above.

pub mod kv_repo;
pub mod record_blob;
