//! JSON blob codec for the record collection.
//!
//! # Responsibility
//! - Serialize the ordered collection into one blob.
//! - Rehydrate the blob with temporal fields restored as time values.
//!
//! # Invariants
//! - Decoding rejects any collection that would violate record invariants
//!   (nil id, inverted window, duplicate checklist item, duplicate record id).

use crate::model::record::{Record, RecordId, RecordValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug)]
pub enum BlobError {
    Json(serde_json::Error),
    InvalidRecord {
        index: usize,
        source: RecordValidationError,
    },
    DuplicateId(RecordId),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed record blob: {err}"),
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid record at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate record id in blob: {id}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for BlobError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes records as a JSON array with RFC 3339 timestamps.
pub fn encode(records: &[Record]) -> BlobResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parses and validates a persisted blob.
pub fn decode(blob: &str) -> BlobResult<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(blob)?;
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| BlobError::InvalidRecord { index, source })?;
        if !seen.insert(record.id) {
            return Err(BlobError::DuplicateId(record.id));
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{decode, BlobError};

    #[test]
    fn decode_rejects_non_array_blob() {
        let err = decode(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, BlobError::Json(_)));
    }

    #[test]
    fn decode_accepts_empty_collection() {
        assert!(decode("[]").unwrap().is_empty());
    }
}
