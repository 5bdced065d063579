//! Ingestion failures surfaced to callers.
//!
//! Row-level problems never show up here: malformed rows are skipped by the
//! extractors and the batch continues.

use thiserror::Error;

use crate::format::StatementFormat;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported statement format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable {format} input: {reason}")]
    UnreadableInput {
        format: StatementFormat,
        reason: String,
    },
}

impl IngestError {
    pub fn unreadable(format: StatementFormat, reason: impl ToString) -> Self {
        IngestError::UnreadableInput {
            format,
            reason: reason.to_string(),
        }
    }
}
