//! PDF statements: render the document to text, then scan it with the
//! statement-text patterns. No layout analysis is attempted.
//!
//! The PDF text renderer can panic on malformed documents; a panic is
//! reported as unreadable input instead of unwinding into the caller.

use finbaba_core::Transaction;
use tracing::debug;

use super::{Extractor, StatementTextExtractor};
use crate::error::IngestError;
use crate::format::StatementFormat;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn format(&self) -> StatementFormat {
        StatementFormat::Pdf
    }

    fn extract(&self, input: &[u8]) -> Result<Vec<Transaction>, IngestError> {
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(input))
            .map_err(|_| IngestError::unreadable(StatementFormat::Pdf, "PDF renderer crashed"))?
            .map_err(|e| IngestError::unreadable(StatementFormat::Pdf, e))?;
        debug!("PDF rendered to {} chars of text", text.len());

        StatementTextExtractor::extract_text(&text)
    }
}
