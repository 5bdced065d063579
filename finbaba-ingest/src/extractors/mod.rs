//! Statement extractors.
//!
//! Every extractor follows the same contract: malformed rows are skipped,
//! and only structurally unreadable input fails the whole extraction.

pub mod csv;
pub mod pdf;
pub mod spreadsheet;
pub mod statement_text;

use finbaba_core::Transaction;

use crate::error::IngestError;
use crate::format::StatementFormat;

pub use self::csv::CsvExtractor;
pub use self::pdf::PdfExtractor;
pub use self::spreadsheet::SpreadsheetExtractor;
pub use self::statement_text::StatementTextExtractor;

/// Converts a raw upload into canonical transactions
pub trait Extractor {
    fn format(&self) -> StatementFormat;

    fn extract(&self, input: &[u8]) -> Result<Vec<Transaction>, IngestError>;
}
