//! Excel and OpenDocument workbooks.
//!
//! Only the first sheet is read. Cells are rendered to text and fed through
//! the same header/alias mapping as CSV exports.

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use finbaba_core::Transaction;
use std::io::Cursor;
use tracing::debug;

use super::Extractor;
use crate::error::IngestError;
use crate::format::StatementFormat;
use crate::tabular::HeaderMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    /// Open the workbook and return its first worksheet
    pub fn first_sheet(input: &[u8]) -> Result<Range<Data>, IngestError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(input.to_vec()))
            .map_err(|e| IngestError::unreadable(StatementFormat::Spreadsheet, e))?;

        match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => Ok(range),
            Some(Err(e)) => Err(IngestError::unreadable(StatementFormat::Spreadsheet, e)),
            None => Err(IngestError::unreadable(
                StatementFormat::Spreadsheet,
                "workbook has no sheets",
            )),
        }
    }

    /// Map sheet rows to transactions; the first row is the header.
    pub fn transactions_from_range(range: &Range<Data>) -> Vec<Transaction> {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Vec::new();
        };

        let headers: Vec<String> = header_row.iter().map(cell_text).collect();
        let header_map = HeaderMap::new(headers.iter().map(String::as_str));

        let mut txns = Vec::new();
        let mut skipped = 0usize;
        for row in rows {
            let texts: Vec<String> = row.iter().map(cell_text).collect();
            let cells: Vec<&str> = texts.iter().map(String::as_str).collect();
            match header_map.row_to_transaction(&cells) {
                Some(txn) => txns.push(txn),
                None => skipped += 1,
            }
        }

        debug!(
            "Parsed {} spreadsheet transactions ({} rows skipped)",
            txns.len(),
            skipped
        );
        txns
    }
}

impl Extractor for SpreadsheetExtractor {
    fn format(&self) -> StatementFormat {
        StatementFormat::Spreadsheet
    }

    fn extract(&self, input: &[u8]) -> Result<Vec<Transaction>, IngestError> {
        let range = Self::first_sheet(input)?;
        Ok(Self::transactions_from_range(&range))
    }
}

/// Render a cell the way a CSV export would show it. Date cells become
/// ISO dates so the shared date parser understands them.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}
