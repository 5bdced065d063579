//! CSV statement exports.
//!
//! The first row is the header; columns are located through the alias
//! lists in [`crate::tabular`], so exports from different banks work as
//! long as they carry a date, a description and an amount column.

use csv::{ReaderBuilder, Trim};
use finbaba_core::Transaction;
use tracing::{debug, warn};

use super::Extractor;
use crate::error::IngestError;
use crate::format::StatementFormat;
use crate::tabular::HeaderMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExtractor;

impl Extractor for CsvExtractor {
    fn format(&self) -> StatementFormat {
        StatementFormat::Csv
    }

    fn extract(&self, input: &[u8]) -> Result<Vec<Transaction>, IngestError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let headers = rdr
            .headers()
            .map_err(|e| IngestError::unreadable(StatementFormat::Csv, e))?;
        let header_map = HeaderMap::new(headers.iter());
        if !headers.is_empty() && !header_map.has_required_columns() {
            warn!(
                headers = ?headers.iter().collect::<Vec<_>>(),
                "CSV header has no recognizable date/description/amount columns"
            );
        }

        let mut txns = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    return Err(IngestError::unreadable(StatementFormat::Csv, e));
                }
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let cells: Vec<&str> = record.iter().collect();
            match header_map.row_to_transaction(&cells) {
                Some(txn) => txns.push(txn),
                None => skipped += 1,
            }
        }

        debug!("Parsed {} CSV transactions ({} rows skipped)", txns.len(), skipped);
        Ok(txns)
    }
}
