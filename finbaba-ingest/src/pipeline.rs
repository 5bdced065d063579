//! Ingestion pipeline: pick an extractor for the declared format, extract,
//! aggregate. Either the whole upload succeeds or an [`IngestError`] is
//! returned; there is no partial result.

use finbaba_core::Transaction;
use finbaba_finance::{aggregate, FinancialSummary};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::IngestError;
use crate::extractors::{
    CsvExtractor, Extractor, PdfExtractor, SpreadsheetExtractor, StatementTextExtractor,
};
use crate::format::StatementFormat;

/// Transactions of one upload together with the summary built from them
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Ingested {
    #[serde(flatten)]
    pub summary: FinancialSummary,
    pub transactions: Vec<Transaction>,
}

pub fn extractor_for(format: StatementFormat) -> Box<dyn Extractor + Send + Sync> {
    match format {
        StatementFormat::Csv => Box::new(CsvExtractor),
        StatementFormat::Spreadsheet => Box::new(SpreadsheetExtractor),
        StatementFormat::Pdf => Box::new(PdfExtractor),
        StatementFormat::StatementText => Box::new(StatementTextExtractor),
    }
}

pub fn extract(input: &[u8], format: StatementFormat) -> Result<Vec<Transaction>, IngestError> {
    extractor_for(format).extract(input)
}

/// Extract and aggregate an in-memory upload
pub fn ingest(input: &[u8], format: StatementFormat) -> Result<Ingested, IngestError> {
    let transactions = extract(input, format)?;
    let summary = aggregate(&transactions);

    info!(
        format = %format,
        transactions = transactions.len(),
        "ingested statement"
    );

    Ok(Ingested {
        summary,
        transactions,
    })
}

/// Ingest a statement file, choosing the format from its extension
pub fn ingest_path(path: impl AsRef<Path>) -> Result<Ingested, IngestError> {
    let path = path.as_ref();
    let format = StatementFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| {
        IngestError::unreadable(format, format!("reading {}: {}", path.display(), e))
    })?;
    ingest(&bytes, format)
}
