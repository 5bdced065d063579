//! finbaba-ingest: statement extractors (CSV, spreadsheet, statement text, PDF)
//! and the pipeline that turns an upload into a financial summary.

pub mod error;
pub mod extractors;
pub mod format;
pub mod pipeline;
pub mod tabular;

pub use error::IngestError;
pub use extractors::{
    CsvExtractor, Extractor, PdfExtractor, SpreadsheetExtractor, StatementTextExtractor,
};
pub use format::StatementFormat;
pub use pipeline::{extract, extractor_for, ingest, ingest_path, Ingested};
