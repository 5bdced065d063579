use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::IngestError;

/// Declared format of an uploaded statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFormat {
    Csv,
    /// Excel / OpenDocument workbooks, read from the first sheet
    Spreadsheet,
    /// PDF rendered to text, then scanned like a text statement
    Pdf,
    StatementText,
}

impl StatementFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(StatementFormat::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(StatementFormat::Spreadsheet),
            "pdf" => Some(StatementFormat::Pdf),
            "txt" => Some(StatementFormat::StatementText),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| {
            IngestError::UnsupportedFormat(if ext.is_empty() {
                format!("{} has no file extension", path.display())
            } else {
                format!(".{}", ext)
            })
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementFormat::Csv => "csv",
            StatementFormat::Spreadsheet => "spreadsheet",
            StatementFormat::Pdf => "pdf",
            StatementFormat::StatementText => "statement text",
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementFormat {
    type Err = IngestError;

    /// Accepts format names (`csv`, `spreadsheet`, `pdf`, `text`) or bare extensions
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spreadsheet" | "excel" => Ok(StatementFormat::Spreadsheet),
            "text" | "statement-text" | "statement_text" => Ok(StatementFormat::StatementText),
            other => Self::from_extension(other)
                .ok_or_else(|| IngestError::UnsupportedFormat(s.to_string())),
        }
    }
}
