use std::fmt;

use tracing::{debug, warn};

use crate::tabula::cleaner::error::Result;
use crate::tabula::cleaner::io::{csv_write, excel_write, jsonl};
use crate::tabula::cleaner::model::CleanTable;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv";
pub const JSON_MIME: &str = "application/json";

/// Serialization formats offered for a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    /// Resolves a user-facing label (`Excel`, `CSV`, `JSON`, any case).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "excel" => Some(ExportFormat::Excel),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Excel => XLSX_MIME,
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Json => JSON_MIME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => ".xlsx",
            ExportFormat::Csv => ".csv",
            ExportFormat::Json => ".json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "Excel"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// A serialized table ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes `table` in `format`, naming the artifact `{output_name}{ext}`.
pub fn export(
    table: &CleanTable,
    output_name: &str,
    format: ExportFormat,
) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Excel => excel_write::write_workbook(table)?,
        ExportFormat::Csv => csv_write::write_csv(table)?,
        ExportFormat::Json => jsonl::write_json_lines(table)?,
    };
    debug!(%format, size = bytes.len(), "serialized table");

    Ok(ExportArtifact {
        file_name: format!("{output_name}{}", format.extension()),
        mime: format.mime(),
        extension: format.extension(),
        bytes,
    })
}

/// Like [`export`], but takes the format as a free-form label.
///
/// An unrecognised label produces no artifact and no error.
pub fn export_labelled(
    table: &CleanTable,
    output_name: &str,
    label: &str,
) -> Result<Option<ExportArtifact>> {
    match ExportFormat::from_label(label) {
        Some(format) => export(table, output_name, format).map(Some),
        None => {
            warn!(label, "unrecognised export format, nothing produced");
            Ok(None)
        }
    }
}
