//! Adapters between raw bytes and tables.

pub mod csv_read;
pub mod csv_write;
pub mod excel_read;
pub mod excel_write;
pub mod jsonl;

use tracing::{info, instrument};

use crate::tabula::cleaner::error::{Result, ToolError};
use crate::tabula::cleaner::model::Table;

/// Input kinds recognised from a file name extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Legacy binary workbook (`.xls`).
    Xls,
    /// Comma separated text (`.csv`).
    Csv,
}

impl FileKind {
    /// Detects the kind from the extension after the last `.`, ignoring case.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "xlsx" => Ok(FileKind::Xlsx),
            "xls" => Ok(FileKind::Xls),
            "csv" => Ok(FileKind::Csv),
            _ => Err(ToolError::UnsupportedFormat(extension)),
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, FileKind::Xlsx | FileKind::Xls)
    }
}

/// Decodes `bytes` into a table, picking the reader from `file_name`.
#[instrument(level = "debug", skip_all, fields(file = %file_name, size = bytes.len()))]
pub fn ingest(bytes: &[u8], file_name: &str) -> Result<Table> {
    let kind = FileKind::from_file_name(file_name)?;
    let table = match kind {
        FileKind::Xlsx => excel_read::read_xlsx(bytes)?,
        FileKind::Xls => excel_read::read_xls(bytes)?,
        FileKind::Csv => csv_read::read_table(bytes)?,
    };
    info!(
        ?kind,
        columns = table.columns.len(),
        rows = table.row_count(),
        "ingested table"
    );
    Ok(table)
}
