use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests, cleans, or exports a table.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when delimited text cannot be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the `.xlsx` reader.
    #[error("Excel read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the legacy `.xls` reader.
    #[error("Excel read error: {0}")]
    XlsRead(#[from] calamine::XlsError),

    /// Raised when the input file extension is not one of the accepted kinds.
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    /// Raised when a workbook cannot provide a first sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when delimited text does not line up with its header row.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Raised when the input holds no header row at all.
    #[error("no columns to parse from input")]
    EmptyInput,

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
