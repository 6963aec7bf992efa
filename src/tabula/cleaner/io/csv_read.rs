use std::borrow::Cow;
use std::str::Utf8Error;

use csv::ReaderBuilder;
use tracing::debug;

use crate::tabula::cleaner::error::{Result, ToolError};
use crate::tabula::cleaner::model::{CellValue, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field values read as missing, mirroring the default NA markers of common
/// dataframe readers.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads comma separated text into a table, first record as headers.
pub fn read_table(bytes: &[u8]) -> Result<Table> {
    let text = decode_text(bytes);
    parse_table(&text)
}

/// Decodes `bytes` as UTF-8, falling back to Latin-1 when they are not valid
/// UTF-8. The fallback cannot fail because every byte maps to a code point.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match decode_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(error) => {
            debug!(%error, "input is not UTF-8, decoding as Latin-1");
            encoding_rs::mem::decode_latin1(bytes)
        }
    }
}

fn decode_utf8(bytes: &[u8]) -> std::result::Result<&str, Utf8Error> {
    std::str::from_utf8(bytes)
}

fn parse_table(text: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(ToolError::EmptyInput);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(ToolError::InvalidTable(format!(
                "expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(field_to_cell).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed delimited text");
    Ok(Table::from_rows(headers, rows))
}

fn field_to_cell(field: &str) -> CellValue {
    if MISSING_MARKERS.contains(&field) {
        CellValue::Missing
    } else {
        CellValue::Text(field.to_string())
    }
}
