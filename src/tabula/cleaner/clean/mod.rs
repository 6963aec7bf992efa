//! Header normalization and per-cell text cleaning.
//!
//! Every function in this module is infallible: the only step with a failure
//! mode, the Latin-1 → UTF-8 mojibake repair, is recovered locally and leaves
//! the cell untouched.

use std::str::Utf8Error;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::tabula::cleaner::model::{
    CellValue, CleanColumn, CleanTable, FillPolicy, Table, dedupe_names,
};

static SYMBOL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+$₹#]").unwrap());

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());

static LINE_BREAK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

// The information separators U+001C..U+001F count as whitespace too.
static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

/// Reasons the mojibake repair leaves a string unchanged.
#[derive(Debug, Error)]
pub enum RepairSkipped {
    #[error("character {0:?} is outside the Latin-1 range")]
    OutsideLatin1(char),
    #[error("Latin-1 bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}

/// Cleans every header and every cell of `table`.
#[instrument(
    level = "debug",
    skip_all,
    fields(columns = table.columns.len(), rows = table.row_count(), %fill)
)]
pub fn clean_table(table: Table, fill: FillPolicy) -> CleanTable {
    let names = dedupe_names(
        table
            .columns
            .iter()
            .map(|col| normalize_header(&col.name))
            .collect(),
    );

    let columns = table
        .columns
        .into_iter()
        .zip(names)
        .map(|(column, name)| CleanColumn {
            name,
            values: column
                .cells
                .iter()
                .map(|cell| clean_text(cell, fill))
                .collect(),
        })
        .collect();

    CleanTable { columns }
}

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank_char)
}

/// Trims and lowercases a header, replacing each literal space with `_`.
///
/// Only U+0020 is replaced, one for one; tabs and line breaks inside a header
/// are kept.
pub fn normalize_header(header: &str) -> String {
    trim_blank(header).to_lowercase().replace(' ', "_")
}

/// Cleans a single cell, returning the fill value for missing or blank cells.
pub fn clean_text(cell: &CellValue, fill: FillPolicy) -> String {
    if cell.is_missing() {
        return fill.value().to_string();
    }
    clean_str(&cell.as_text(), fill)
}

/// String form of [`clean_text`].
pub fn clean_str(text: &str, fill: FillPolicy) -> String {
    let text = trim_blank(text);
    if text.is_empty() {
        return fill.value().to_string();
    }

    let text = repair_mojibake(text).unwrap_or_else(|reason| {
        trace!(%reason, "encoding repair skipped");
        text.to_string()
    });

    let text = SYMBOL_PATTERN.replace_all(&text, "");
    let text = TAG_PATTERN.replace_all(&text, "");
    let text = LINE_BREAK_PATTERN.replace_all(&text, " ");
    let text = text.replace("\\r", " ").replace("\\n", " ");
    let text = WHITESPACE_PATTERN.replace_all(&text, " ");

    trim_blank(&text).to_string()
}

/// Reinterprets `text` as UTF-8 that was wrongly decoded as Latin-1.
///
/// `"CafÃ©"` becomes `"Café"`. Fails when `text` holds a character beyond
/// U+00FF or when its Latin-1 bytes are not valid UTF-8.
pub fn repair_mojibake(text: &str) -> Result<String, RepairSkipped> {
    if let Some(outside) = text.chars().find(|ch| u32::from(*ch) > 0xFF) {
        return Err(RepairSkipped::OutsideLatin1(outside));
    }

    let bytes = encoding_rs::mem::encode_latin1_lossy(text);
    let repaired = std::str::from_utf8(&bytes)?;
    if repaired != text {
        debug!(original = text, repaired, "repaired mis-decoded text");
    }
    Ok(repaired.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_rejects_wide_characters() {
        assert!(matches!(
            repair_mojibake("₹100"),
            Err(RepairSkipped::OutsideLatin1('₹'))
        ));
    }

    #[test]
    fn repair_rejects_lone_latin1_bytes() {
        assert!(matches!(
            repair_mojibake("café"),
            Err(RepairSkipped::InvalidUtf8(_))
        ));
    }

    #[test]
    fn repair_fixes_double_decoded_text() {
        assert_eq!(repair_mojibake("CafÃ©").unwrap(), "Café");
    }

    #[test]
    fn ascii_passes_through_repair() {
        assert_eq!(repair_mojibake("plain text").unwrap(), "plain text");
    }
}
