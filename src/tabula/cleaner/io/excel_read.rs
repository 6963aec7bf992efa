use std::io::Cursor;

use calamine::{DataType, Range, Reader, Xls, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::tabula::cleaner::error::{Result, ToolError};
use crate::tabula::cleaner::model::{CellValue, Table};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// First serial past 9999-12-31, the last date Excel can display.
const MAX_SERIAL: f64 = 2_958_466.0;

/// Reads the first sheet of an `.xlsx` workbook held in memory.
pub fn read_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or_else(no_sheets)??;
    Ok(range_to_table(&range))
}

/// Reads the first sheet of a legacy `.xls` workbook held in memory.
pub fn read_xls(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or_else(no_sheets)??;
    Ok(range_to_table(&range))
}

fn no_sheets() -> ToolError {
    ToolError::InvalidWorkbook("workbook has no sheets".into())
}

fn range_to_table(range: &Range<DataType>) -> Table {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row.iter().map(header_text).collect(),
        None => Vec::new(),
    };

    let body: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    debug!(columns = headers.len(), rows = body.len(), "read first sheet");
    Table::from_rows(headers, body)
}

fn header_text(cell: &DataType) -> String {
    match cell_to_value(cell) {
        CellValue::Missing => String::new(),
        value => value.as_text().into_owned(),
    }
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Text(if *value { "True" } else { "False" }.into()),
        DataType::DateTime(serial) => match render_date_cell(*serial) {
            Some(text) => CellValue::Text(text),
            None => CellValue::Number(*serial),
        },
        DataType::Empty | DataType::Error(_) => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

/// Renders a date-formatted cell. Serials below one day carry only a time of
/// day and render as `HH:MM:SS`.
fn render_date_cell(serial: f64) -> Option<String> {
    let timestamp = excel_serial_to_datetime(serial)?;
    if serial < 1.0 {
        Some(timestamp.time().format("%H:%M:%S").to_string())
    } else {
        Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// Converts an Excel serial date (1900 date system) into a timestamp, rounded
/// to the millisecond. Serials outside 0..=9999-12-31 yield `None`.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..MAX_SERIAL).contains(&serial) {
        return None;
    }
    // Excel counts a nonexistent 1900-02-29 as serial 60.
    let epoch_day = if serial < 60.0 { 31 } else { 30 };
    let epoch = NaiveDate::from_ymd_opt(1899, 12, epoch_day)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;
    use crate::tabula::cleaner::clean::clean_text;
    use crate::tabula::cleaner::model::FillPolicy;

    #[test]
    fn error_cells_read_as_missing() {
        assert_eq!(
            cell_to_value(&DataType::Error(CellErrorType::Div0)),
            CellValue::Missing
        );
        assert_eq!(
            cell_to_value(&DataType::Error(CellErrorType::NA)),
            CellValue::Missing
        );
    }

    #[test]
    fn error_cells_take_the_fill_value() {
        let cell = cell_to_value(&DataType::Error(CellErrorType::Ref));
        assert_eq!(clean_text(&cell, FillPolicy::NotAvailable), "N/A");
        assert_eq!(clean_text(&cell, FillPolicy::Blank), "");
    }

    #[test]
    fn date_cells_render_as_timestamps() {
        assert_eq!(
            cell_to_value(&DataType::DateTime(45292.5)),
            CellValue::Text("2024-01-01 12:00:00".into())
        );
        assert_eq!(render_date_cell(61.0).as_deref(), Some("1900-03-01 00:00:00"));
    }

    #[test]
    fn early_serials_account_for_the_1900_leap_day() {
        assert_eq!(render_date_cell(1.0).as_deref(), Some("1900-01-01 00:00:00"));
        assert_eq!(render_date_cell(59.0).as_deref(), Some("1900-02-28 00:00:00"));
    }

    #[test]
    fn time_only_cells_render_without_a_date() {
        assert_eq!(render_date_cell(0.5).as_deref(), Some("12:00:00"));
        assert_eq!(render_date_cell(0.75).as_deref(), Some("18:00:00"));
    }

    #[test]
    fn out_of_range_serials_stay_numeric() {
        assert_eq!(
            cell_to_value(&DataType::DateTime(-1e300)),
            CellValue::Number(-1e300)
        );
        assert_eq!(
            cell_to_value(&DataType::DateTime(1e300)),
            CellValue::Number(1e300)
        );
        assert!(excel_serial_to_datetime(f64::NAN).is_none());
        assert!(excel_serial_to_datetime(-1.0).is_none());
    }
}
