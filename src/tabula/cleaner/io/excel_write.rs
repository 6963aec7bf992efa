use rust_xlsxwriter::{Format, Workbook};

use crate::tabula::cleaner::error::Result;
use crate::tabula::cleaner::model::CleanTable;

/// Name of the single worksheet written for a cleaned table.
pub const SHEET_NAME: &str = "Sheet1";

/// Serializes the table as an `.xlsx` workbook with a bold header row and no
/// index column.
pub fn write_workbook(table: &CleanTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col_idx, column) in table.columns.iter().enumerate() {
        let col_idx = col_idx as u16;
        worksheet.write_string_with_format(0, col_idx, &column.name, &header_format)?;

        for (row_idx, value) in column.values.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
