use csv::Writer;

use crate::tabula::cleaner::error::Result;
use crate::tabula::cleaner::model::CleanTable;

/// Serializes the table as comma separated text, header first, no index.
pub fn write_csv(table: &CleanTable) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|error| error.into_error().into())
}
