use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::tabula::cleaner::error::Result;
use crate::tabula::cleaner::model::CleanTable;

/// One row of a table serialized as a JSON object keyed by column name, in
/// column order.
struct RowRecord<'a> {
    names: &'a [&'a str],
    values: &'a [&'a str],
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, value) in self.names.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serializes the table as newline-delimited JSON records, one object per row.
pub fn write_json_lines(table: &CleanTable) -> Result<Vec<u8>> {
    let names = table.column_names();
    let mut buffer = Vec::new();

    for row in table.rows() {
        let record = RowRecord {
            names: &names,
            values: &row,
        };
        serde_json::to_writer(&mut buffer, &record)?;
        buffer.push(b'\n');
    }

    Ok(buffer)
}
