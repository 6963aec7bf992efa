use prettytable::{Cell, Row, Table, format};

use crate::tabula::cleaner::model::CleanTable;

/// Number of rows shown when no explicit count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Renders the header and the first `rows` rows of `table` as a text grid.
pub fn render_preview(table: &CleanTable, rows: usize) -> String {
    let mut grid = Table::new();
    grid.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    grid.set_titles(Row::new(
        table
            .column_names()
            .into_iter()
            .map(|name| Cell::new(name).style_spec("b"))
            .collect(),
    ));

    for row in table.rows().take(rows) {
        grid.add_row(Row::new(row.into_iter().map(Cell::new).collect()));
    }

    grid.to_string()
}
