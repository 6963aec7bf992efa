use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Raw cell value as produced by the ingestion adapters.
///
/// Spreadsheet cells carry richer types, but everything other than text and
/// numbers is rendered to text at the ingestion boundary so that cleaning only
/// ever sees these three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Textual cell content, untouched.
    Text(String),
    /// Numeric cell content.
    Number(f64),
    /// Empty, null or NaN cell.
    Missing,
}

impl CellValue {
    /// Returns `true` when the cell carries no value at all.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(value) => value.is_nan(),
            CellValue::Text(_) => false,
        }
    }

    /// Renders the cell as text. Missing cells render as an empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(value) => Cow::Borrowed(value.as_str()),
            CellValue::Number(value) => Cow::Owned(format_number(*value)),
            CellValue::Missing => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Formats a number the way a spreadsheet user expects to read it back:
/// integral values lose their fractional part, everything else keeps the
/// shortest decimal form that round-trips.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// A named column of raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

/// Ordered columns aligned by row index, as read from the input file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from a header row and row-major records.
    ///
    /// Header names are made unique with [`unique_names`]; rows shorter than
    /// the header are padded with [`CellValue::Missing`] and longer rows are
    /// truncated, so callers that care about overflow must check first.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let names = unique_names(headers);
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or(CellValue::Missing));
            }
        }

        Self { columns }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|col| col.cells.len()).unwrap_or(0)
    }
}

/// A column whose name is normalized and whose values are cleaned strings.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanColumn {
    pub name: String,
    pub values: Vec<String>,
}

/// Output of the cleaning pipeline, consumed by export and preview.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanTable {
    pub columns: Vec<CleanColumn>,
}

impl CleanTable {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Length of the longest column. Shorter columns read as empty strings
    /// past their end.
    pub fn row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|col| col.values.len())
            .max()
            .unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&CleanColumn> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Returns the values of row `index` in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|col| col.values.get(index).map_or("", String::as_str))
                .collect(),
        )
    }

    /// Iterates rows in order, each row being its values in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count()).filter_map(|index| self.row(index))
    }
}

/// How missing and blank cells are represented after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Replace with the literal `N/A`.
    #[default]
    NotAvailable,
    /// Replace with the empty string.
    Blank,
}

impl FillPolicy {
    pub fn value(&self) -> &'static str {
        match self {
            FillPolicy::NotAvailable => "N/A",
            FillPolicy::Blank => "",
        }
    }
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPolicy::NotAvailable => write!(f, "N/A"),
            FillPolicy::Blank => write!(f, "blank"),
        }
    }
}

/// Names blank headers `Unnamed: <position>` and suffixes repeated headers
/// with `.1`, `.2`, ... in order of appearance.
pub fn unique_names(headers: Vec<String>) -> Vec<String> {
    let named = headers
        .into_iter()
        .enumerate()
        .map(|(position, header)| {
            if header.trim().is_empty() {
                format!("Unnamed: {position}")
            } else {
                header
            }
        })
        .collect();
    dedupe_names(named)
}

/// Suffixes repeated names with `.1`, `.2`, ... keeping the first occurrence
/// as is.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len());

    for base in names {
        let mut candidate = base.clone();
        let mut counter = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{counter}");
            counter += 1;
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}
