use std::fmt;

use crate::error::{VizError, VizResult};

// ---------------------------------------------------------------------------
// CellValue – a single parsed cell
// ---------------------------------------------------------------------------

/// Tokens read as missing values, matching the Pandas defaults.
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#NA", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// A dynamically-typed cell as read from the upload.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Interpret one raw field.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if MISSING_TOKENS.contains(&s) {
            return CellValue::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column with its runtime type
// ---------------------------------------------------------------------------

/// Column storage, typed once at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Every present cell parsed as a number.
    Numeric(Vec<Option<f64>>),
    /// At least one present cell is text; numbers are kept as written.
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    /// Build a column from parsed cells, choosing numeric storage when no
    /// cell is text.
    pub fn from_cells(name: &str, cells: Vec<(CellValue, String)>) -> Self {
        let numeric = cells
            .iter()
            .all(|(c, _)| !matches!(c, CellValue::Text(_)));

        let kind = if numeric {
            ColumnKind::Numeric(cells.iter().map(|(c, _)| c.as_f64()).collect())
        } else {
            ColumnKind::Text(
                cells
                    .into_iter()
                    .map(|(c, raw)| match c {
                        CellValue::Missing => None,
                        _ => Some(raw),
                    })
                    .collect(),
            )
        };

        Column {
            name: name.to_string(),
            kind,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Numeric(_))
    }

    /// The cell at `row`, or `Missing` when out of range.
    pub fn cell(&self, row: usize) -> CellValue {
        match &self.kind {
            ColumnKind::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) => CellValue::Number(x),
                None => CellValue::Missing,
            },
            ColumnKind::Text(v) => match v.get(row).cloned().flatten() {
                Some(s) => CellValue::Text(s),
                None => CellValue::Missing,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded upload
// ---------------------------------------------------------------------------

/// Name of the horizontal spatial coordinate column.
pub const X_COLUMN: &str = "X";
/// Name of the vertical spatial coordinate column.
pub const Y_COLUMN: &str = "Y";

/// Rows × named columns. `x`/`y` hold the validated spatial coordinates of
/// every row; the `X`/`Y` columns are also kept in `columns` so the header
/// order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Table {
    /// Column names in header order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> VizResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| VizError::ColumnNotFound(name.to_string()))
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.x.len()
    }

    /// `[min, max]` of `X` over every row.
    pub fn x_range(&self) -> [f64; 2] {
        min_max(&self.x)
    }

    /// `[min, max]` of `Y` over every row.
    pub fn y_range(&self) -> [f64; 2] {
        min_max(&self.y)
    }
}

fn min_max(values: &[f64]) -> [f64; 2] {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    [min, max]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_parse() {
        assert_eq!(CellValue::parse("1.5"), CellValue::Number(1.5));
        assert_eq!(CellValue::parse("-3"), CellValue::Number(-3.0));
        assert_eq!(CellValue::parse("NaN"), CellValue::Missing);
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("CD8+"), CellValue::Text("CD8+".to_string()));
    }

    #[test]
    fn test_column_inference() {
        let numeric = Column::from_cells(
            "a",
            vec![
                (CellValue::parse("1"), "1".to_string()),
                (CellValue::parse("NA"), "NA".to_string()),
            ],
        );
        assert!(numeric.is_numeric());
        assert_eq!(numeric.cell(0), CellValue::Number(1.0));
        assert_eq!(numeric.cell(1), CellValue::Missing);

        let text = Column::from_cells(
            "b",
            vec![
                (CellValue::parse("1"), "1".to_string()),
                (CellValue::parse("x"), "x".to_string()),
            ],
        );
        assert!(!text.is_numeric());
        assert_eq!(text.cell(0), CellValue::Text("1".to_string()));
    }

    #[test]
    fn test_column_lookup() {
        let table = Table {
            columns: vec![Column {
                name: "A".to_string(),
                kind: ColumnKind::Numeric(vec![Some(1.0)]),
            }],
            x: vec![0.0],
            y: vec![0.0],
        };
        assert!(table.column("A").is_ok());
        assert!(matches!(
            table.column("B"),
            Err(VizError::ColumnNotFound(name)) if name == "B"
        ));
    }
}
