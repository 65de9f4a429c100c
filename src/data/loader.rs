use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CellValue, Column, ColumnKind, Table, X_COLUMN, Y_COLUMN};
use crate::error::{VizError, VizResult};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a `.tsv` file on disk.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "tsv" {
        bail!("Unsupported file extension: .{ext} (expected .tsv)");
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table =
        load_tsv(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))?;
    Ok(table)
}

/// Parse tab-separated text with a header row into a [`Table`].
///
/// Every record must have as many fields as the header. `X` and `Y` must be
/// present and numeric on every row.
pub fn load_tsv<R: Read>(reader: R) -> VizResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(VizError::Empty);
    }

    // Column-major scratch: raw text plus its parsed interpretation.
    let mut cells: Vec<Vec<(CellValue, String)>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (col_idx, raw) in record.iter().enumerate() {
            cells[col_idx].push((CellValue::parse(raw), raw.to_string()));
        }
    }

    let n_rows = cells.first().map_or(0, Vec::len);
    if n_rows == 0 {
        return Err(VizError::Empty);
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, col_cells)| Column::from_cells(name, col_cells))
        .collect();

    let x = coordinates(&columns, X_COLUMN)?;
    let y = coordinates(&columns, Y_COLUMN)?;

    log::debug!(
        "Parsed {n_rows} rows, {} columns ({} numeric)",
        columns.len(),
        columns.iter().filter(|c| c.is_numeric()).count()
    );

    Ok(Table { columns, x, y })
}

// ---------------------------------------------------------------------------
// Coordinate validation
// ---------------------------------------------------------------------------

fn coordinates(columns: &[Column], name: &str) -> VizResult<Vec<f64>> {
    let column = columns
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| VizError::MissingCoordinate(name.to_string()))?;

    match &column.kind {
        ColumnKind::Numeric(values) => values
            .iter()
            .enumerate()
            .map(|(row, v)| {
                v.filter(|x| x.is_finite())
                    .ok_or_else(|| VizError::InvalidCoordinate {
                        column: name.to_string(),
                        row,
                        value: column.cell(row).to_string(),
                    })
            })
            .collect(),
        ColumnKind::Text(values) => {
            let (row, value) = values
                .iter()
                .enumerate()
                .find_map(|(row, v)| match v {
                    Some(s) if s.trim().parse::<f64>().is_err() => Some((row, s.clone())),
                    None => Some((row, "<missing>".to_string())),
                    _ => None,
                })
                .unwrap_or((0, String::new()));
            Err(VizError::InvalidCoordinate {
                column: name.to_string(),
                row,
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"Name\tX\tY\tCD3\tPhenotype\n\
        c1\t0.0\t10.0\t1\tT cell\n\
        c2\t5.0\t20.0\t2\tB cell\n\
        c3\t10.0\t30.0\tNA\tT cell\n";

    #[test]
    fn test_load_tsv_basic() {
        let table = load_tsv(SAMPLE).unwrap();
        assert_eq!(table.n_rows(), 3);
        assert_eq!(
            table.column_names(),
            vec!["Name", "X", "Y", "CD3", "Phenotype"]
        );
        assert_eq!(table.x, vec![0.0, 5.0, 10.0]);
        assert_eq!(table.y, vec![10.0, 20.0, 30.0]);

        let cd3 = table.column("CD3").unwrap();
        assert_eq!(cd3.kind, ColumnKind::Numeric(vec![Some(1.0), Some(2.0), None]));
        assert!(!table.column("Phenotype").unwrap().is_numeric());
    }

    #[test]
    fn test_load_tsv_unequal_columns() {
        let data = b"X\tY\tA\n1\t2\t3\n4\t5\n";
        assert!(matches!(load_tsv(&data[..]), Err(VizError::Parse(_))));
    }

    #[test]
    fn test_load_tsv_empty() {
        assert!(matches!(load_tsv(&b""[..]), Err(VizError::Empty)));
        assert!(matches!(load_tsv(&b"X\tY\n"[..]), Err(VizError::Empty)));
    }

    #[test]
    fn test_load_tsv_invalid_utf8() {
        let data = b"X\tY\tA\n1\t2\t\xff\xfe\n";
        assert!(matches!(load_tsv(&data[..]), Err(VizError::Parse(_))));
    }

    #[test]
    fn test_load_tsv_missing_coordinate() {
        let data = b"X\tA\n1\t2\n";
        assert!(matches!(
            load_tsv(&data[..]),
            Err(VizError::MissingCoordinate(c)) if c == "Y"
        ));
    }

    #[test]
    fn test_load_tsv_invalid_coordinate() {
        let data = b"X\tY\n1\t2\n3\tNA\n";
        assert!(matches!(
            load_tsv(&data[..]),
            Err(VizError::InvalidCoordinate { column, row: 1, .. }) if column == "Y"
        ));

        let data = b"X\tY\n1\t2\nabc\t4\n";
        assert!(matches!(
            load_tsv(&data[..]),
            Err(VizError::InvalidCoordinate { column, row: 1, value }) if column == "X" && value == "abc"
        ));
    }

    #[test]
    fn test_load_file_rejects_extension() {
        let err = load_file(Path::new("data.csv")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
