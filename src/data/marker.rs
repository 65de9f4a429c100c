use std::collections::BTreeMap;

use super::model::{ColumnKind, Table};
use super::stats::ScaleStats;
use crate::error::{VizError, VizResult};

// ---------------------------------------------------------------------------
// Marker classification
// ---------------------------------------------------------------------------

/// A marker column classified once, with everything downstream needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Numeric(NumericMarker),
    Categorical(CategoricalMarker),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericMarker {
    pub column: String,
    pub values: Vec<Option<f64>>,
    pub stats: ScaleStats,
}

/// A text marker with an integer code per distinct value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalMarker {
    pub column: String,
    /// Code of each row's value; `None` for missing cells.
    pub codes: Vec<Option<usize>>,
    /// Distinct values indexed by code.
    labels: Vec<String>,
}

impl Marker {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Marker::Numeric(_))
    }
}

impl CategoricalMarker {
    /// Assign codes to the distinct values of a text column.
    pub fn from_values(column: &str, values: &[Option<String>]) -> Self {
        // BTreeMap keeps the code assignment independent of row order.
        let mut index: BTreeMap<&str, usize> = values
            .iter()
            .flatten()
            .map(|v| (v.as_str(), 0))
            .collect();
        for (code, slot) in index.values_mut().enumerate() {
            *slot = code;
        }

        let codes = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| index.get(s).copied()))
            .collect();
        let labels = index.keys().map(|s| s.to_string()).collect();

        CategoricalMarker {
            column: column.to_string(),
            codes,
            labels,
        }
    }

    /// Number of distinct values.
    pub fn n_levels(&self) -> usize {
        self.labels.len()
    }

    /// Distinct values sorted lexically, each with its code.
    pub fn levels(&self) -> Vec<(usize, &str)> {
        let mut levels: Vec<(usize, &str)> = self
            .labels
            .iter()
            .enumerate()
            .map(|(code, label)| (code, label.as_str()))
            .collect();
        levels.sort_by(|a, b| a.1.cmp(b.1));
        levels
    }
}

/// Classify the column `name` of `table` as numeric or categorical.
pub fn classify(table: &Table, name: &str) -> VizResult<Marker> {
    let column = table.column(name)?;
    let marker = match &column.kind {
        ColumnKind::Numeric(values) => {
            let stats = ScaleStats::from_values(values)
                .ok_or_else(|| VizError::NoValues(name.to_string()))?;
            Marker::Numeric(NumericMarker {
                column: name.to_string(),
                values: values.clone(),
                stats,
            })
        }
        ColumnKind::Text(values) => {
            Marker::Categorical(CategoricalMarker::from_values(name, values))
        }
    };
    log::debug!(
        "Classified '{name}' as {}",
        if marker.is_numeric() { "numeric" } else { "categorical" }
    );
    Ok(marker)
}
