use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a table or building a chart from it.
#[derive(Debug, Error)]
pub enum VizError {
    /// The upload could not be parsed as tab-separated text.
    #[error("parse error: {0}")]
    Parse(String),

    /// The upload has no header or no data rows.
    #[error("the file contains no data")]
    Empty,

    /// A required spatial coordinate column is absent.
    #[error("required coordinate column '{0}' not found")]
    MissingCoordinate(String),

    /// A coordinate cell is missing or not a number.
    #[error("column '{column}' row {row}: coordinate '{value}' is not a number")]
    InvalidCoordinate {
        column: String,
        row: usize,
        value: String,
    },

    /// The selected marker is not a column of the current table.
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// A numeric marker column holds no usable values.
    #[error("column '{0}' has no numeric values")]
    NoValues(String),

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for VizError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return VizError::Parse(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => VizError::Io(io),
            other => VizError::Parse(format!("{other:?}")),
        }
    }
}

pub type VizResult<T> = Result<T, VizError>;
