use std::error::Error;
use std::fmt;
use std::io;

/// Errors produced while ingesting, discretizing, or querying a dataset.
///
/// Every variant is fatal for the run that raised it; the engine never
/// truncates or falls back silently.
#[derive(Debug)]
pub enum MrmrError {
    /// The header line is missing its terminating newline.
    MissingHeaderNewline,
    /// A data row's column count differs from the first row's.
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A token could not be parsed as a numeric value.
    InvalidValue { row: usize, token: String },
    /// A discretized value's magnitude exceeds the code capacity.
    Overflow { line: usize, column: usize },
    /// An attribute's (max - min) range exceeds the code capacity.
    Representation { attribute: String, capacity: i64 },
    /// A caller-supplied index is outside its valid range.
    InvalidIndex { index: usize, bound: usize },
    /// A supplied buffer or name list does not match the declared shape.
    Construction { expected: usize, found: usize },
    Io(io::Error),
}

impl fmt::Display for MrmrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MrmrError::MissingHeaderNewline => {
                write!(f, "missing required newline after header")
            }
            MrmrError::ColumnCount {
                row,
                expected,
                found,
            } => write!(
                f,
                "inconsistent number of columns at row {} (expected {}, found {})",
                row, expected, found
            ),
            MrmrError::InvalidValue { row, token } => {
                write!(f, "invalid value '{}' at row {}", token, row)
            }
            MrmrError::Overflow { line, column } => write!(
                f,
                "integer overflow detected at line {} column {}",
                line, column
            ),
            MrmrError::Representation {
                attribute,
                capacity,
            } => write!(
                f,
                "attribute '{}' cannot be represented within {} buckets under current discretization",
                attribute, capacity
            ),
            MrmrError::InvalidIndex { index, bound } => {
                write!(f, "index {} out of range (bound {})", index, bound)
            }
            MrmrError::Construction { expected, found } => write!(
                f,
                "shape mismatch: expected {} elements, found {}",
                expected, found
            ),
            MrmrError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for MrmrError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MrmrError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MrmrError {
    fn from(err: io::Error) -> Self {
        MrmrError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, MrmrError>;
