use std::io;
use std::result;

use crate::Row;

/// An error found somewhere in the report pipeline.
#[derive(Debug)]
pub enum Error {
    Csv(csv::Error),
    Io(io::Error),
    /// A field that must hold a number could not be parsed as one.
    InvalidNumber { line: u64, field: &'static str, value: String },
    /// A positional row had the wrong number of fields.
    FieldCount { line: u64, expected: usize, found: usize },
    /// A key string did not have the `REGION-YEAR-MONTH` shape.
    InvalidKey(String),
    UnknownEncoding(String),
}

pub type Result<T> = result::Result<T, Error>;

/// The type that actually flows from the sources into the aggregators. Either
/// a row or an error.
pub type RowResult = result::Result<Row, Error>;

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Error {
        Error::Csv(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Csv(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::Csv(ref e) => write!(f, "CSV error: {}", e),
            Error::Io(ref e) => write!(f, "I/O error: {}", e),
            Error::InvalidNumber { line, field, ref value } => {
                write!(f, "line {}: field {} is not a number: {:?}", line, field, value)
            }
            Error::FieldCount { line, expected, found } => write!(
                f,
                "line {}: expected {} fields but found {}",
                line, expected, found
            ),
            Error::InvalidKey(ref k) => write!(f, "malformed aggregation key: {:?}", k),
            Error::UnknownEncoding(ref e) => write!(f, "unknown text encoding: {}", e),
        }
    }
}
