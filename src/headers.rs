use csv::StringRecordIter;
use std::collections::HashMap;

use super::Row;

/// A structure for keeping relationship between the column names and their
/// positions. Used to label positional rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    indexes: HashMap<String, usize>,
    names: Row,
}

impl Headers {
    pub fn from_row(row: Row) -> Headers {
        let mut indexes = HashMap::new();

        for (index, entry) in row.iter().enumerate() {
            indexes.insert(entry.to_string(), index);
        }

        Headers {
            indexes,
            names: row,
        }
    }

    pub fn from_columns(columns: &[&str]) -> Headers {
        Headers::from_row(Row::from(columns.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).copied()
    }

    pub fn iter(&self) -> StringRecordIter {
        self.names.iter()
    }
}

/// Looks up a field of `row` by column name.
///
/// Returns `None` when the column is unknown or when the row is too short to
/// have it. Fields past the last header are never reachable.
pub fn get_field<'r>(headers: &Headers, row: &'r Row, field: &str) -> Option<&'r str> {
    headers.get(field).and_then(|i| row.get(i))
}
