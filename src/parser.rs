use super::Row;

/// Splits a raw line on `delimiter`.
///
/// Fields are kept exactly as they appear: no trimming, no unquoting and no
/// type coercion. An empty line yields a single empty field.
pub fn split_line(line: &str, delimiter: char) -> Row {
    let mut row = Row::with_capacity(line.len(), 1);

    for field in line.split(delimiter) {
        row.push_field(field);
    }

    row
}
