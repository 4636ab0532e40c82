use crate::{Joined, MonthKey, Row};

/// Column names of the report, written once before the first row.
pub const HEADER: [&str; 5] = ["UF", "ANO", "MES", "CHUVA", "DENGUE"];

/// Renders a float the way the report has always shown them: whole numbers
/// keep one decimal (`3.0`), anything else uses the shortest representation
/// that reads back as the same value (`252.2`).
///
/// Magnitudes from `1e16` up and below `1e-4` switch to exponent notation
/// with a signed, two digit exponent: `1e+16`, `1.5e-05`.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();

    if value.is_finite() && value != 0.0 && (magnitude >= 1e16 || magnitude < 1e-4) {
        return exponent_form(value);
    }

    let s = value.to_string();

    if value.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

fn exponent_form(value: f64) -> String {
    let s = format!("{:e}", value);
    let (mantissa, exponent) = match s.find('e') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => return s,
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };

    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// One line of the report: `(state, year, month, rainfall, cases)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    state: String,
    year: String,
    month: String,
    rainfall: String,
    cases: String,
}

impl OutputRow {
    /// Returns `None` unless both datasets contributed to `key`.
    pub fn from_joined(key: &MonthKey, joined: &Joined) -> Option<OutputRow> {
        match (joined.rainfall, joined.cases) {
            (Some(rainfall), Some(cases)) => Some(OutputRow {
                state: key.region().to_string(),
                year: key.year().to_string(),
                month: key.month().to_string(),
                rainfall: format_number(rainfall),
                cases: format_number(cases),
            }),
            _ => None,
        }
    }

    pub fn fields(&self) -> [&str; 5] {
        [
            self.state.as_str(),
            self.year.as_str(),
            self.month.as_str(),
            self.rainfall.as_str(),
            self.cases.as_str(),
        ]
    }

    pub fn as_row(&self) -> Row {
        Row::from(self.fields().to_vec())
    }

    /// Joins the fields with `delimiter`. Nothing is escaped: none of the
    /// fields can contain the delimiter.
    pub fn to_line(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();

        self.fields().join(sep.as_str())
    }
}
