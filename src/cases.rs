use regex::Regex;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::{
    get_field, key::year_month, line_of, Error, Headers, KeySource, MonthKey, OnMalformed,
    Reducer, Result, Row, RowResult, Sum, Totals,
};

/// Column order of the case dataset.
pub const CASE_COLUMNS: [&str; 9] = [
    "id",
    "data_iniSE",
    "casos",
    "ibge_code",
    "cidade",
    "uf",
    "cep",
    "latitude",
    "longitude",
];

const DATE: &str = "data_iniSE";
const COUNT: &str = "casos";
const REGION: &str = "uf";

/// One case report, its positional fields labeled by [CASE_COLUMNS].
///
/// Fields beyond the known columns are unreachable and columns past the end
/// of a short row read as absent.
#[derive(Debug)]
pub struct CaseRecord<'h> {
    headers: &'h Headers,
    row: Row,
    year_month: String,
}

impl<'h> CaseRecord<'h> {
    pub fn label(headers: &'h Headers, row: Row) -> CaseRecord<'h> {
        let year_month = year_month(get_field(headers, &row, DATE).unwrap_or(""));

        CaseRecord {
            headers,
            row,
            year_month,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        get_field(self.headers, &self.row, column)
    }

    /// The raw case count, which may be empty or not a number at all.
    pub fn count(&self) -> &str {
        self.get(COUNT).unwrap_or("")
    }

    pub fn line(&self) -> u64 {
        line_of(&self.row)
    }
}

impl<'h> KeySource for CaseRecord<'h> {
    fn region(&self) -> &str {
        self.get(REGION).unwrap_or("")
    }

    fn date(&self) -> &str {
        self.get(DATE).unwrap_or("")
    }

    /// Computed once, when the record was labeled.
    fn year_month(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.year_month)
    }
}

/// Sums case counts per `REGION-YEAR-MONTH`.
pub struct CaseAggregator {
    headers: Headers,
    digit: Regex,
    on_malformed: OnMalformed,
    inspect: bool,
}

impl CaseAggregator {
    pub fn new(on_malformed: OnMalformed) -> CaseAggregator {
        CaseAggregator {
            headers: Headers::from_columns(&CASE_COLUMNS),
            digit: Regex::new(r"\d").expect("digit pattern is valid"),
            on_malformed,
            inspect: false,
        }
    }

    /// Logs every aggregated total at debug level.
    pub fn inspect(mut self, inspect: bool) -> CaseAggregator {
        self.inspect = inspect;
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Reads a case count. A field without a single digit counts as zero;
    /// `None` means it has digits but still is not a number.
    pub fn count(&self, value: &str) -> Option<f64> {
        if self.digit.is_match(value) {
            value.trim().parse().ok()
        } else {
            Some(0.0)
        }
    }

    pub fn aggregate<I>(&self, rows: I) -> Result<Totals>
    where
        I: IntoIterator<Item = RowResult>,
    {
        let mut reducer: Reducer<Sum> = Reducer::new();

        for result in rows {
            let record = CaseRecord::label(&self.headers, result?);

            match self.count(record.count()) {
                Some(count) => reducer.update(MonthKey::derive(&record), count),
                None => match self.on_malformed {
                    OnMalformed::Abort => {
                        return Err(Error::InvalidNumber {
                            line: record.line(),
                            field: COUNT,
                            value: record.count().to_string(),
                        })
                    }
                    OnMalformed::Skip => {
                        warn!(
                            line = record.line(),
                            value = record.count(),
                            "skipping case row with unreadable count"
                        );
                        reducer.skip();
                    }
                },
            }
        }

        let totals = reducer.totals();

        if self.inspect {
            for (key, total) in totals.iter() {
                debug!(key = %key, total, "cases");
            }
        }

        Ok(totals)
    }
}
