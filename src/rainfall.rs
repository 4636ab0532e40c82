use tracing::{debug, warn};

use crate::{
    line_of, Error, KeySource, MonthKey, OnMalformed, Reducer, Result, Row, RowResult, Sum,
    Totals,
};

/// A positional `(date, millimeters, state)` reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallRecord {
    date: String,
    millimeters: f64,
    state: String,
}

impl RainfallRecord {
    pub fn from_row(row: &Row) -> Result<RainfallRecord> {
        if row.len() != 3 {
            return Err(Error::FieldCount {
                line: line_of(row),
                expected: 3,
                found: row.len(),
            });
        }

        let mm = &row[1];
        let millimeters = mm.trim().parse().map_err(|_| Error::InvalidNumber {
            line: line_of(row),
            field: "mm",
            value: mm.to_string(),
        })?;

        Ok(RainfallRecord {
            date: row[0].to_string(),
            millimeters,
            state: row[2].to_string(),
        })
    }

    /// The reading as found in the source, negative values included.
    pub fn millimeters(&self) -> f64 {
        self.millimeters
    }
}

impl KeySource for RainfallRecord {
    fn region(&self) -> &str {
        &self.state
    }

    fn date(&self) -> &str {
        &self.date
    }
}

/// Negative readings are sentinel or error values in the source data and
/// count as no rain.
pub fn clamp(mm: f64) -> f64 {
    if mm < 0.0 {
        0.0
    } else {
        mm
    }
}

/// Rounds to one decimal place from the exact value the float holds, ties
/// to even: `252.25` becomes `252.2`, while `2.45`, stored slightly above
/// the tie, becomes `2.5`.
pub fn round_tenths(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Sums clamped rainfall per `STATE-YEAR-MONTH`, then rounds each total.
pub struct RainfallAggregator {
    on_malformed: OnMalformed,
    inspect: bool,
}

impl RainfallAggregator {
    pub fn new(on_malformed: OnMalformed) -> RainfallAggregator {
        RainfallAggregator {
            on_malformed,
            inspect: false,
        }
    }

    /// Logs every aggregated total at debug level.
    pub fn inspect(mut self, inspect: bool) -> RainfallAggregator {
        self.inspect = inspect;
        self
    }

    pub fn aggregate<I>(&self, rows: I) -> Result<Totals>
    where
        I: IntoIterator<Item = RowResult>,
    {
        let mut reducer: Reducer<Sum> = Reducer::new();

        for result in rows {
            let row = result?;

            match RainfallRecord::from_row(&row) {
                Ok(record) => {
                    reducer.update(MonthKey::derive(&record), clamp(record.millimeters()))
                }
                Err(e) => match self.on_malformed {
                    OnMalformed::Abort => return Err(e),
                    OnMalformed::Skip => {
                        warn!(error = %e, "skipping rainfall row");
                        reducer.skip();
                    }
                },
            }
        }

        let totals = reducer.totals().map_values(round_tenths);

        if self.inspect {
            for (key, total) in totals.iter() {
                debug!(key = %key, total, "rainfall");
            }
        }

        Ok(totals)
    }
}
