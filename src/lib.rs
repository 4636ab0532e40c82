//! Joins monthly disease-case counts with monthly rainfall totals per region.
//!
//! Both datasets are reduced to totals keyed by `REGION-YEAR-MONTH`, the two
//! sets of totals are joined on that key and every key present on both sides
//! becomes one `;`-delimited line of the report.
mod aggregate;
mod cases;
mod config;
mod error;
mod format;
mod headers;
mod input;
mod join;
mod key;
mod parser;
mod rainfall;

pub mod flush;
pub mod logging;
pub mod pipeline;

pub use aggregate::{Aggregate, Reducer, Sum, Totals};
pub use cases::{CaseAggregator, CaseRecord, CASE_COLUMNS};
pub use config::{Config, OnMalformed};
pub use error::{Error, Result, RowResult};
pub use format::{format_number, OutputRow, HEADER};
pub use headers::{get_field, Headers};
pub use input::{encoding_for, ReaderSource};
pub use join::{full_outer, join, Joined};
pub use key::{year_month, KeySource, MonthKey};
pub use parser::split_line;
pub use rainfall::{clamp, round_tenths, RainfallAggregator, RainfallRecord};

pub type Row = csv::StringRecord;

/// Line number of a row in its source, or zero for rows built in memory.
pub(crate) fn line_of(row: &Row) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}
