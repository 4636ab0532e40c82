use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Something that carries a region code and a `YYYY-MM-DD...` date, from
/// which a [MonthKey] can be derived.
pub trait KeySource {
    fn region(&self) -> &str;

    fn date(&self) -> &str;

    /// `YYYY-MM` of [KeySource::date]. Sources that already hold it can
    /// hand it out instead of rebuilding it.
    fn year_month(&self) -> Cow<'_, str> {
        Cow::Owned(year_month(self.date()))
    }
}

/// Joins the first two dash separated segments of a date with a dash.
///
/// Missing segments are taken as empty strings, so `"2015"` gives `"2015-"`
/// and the result always has exactly one dash.
pub fn year_month(date: &str) -> String {
    let (year, month) = split_date(date);

    format!("{}-{}", year, month)
}

fn split_date(date: &str) -> (&str, &str) {
    let mut pieces = date.split('-');
    let year = pieces.next().unwrap_or("");
    let month = pieces.next().unwrap_or("");

    (year, month)
}

/// The `REGION-YEAR-MONTH` bucket both datasets are aggregated by.
///
/// Every key is built by [MonthKey::derive], so case records and rainfall
/// records with the same region and month always render the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    region: String,
    year: String,
    month: String,
}

impl MonthKey {
    pub fn derive<S: KeySource + ?Sized>(source: &S) -> MonthKey {
        let year_month = source.year_month();
        let (year, month) = year_month.split_once('-').unwrap_or((year_month.as_ref(), ""));

        MonthKey {
            region: source.region().to_string(),
            year: year.to_string(),
            month: month.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn month(&self) -> &str {
        &self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.region, self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(key: &str) -> Result<MonthKey, Self::Err> {
        let pieces: Vec<&str> = key.splitn(3, '-').collect();

        if pieces.len() != 3 {
            return Err(Error::InvalidKey(key.to_string()));
        }

        Ok(MonthKey {
            region: pieces[0].to_string(),
            year: pieces[1].to_string(),
            month: pieces[2].to_string(),
        })
    }
}
