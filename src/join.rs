use std::collections::BTreeMap;

use crate::{MonthKey, Totals};

/// What each dataset contributed to one key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joined {
    pub rainfall: Option<f64>,
    pub cases: Option<f64>,
}

impl Joined {
    /// Both sides present. A total of exactly zero still counts as present.
    pub fn is_complete(&self) -> bool {
        self.rainfall.is_some() && self.cases.is_some()
    }
}

/// Every key of either dataset with whatever each side has for it.
pub fn full_outer(rainfall: &Totals, cases: &Totals) -> BTreeMap<MonthKey, Joined> {
    let mut joined: BTreeMap<MonthKey, Joined> = BTreeMap::new();

    for (key, value) in rainfall.iter() {
        joined.entry(key.clone()).or_default().rainfall = Some(*value);
    }

    for (key, value) in cases.iter() {
        joined.entry(key.clone()).or_default().cases = Some(*value);
    }

    joined
}

/// Keys present in both datasets, in key order. Anything only one side
/// reported is dropped.
pub fn join(rainfall: &Totals, cases: &Totals) -> Vec<(MonthKey, Joined)> {
    full_outer(rainfall, cases)
        .into_iter()
        .filter(|(_, j)| j.is_complete())
        .collect()
}
