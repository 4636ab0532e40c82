use std::collections::hash_map::{self, HashMap};
use std::fmt::Debug;
use std::iter::FromIterator;

use crate::MonthKey;

/// A running reduction over the values that share a key.
pub trait Aggregate: Default + Debug {
    fn update(&mut self, value: f64);

    fn value(&self) -> f64;
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Sum {
    total: f64,
}

impl Aggregate for Sum {
    fn update(&mut self, value: f64) {
        self.total += value;
    }

    fn value(&self) -> f64 {
        self.total
    }
}

/// Groups values by [MonthKey] and reduces each group with `A`, without ever
/// holding the group's values. Values of one key may arrive in any order.
#[derive(Debug)]
pub struct Reducer<A> {
    groups: HashMap<MonthKey, A>,
    skipped: usize,
}

impl<A: Aggregate> Default for Reducer<A> {
    fn default() -> Reducer<A> {
        Reducer {
            groups: HashMap::new(),
            skipped: 0,
        }
    }
}

impl<A: Aggregate> Reducer<A> {
    pub fn new() -> Reducer<A> {
        Default::default()
    }

    pub fn update(&mut self, key: MonthKey, value: f64) {
        self.groups
            .entry(key)
            .and_modify(|group| group.update(value))
            .or_insert_with(|| {
                let mut g = A::default();

                g.update(value);

                g
            });
    }

    /// Records that one input row was dropped instead of aggregated.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn totals(self) -> Totals {
        Totals {
            values: self
                .groups
                .into_iter()
                .map(|(k, g)| (k, g.value()))
                .collect(),
            skipped: self.skipped,
        }
    }
}

/// The finished reduction of one dataset: one number per key.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Totals {
    values: HashMap<MonthKey, f64>,
    skipped: usize,
}

impl Totals {
    pub fn get(&self, key: &MonthKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, MonthKey, f64> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// How many input rows were dropped under [crate::OnMalformed::Skip].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn map_values<F>(self, mut f: F) -> Totals
    where
        F: FnMut(f64) -> f64,
    {
        Totals {
            values: self.values.into_iter().map(|(k, v)| (k, f(v))).collect(),
            skipped: self.skipped,
        }
    }
}

impl FromIterator<(MonthKey, f64)> for Totals {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(iter: I) -> Self {
        Totals {
            values: iter.into_iter().collect(),
            skipped: 0,
        }
    }
}
