//! Frequency primitives shared by every "most common" statistic.

use std::collections::BTreeMap;

use serde::Serialize;

/// The most frequent value of a collection.
///
/// Among values sharing the highest count the smallest one under `Ord` wins;
/// `tie_broken` records that other values had the same count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
    pub tie_broken: bool,
}

impl<T> Mode<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mode<U> {
        Mode {
            value: f(self.value),
            count: self.count,
            tie_broken: self.tie_broken,
        }
    }
}

/// Returns `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<Mode<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<Mode<T>> = None;
    // Ascending key order, so only a strictly higher count replaces the leader.
    for (value, count) in counts {
        let replace = best.as_ref().is_none_or(|b| count > b.count);
        if replace {
            best = Some(Mode {
                value,
                count,
                tie_broken: false,
            });
        } else if let Some(b) = best.as_mut() {
            if count == b.count {
                b.tie_broken = true;
            }
        }
    }
    best
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts every distinct value. Rows are ordered by descending count, then
/// by ascending value.
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut table: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the ascending value order within equal counts.
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}
