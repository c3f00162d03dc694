//! Aggregations over records: extent, mean, median, year filtering and
//! grouping by country.
//!
//! Every function accepts anything that iterates `&Record`, so both a
//! [`Dataset`] and a [`FilteredDataset`] can be passed by reference.
//! Functions that are undefined on empty input return `None`.

use crate::models::{CountryGroups, Dataset, FilteredDataset, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bar ordering applied before the band scale is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep dataset order.
    #[default]
    None,
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

/// Summary statistics for a record sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// `(min, max)` of `key` over the records. Incomparable keys (NaN) are skipped.
pub fn extent<'a, I, K, F>(records: I, key: F) -> Option<(K, K)>
where
    I: IntoIterator<Item = &'a Record>,
    K: PartialOrd + Copy,
    F: Fn(&Record) -> K,
{
    let mut out: Option<(K, K)> = None;
    for r in records {
        let k = key(r);
        if k.partial_cmp(&k).is_none() {
            continue;
        }
        out = Some(match out {
            None => (k, k),
            Some((lo, hi)) => (
                if k < lo { k } else { lo },
                if k > hi { k } else { hi },
            ),
        });
    }
    out
}

pub fn min<'a, I, K, F>(records: I, key: F) -> Option<K>
where
    I: IntoIterator<Item = &'a Record>,
    K: PartialOrd + Copy,
    F: Fn(&Record) -> K,
{
    extent(records, key).map(|(lo, _)| lo)
}

pub fn max<'a, I, K, F>(records: I, key: F) -> Option<K>
where
    I: IntoIterator<Item = &'a Record>,
    K: PartialOrd + Copy,
    F: Fn(&Record) -> K,
{
    extent(records, key).map(|(_, hi)| hi)
}

/// Arithmetic mean; `None` when there is nothing to average.
pub fn mean<'a, I, F>(records: I, key: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> f64,
{
    let (sum, n) = records
        .into_iter()
        .map(key)
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Median; for an even count the mean of the two middle values.
pub fn median<'a, I, F>(records: I, key: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> f64,
{
    let mut vals: Vec<f64> = records
        .into_iter()
        .map(key)
        .filter(|v| !v.is_nan())
        .collect();
    sorted_median(&mut vals)
}

fn sorted_median(vals: &mut [f64]) -> Option<f64> {
    vals.sort_by(|a, b| a.total_cmp(b));
    let n = vals.len();
    if n == 0 {
        None
    } else if n % 2 == 1 {
        Some(vals[n / 2])
    } else {
        Some((vals[n / 2 - 1] + vals[n / 2]) / 2.0)
    }
}

/// All records of `year`, in dataset order.
pub fn filter_by_year(dataset: &Dataset, year: i32) -> FilteredDataset<'_> {
    FilteredDataset::new(year, dataset.iter().filter(|r| r.year() == year).collect())
}

/// Stable partition by country: groups appear in first-seen order and keep
/// the input order of their records.
pub fn group_by_country<'a, I>(records: I) -> CountryGroups<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = CountryGroups::default();
    for r in records {
        groups.push(r);
    }
    groups
}

/// Distinct country labels in first-seen order.
pub fn distinct_countries<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Record>,
{
    group_by_country(records).countries()
}

/// Distinct years, ascending.
pub fn years<'a, I>(records: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ys: Vec<i32> = records.into_iter().map(Record::year).collect();
    ys.sort_unstable();
    ys.dedup();
    ys
}

pub fn latest_year<'a, I>(records: I) -> Option<i32>
where
    I: IntoIterator<Item = &'a Record>,
{
    max(records, Record::year)
}

/// Reorder records by value. `SortOrder::None` keeps the current order.
pub fn sort_by_value(records: &mut [&Record], order: SortOrder) {
    let by_value = |a: &&Record, b: &&Record| -> Ordering { a.value().total_cmp(&b.value()) };
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => records.sort_by(by_value),
        SortOrder::Descending => records.sort_by(|a, b| by_value(b, a)),
    }
}

/// Count, min, max, mean and median of the record values.
pub fn summarize<'a, I>(records: I) -> Option<Summary>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut vals: Vec<f64> = records.into_iter().map(Record::value).collect();
    let count = vals.len();
    let median = sorted_median(&mut vals)?;
    Some(Summary {
        count,
        min: vals[0],
        max: vals[count - 1],
        mean: vals.iter().sum::<f64>() / count as f64,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, year: i32, value: f64) -> Record {
        Record::new("XX", country, year, value).unwrap()
    }

    #[test]
    fn extent_skips_nan_keys() {
        let rows = vec![rec("A", 2020, 3.0), rec("B", 2020, 1.0)];
        let got = extent(&rows, |r| if r.country() == "A" { f64::NAN } else { r.value() });
        assert_eq!(got, Some((1.0, 1.0)));
    }

    #[test]
    fn empty_input_is_none() {
        let rows: Vec<Record> = Vec::new();
        assert_eq!(extent(&rows, Record::value), None);
        assert_eq!(mean(&rows, Record::value), None);
        assert_eq!(median(&rows, Record::value), None);
        assert_eq!(summarize(&rows), None);
        assert_eq!(latest_year(&rows), None);
    }

    #[test]
    fn sorting_is_stable_for_ties() {
        let rows = vec![rec("A", 2020, 2.0), rec("B", 2020, 1.0), rec("C", 2020, 2.0)];
        let mut view: Vec<&Record> = rows.iter().collect();
        sort_by_value(&mut view, SortOrder::Descending);
        let names: Vec<&str> = view.iter().map(|r| r.country()).collect();
        assert_eq!(names, ["A", "C", "B"]);
    }
}
