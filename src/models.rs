use crate::error::{Error, Result};
use ahash::AHashMap;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One observation (one row = one country in one year).
///
/// Fields are only reachable through accessors; a record never changes after
/// `Record::new` has derived its date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Record {
    geo: String,
    country: String,
    year: i32,
    value: f64,
    date: NaiveDate,
}

impl Record {
    pub fn new(
        geo: impl Into<String>,
        country: impl Into<String>,
        year: i32,
        value: f64,
    ) -> Result<Self> {
        let date = year_to_date(year).ok_or(Error::InvalidYear(year))?;
        Ok(Self {
            geo: geo.into(),
            country: country.into(),
            year,
            value,
            date,
        })
    }

    pub fn geo(&self) -> &str {
        &self.geo
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// January 1 of `year`.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Parse a year-only string (e.g. `"2020"`) into January 1 of that year.
pub fn parse_year(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok()
}

/// Format a year as four digits and parse it back with the year-only rule.
pub fn year_to_date(year: i32) -> Option<NaiveDate> {
    if !(0..=9999).contains(&year) {
        return None;
    }
    parse_year(&format!("{year:04}"))
}

/// Inverse of [`year_to_date`].
pub fn date_to_year(date: NaiveDate) -> i32 {
    date.year()
}

/// All records of one load, in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Borrowed subsequence of a [`Dataset`] holding one year's records.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredDataset<'a> {
    year: i32,
    records: Vec<&'a Record>,
}

impl<'a> FilteredDataset<'a> {
    pub(crate) fn new(year: i32, records: Vec<&'a Record>) -> Self {
        Self { year, records }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a Record>> {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'b, 'a> IntoIterator for &'b FilteredDataset<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

/// Records of a single country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGroup<'a> {
    pub country: &'a str,
    pub records: Vec<&'a Record>,
}

/// Records partitioned by country; groups keep first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CountryGroups<'a> {
    groups: Vec<CountryGroup<'a>>,
    index: AHashMap<&'a str, usize>,
}

impl<'a> CountryGroups<'a> {
    pub(crate) fn push(&mut self, record: &'a Record) {
        let country = record.country();
        match self.index.get(country) {
            Some(&i) => self.groups[i].records.push(record),
            None => {
                self.index.insert(country, self.groups.len());
                self.groups.push(CountryGroup {
                    country,
                    records: vec![record],
                });
            }
        }
    }

    pub fn get(&self, country: &str) -> Option<&CountryGroup<'a>> {
        self.index.get(country).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryGroup<'a>> {
        self.groups.iter()
    }

    pub fn countries(&self) -> Vec<&'a str> {
        self.groups.iter().map(|g| g.country).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for CountryGroups<'a> {
    type Item = CountryGroup<'a>;
    type IntoIter = std::vec::IntoIter<CountryGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_january_first() {
        let r = Record::new("FR", "France", 2020, 15.8).unwrap();
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn year_round_trips_through_date() {
        for year in [0, 7, 999, 1999, 2020, 9999] {
            let d = year_to_date(year).unwrap();
            assert_eq!(d.format("%Y").to_string(), format!("{year:04}"));
            assert_eq!(date_to_year(d), year);
            assert_eq!(parse_year(&d.format("%Y").to_string()), Some(d));
        }
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        assert!(matches!(
            Record::new("XX", "Nowhere", -5, 1.0),
            Err(Error::InvalidYear(-5))
        ));
        assert!(parse_year("20x0").is_none());
        assert!(parse_year("").is_none());
    }
}
