//! Load `geo,country,year,value` tables from delimited text.
//!
//! Strict by default: the first bad row aborts the load. With
//! [`LoadOptions::skip_invalid_rows`] each bad row is rejected on its own and
//! logged; values are never coerced to zero.

use crate::error::{Error, Result};
use crate::models::{Dataset, Record};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every input must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["geo", "country", "year", "value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub skip_invalid_rows: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_invalid_rows: false,
        }
    }
}

/// Load a dataset from a CSV file (strict).
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    load_csv_with(path, &LoadOptions::default())
}

pub fn load_csv_with<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = read_csv_with(file, opts)?;
    info!("loaded {} records from {}", data.len(), path.display());
    Ok(data)
}

/// Parse a dataset from any reader (strict).
pub fn read_csv<R: Read>(rdr: R) -> Result<Dataset> {
    read_csv_with(rdr, &LoadOptions::default())
}

pub fn read_csv_with<R: Read>(rdr: R, opts: &LoadOptions) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(rdr);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(Error::MissingColumn(REQUIRED_COLUMNS[0]));
    }
    let cols = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut rejected = 0usize;
    for row in rdr.records() {
        let parsed = row.map_err(Error::from).and_then(|row| cols.parse(&row));
        match parsed {
            Ok(rec) => records.push(rec),
            Err(e) if opts.skip_invalid_rows && !matches!(e, Error::Csv(_)) => {
                warn!("skipping row: {e}");
                rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }
    if rejected > 0 {
        warn!("rejected {rejected} invalid row(s), kept {}", records.len());
    }
    Ok(Dataset::new(records))
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    geo: usize,
    country: usize,
    year: usize,
    value: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or(Error::MissingColumn(name))
        };
        Ok(Self {
            geo: find("geo")?,
            country: find("country")?,
            year: find("year")?,
            value: find("value")?,
        })
    }

    fn parse(&self, row: &StringRecord) -> Result<Record> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize, column: &'static str| {
            row.get(idx).ok_or_else(|| Error::Parse {
                line,
                column,
                value: String::new(),
                reason: "field missing".into(),
            })
        };

        let geo = field(self.geo, "geo")?;
        let country = field(self.country, "country")?;

        let year_raw = field(self.year, "year")?;
        let year = year_raw.trim().parse::<i32>().map_err(|e| Error::Parse {
            line,
            column: "year",
            value: year_raw.to_string(),
            reason: e.to_string(),
        })?;

        let value_raw = field(self.value, "value")?;
        let value = value_raw.trim().parse::<f64>().map_err(|e| Error::Parse {
            line,
            column: "value",
            value: value_raw.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() {
            return Err(Error::Parse {
                line,
                column: "value",
                value: value_raw.to_string(),
                reason: "not a finite number".into(),
            });
        }

        Record::new(geo, country, year, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_may_come_in_any_order() {
        let txt = "value,year,extra,country,geo\n3.5,2019,x,Germany,DE\n";
        let data = read_csv(txt.as_bytes()).unwrap();
        assert_eq!(data.len(), 1);
        let r = &data.records()[0];
        assert_eq!(r.geo(), "DE");
        assert_eq!(r.country(), "Germany");
        assert_eq!(r.year(), 2019);
        assert_eq!(r.value(), 3.5);
    }

    #[test]
    fn empty_value_is_an_error_not_zero() {
        let txt = "geo,country,year,value\nFR,France,2020,\n";
        let err = read_csv(txt.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { column: "value", line: 2, .. }), "{err}");
    }

    #[test]
    fn lenient_mode_drops_only_bad_rows() {
        let txt = "geo,country,year,value\nFR,France,2020,15.8\nAT,Austria,20x0,18.8\nDE,Germany,2020,NaN\nBE,Belgium,2020,5.3\n";
        let opts = LoadOptions {
            skip_invalid_rows: true,
            ..LoadOptions::default()
        };
        let data = read_csv_with(txt.as_bytes(), &opts).unwrap();
        let names: Vec<&str> = data.iter().map(|r| r.country()).collect();
        assert_eq!(names, ["France", "Belgium"]);
    }
}
