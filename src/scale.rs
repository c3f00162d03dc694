//! Domain → range mappings used by both charts.
//!
//! Scales are built from a snapshot of records and never updated in place;
//! rebuild them when the record view changes.

use crate::viz::types::Rgb8;
use chrono::{Datelike, NaiveDate};

/// Categorical domain → evenly spaced pixel bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    starts: Vec<f64>,
}

impl BandScale {
    /// Bands in the given domain order (duplicates after the first are dropped).
    pub fn new<S: AsRef<str>>(domain: &[S], range: (f64, f64)) -> Self {
        let mut labels: Vec<String> = Vec::with_capacity(domain.len());
        for d in domain {
            let d = d.as_ref();
            if !labels.iter().any(|l| l == d) {
                labels.push(d.to_string());
            }
        }
        let mut s = Self {
            domain: labels,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            starts: Vec::new(),
        };
        s.rescale();
        s
    }

    /// Fraction of the step left blank between bands, clamped to `[0, 1)`.
    pub fn padding_inner(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0 - f64::EPSILON);
        self.rescale();
        self
    }

    /// Blank space before the first and after the last band, in steps.
    pub fn padding_outer(mut self, p: f64) -> Self {
        self.padding_outer = p.max(0.0);
        self.rescale();
        self
    }

    /// Where leftover space goes: 0 = start, 0.5 = centred, 1 = end.
    pub fn align(mut self, a: f64) -> Self {
        self.align = a.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (lo, hi) = if reverse { (r1, r0) } else { (r0, r1) };
        let span = hi - lo;

        self.step = span / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        let start = lo + (span - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);

        let mut starts: Vec<f64> = (0..self.domain.len())
            .map(|i| start + self.step * i as f64)
            .collect();
        if reverse {
            starts.reverse();
        }
        self.starts = starts;
    }

    /// Start of the band for `label`, `None` if the label is not in the domain.
    pub fn map(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.starts[i])
    }

    /// Centre of the band for `label`.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.map(label).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.domain.iter().position(|d| d == label)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Affine map from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A degenerate domain (`d0 == d1`) maps every value to `range.0`.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Tick spacing for roughly `count` ticks (1, 2 or 5 × 10^k).
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        nice_step((d1 - d0).abs(), count)
    }

    /// Round-valued ticks inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        if lo == hi {
            return vec![lo];
        }
        let step = nice_step(hi - lo, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo, hi];
        }
        // Divide by an integer for fractional steps so decimals stay exact.
        if step >= 1.0 {
            let (first, last) = ((lo / step).ceil() as i64, (hi / step).floor() as i64);
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            let inv = (1.0 / step).round();
            let (first, last) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
            (first..=last).map(|i| i as f64 / inv).collect()
        }
    }
}

/// Step of the form 1, 2 or 5 × 10^k giving about `count` intervals over `span`.
pub fn nice_step(span: f64, count: usize) -> f64 {
    if span <= 0.0 || count == 0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let factor = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Affine map from calendar dates to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let linear = LinearScale::new((day_number(domain.0), day_number(domain.1)), range);
        Self { domain, linear }
    }

    pub fn map(&self, d: NaiveDate) -> f64 {
        self.linear.map(day_number(d))
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range()
    }

    /// January 1 of every `k`th year inside the domain, where `k` is a
    /// 1/2/5 × 10^n step giving at most about `count` ticks.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (a, b) = self.domain;
        let (lo, hi) = if b < a { (b, a) } else { (a, b) };
        let first_year = if lo.ordinal() == 1 { lo.year() } else { lo.year() + 1 };
        let last_year = hi.year();
        if first_year > last_year {
            return Vec::new();
        }
        let span = (last_year - first_year) as f64;
        let step = (nice_step(span, count.max(1)) as i32).max(1);
        let start = first_year.div_euclid(step) * step;
        let start = if start < first_year { start + step } else { start };
        (start..=last_year)
            .step_by(step as usize)
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .collect()
    }
}

fn day_number(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

/// Ordinal colour scale: domain position modulo the palette length.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: Vec<String>,
    palette: Vec<Rgb8>,
}

impl ColorScale {
    pub fn new<S: AsRef<str>>(domain: &[S], palette: &[Rgb8]) -> Self {
        let mut labels: Vec<String> = Vec::with_capacity(domain.len());
        for d in domain {
            let d = d.as_ref();
            if !labels.iter().any(|l| l == d) {
                labels.push(d.to_string());
            }
        }
        Self {
            domain: labels,
            palette: palette.to_vec(),
        }
    }

    /// `None` for labels outside the domain or with an empty palette.
    pub fn map(&self, label: &str) -> Option<Rgb8> {
        if self.palette.is_empty() {
            return None;
        }
        let i = self.domain.iter().position(|d| d == label)?;
        Some(self.palette[i % self.palette.len()])
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}
