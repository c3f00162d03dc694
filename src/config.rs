//! Chart configuration: sizes, margins, palette and per-chart options.
//!
//! Defaults reproduce the reference layout (two 900×400 surfaces). Any field
//! may be overridden from a JSON file; missing fields keep their defaults.

use crate::error::{Error, Result};
use crate::stats::SortOrder;
use crate::viz::types::{LIGHT_GREY, LineColors, Margins, Palette, Rgb8};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    /// Locale tag for tick labels (`en`, `de`, ...).
    pub locale: String,
    pub font_size: f64,
    /// Approximate number of ticks on time axes.
    pub x_ticks: usize,
    /// Approximate number of ticks on value axes.
    pub y_ticks: usize,
    /// Value axes start at zero; with this set they reach down to a
    /// negative minimum instead.
    pub extend_below_zero: bool,
    pub bar: BarConfig,
    pub line: LineConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            palette: Palette::default(),
            locale: "en".into(),
            font_size: 10.0,
            x_ticks: 10,
            y_ticks: 10,
            extend_below_zero: false,
            bar: BarConfig::default(),
            line: LineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub margins: Margins,
    /// Share of each step left empty between bars, in `[0, 1)`.
    pub padding_inner: f64,
    pub sort: SortOrder,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            margins: Margins::new(20.0, 40.0, 80.0, 40.0),
            padding_inner: 0.2,
            sort: SortOrder::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub margins: Margins,
    pub colors: LineColors,
    pub flat_color: Rgb8,
    pub stroke_width: u32,
    /// Write the country name after the last point of each line.
    pub end_labels: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            margins: Margins::new(20.0, 40.0, 60.0, 40.0),
            colors: LineColors::Flat,
            flat_color: LIGHT_GREY,
            stroke_width: 2,
            end_labels: false,
        }
    }
}

impl ChartConfig {
    /// Value domain for data spanning `lo..=hi`: `[0, hi]`, or
    /// `[min(0, lo), hi]` when `extend_below_zero` is set.
    pub fn value_domain(&self, lo: f64, hi: f64) -> (f64, f64) {
        if self.extend_below_zero {
            (lo.min(0.0), hi)
        } else {
            (0.0, hi)
        }
    }

    /// Read a JSON config file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt)
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(txt).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..1.0).contains(&self.bar.padding_inner) {
            return Err(Error::Config(format!(
                "bar.padding_inner must be in [0, 1), got {}",
                self.bar.padding_inner
            )));
        }
        if self.font_size <= 0.0 {
            return Err(Error::Config("font_size must be positive".into()));
        }
        if self.line.stroke_width == 0 {
            return Err(Error::Config("line.stroke_width must be positive".into()));
        }
        for (name, m) in [("bar", &self.bar.margins), ("line", &self.line.margins)] {
            let negative = [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0);
            if negative
                || m.left + m.right >= self.width as f64
                || m.top + m.bottom >= self.height as f64
            {
                return Err(Error::Config(format!(
                    "{name}.margins leave no room for the plot area"
                )));
            }
        }
        Ok(())
    }
}
