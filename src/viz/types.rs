//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = String;

    /// Accepts `#RRGGBB` or `RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected a #RRGGBB colour, got {s:?}"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// CSS `lightgrey`, the flat line colour.
pub const LIGHT_GREY: Rgb8 = Rgb8::new(211, 211, 211);

/// Tableau 10 categorical palette.
pub const TABLEAU10: [Rgb8; 10] = [
    Rgb8::new(78, 121, 167),  // blue   (#4E79A7)
    Rgb8::new(242, 142, 44),  // orange (#F28E2C)
    Rgb8::new(225, 87, 89),   // red    (#E15759)
    Rgb8::new(118, 183, 178), // teal   (#76B7B2)
    Rgb8::new(89, 161, 79),   // green  (#59A14F)
    Rgb8::new(237, 201, 73),  // yellow (#EDC949)
    Rgb8::new(175, 122, 161), // purple (#AF7AA1)
    Rgb8::new(255, 157, 167), // pink   (#FF9DA7)
    Rgb8::new(156, 117, 95),  // brown  (#9C755F)
    Rgb8::new(186, 176, 171), // grey   (#BAB0AB)
];

/// Microsoft Office (2013+) chart series palette.
pub const OFFICE10: [Rgb8; 10] = [
    Rgb8::new(68, 114, 196),  // blue      (#4472C4)
    Rgb8::new(237, 125, 49),  // orange    (#ED7D31)
    Rgb8::new(165, 165, 165), // gray      (#A5A5A5)
    Rgb8::new(255, 192, 0),   // gold      (#FFC000)
    Rgb8::new(91, 155, 213),  // light blue(#5B9BD5)
    Rgb8::new(112, 173, 71),  // green     (#70AD47)
    Rgb8::new(38, 68, 120),   // dark blue (#264478)
    Rgb8::new(158, 72, 14),   // dark org. (#9E480E)
    Rgb8::new(99, 99, 99),    // dark gray (#636363)
    Rgb8::new(153, 115, 0),   // brownish  (#997300)
];

/// Qualitative palette used by the shared colour scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Tableau10,
    Office,
}

impl Palette {
    pub fn colors(self) -> &'static [Rgb8] {
        match self {
            Palette::Tableau10 => &TABLEAU10,
            Palette::Office => &OFFICE10,
        }
    }
}

/// How line chart strokes are coloured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColors {
    /// Every line uses `line.flat_color`.
    #[default]
    Flat,
    /// Each country takes its colour from the shared colour scale.
    Country,
}

/// Blank space around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Output encoding of a drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceFormat {
    #[default]
    Svg,
    Png,
}

impl SurfaceFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SurfaceFormat::Svg => "svg",
            SurfaceFormat::Png => "png",
        }
    }
}

/// Mount point of the bar chart surface.
pub const BAR_MOUNT: &str = "bar";
/// Mount point of the line chart surface.
pub const LINE_MOUNT: &str = "line";
