//! Drawing instructions produced by the chart builders.
//!
//! A [`Scene`] is plain data: pixel-space primitives in paint order. Building
//! one never touches a drawing surface; [`super::render`] does the painting.

use super::types::Rgb8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

/// Text orientation. Quarter turns are what every backend can draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    /// Reads bottom to top.
    QuarterCounterClockwise,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathMark {
    pub points: Vec<(f64, f64)>,
    pub stroke: Rgb8,
    pub stroke_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb8,
    pub h_anchor: HAnchor,
    pub v_anchor: VAnchor,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect(RectMark),
    Path(PathMark),
    Text(TextMark),
}

/// Everything one surface needs: its fixed size and marks in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb8,
    pub marks: Vec<Mark>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Rgb8::new(255, 255, 255),
            marks: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn extend<I: IntoIterator<Item = Mark>>(&mut self, marks: I) {
        self.marks.extend(marks);
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Path(p) => Some(p),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text(t) => Some(t),
            _ => None,
        })
    }
}
