//! Axis layout: tick positions and labels for band, linear and time scales.

use super::scene::{HAnchor, Mark, PathMark, Rotation, TextMark, VAnchor};
use super::text::truncate_to_width;
use super::types::Rgb8;
use super::util::{format_tick, tick_precision};
use crate::scale::{BandScale, LinearScale, TimeScale};

/// Length of a tick line, in pixels.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick's end and its label.
pub const TICK_PADDING: f64 = 3.0;

const AXIS_COLOR: Rgb8 = Rgb8::new(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    /// y of a bottom axis, x of a left axis.
    pub position: f64,
    /// Pixel extent of the domain line.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    pub rotation: Rotation,
    pub font_size: f64,
}

impl Axis {
    /// One tick per category at the band centre. Labels are turned a quarter
    /// turn with their end at the tick and cut to `max_label_px`.
    pub fn band_bottom(scale: &BandScale, y: f64, font_size: f64, max_label_px: f64) -> Self {
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|label| {
                scale.center(label).map(|offset| Tick {
                    offset,
                    label: truncate_to_width(label, font_size, max_label_px),
                })
            })
            .collect();
        Self {
            orient: Orient::Bottom,
            position: y,
            range: scale.range(),
            ticks,
            rotation: Rotation::QuarterCounterClockwise,
            font_size,
        }
    }

    /// Round-valued ticks over the whole linear domain.
    pub fn linear_left(
        scale: &LinearScale,
        x: f64,
        count: usize,
        locale_tag: &str,
        font_size: f64,
    ) -> Self {
        let precision = tick_precision(scale.tick_step(count));
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick {
                offset: scale.map(v),
                label: format_tick(v, precision, locale_tag),
            })
            .collect();
        Self {
            orient: Orient::Left,
            position: x,
            range: scale.range(),
            ticks,
            rotation: Rotation::None,
            font_size,
        }
    }

    /// Year ticks along a time scale.
    pub fn time_bottom(scale: &TimeScale, y: f64, count: usize, font_size: f64) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|d| Tick {
                offset: scale.map(d),
                label: d.format("%Y").to_string(),
            })
            .collect();
        Self {
            orient: Orient::Bottom,
            position: y,
            range: scale.range(),
            ticks,
            rotation: Rotation::None,
            font_size,
        }
    }

    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(1 + self.ticks.len() * 2);
        let (r0, r1) = self.range;
        let p = self.position;

        let domain = match self.orient {
            Orient::Bottom => vec![(r0, p + TICK_SIZE), (r0, p), (r1, p), (r1, p + TICK_SIZE)],
            Orient::Left => vec![(p - TICK_SIZE, r0), (p, r0), (p, r1), (p - TICK_SIZE, r1)],
        };
        out.push(Mark::Path(PathMark {
            points: domain,
            stroke: AXIS_COLOR,
            stroke_width: 1,
        }));

        let label_gap = TICK_SIZE + TICK_PADDING;
        for tick in &self.ticks {
            let o = tick.offset;
            let (line, x, y, h_anchor, v_anchor) = match (self.orient, self.rotation) {
                (Orient::Bottom, Rotation::None) => (
                    vec![(o, p), (o, p + TICK_SIZE)],
                    o,
                    p + label_gap,
                    HAnchor::Middle,
                    VAnchor::Top,
                ),
                (Orient::Bottom, Rotation::QuarterCounterClockwise) => (
                    vec![(o, p), (o, p + TICK_SIZE)],
                    o,
                    p + label_gap,
                    HAnchor::End,
                    VAnchor::Middle,
                ),
                (Orient::Left, _) => (
                    vec![(p, o), (p - TICK_SIZE, o)],
                    p - label_gap,
                    o,
                    HAnchor::End,
                    VAnchor::Middle,
                ),
            };
            out.push(Mark::Path(PathMark {
                points: line,
                stroke: AXIS_COLOR,
                stroke_width: 1,
            }));
            out.push(Mark::Text(TextMark {
                text: tick.label.clone(),
                x,
                y,
                size: self.font_size,
                color: AXIS_COLOR,
                h_anchor,
                v_anchor,
                rotation: self.rotation,
            }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_ticks_sit_at_band_centres() {
        let s = BandScale::new(&["A", "B", "C"], (0.0, 90.0));
        let axis = Axis::band_bottom(&s, 320.0, 10.0, 70.0);
        let offsets: Vec<f64> = axis.ticks.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![15.0, 45.0, 75.0]);
        assert_eq!(axis.rotation, Rotation::QuarterCounterClockwise);
    }

    #[test]
    fn every_tick_has_a_line_and_a_label() {
        let s = LinearScale::new((0.0, 20.0), (320.0, 20.0));
        let axis = Axis::linear_left(&s, 40.0, 10, "en", 10.0);
        let marks = axis.marks();
        let texts = marks.iter().filter(|m| matches!(m, Mark::Text(_))).count();
        assert_eq!(texts, axis.ticks.len());
        assert_eq!(marks.len(), 1 + 2 * axis.ticks.len());
        assert_eq!(axis.ticks.first().map(|t| t.offset), Some(320.0));
        assert_eq!(axis.ticks.last().map(|t| t.label.as_str()), Some("20"));
    }
}
