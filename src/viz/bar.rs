//! Bar chart of one year's values, one bar per country.

use super::axis::{Axis, TICK_PADDING, TICK_SIZE};
use super::scene::{Mark, RectMark, Scene};
use super::types::{LIGHT_GREY, Rgb8};
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::Record;
use crate::scale::{BandScale, ColorScale, LinearScale};
use crate::stats::{distinct_countries, extent};
use log::debug;

/// Scales for one bar chart: band over the chart's countries, value scale
/// over its values, and the colour scale shared with the line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarScales {
    pub x: BandScale,
    pub y: LinearScale,
    pub color: ColorScale,
}

impl BarScales {
    /// Band domain follows record order (first occurrence). The value domain
    /// is `[0, max]` unless `extend_below_zero` is set.
    pub fn build<'a, I>(records: I, config: &ChartConfig, color: ColorScale) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        let (lo, hi) = extent(records.iter().copied(), Record::value)
            .ok_or_else(|| Error::EmptyDataset("bar chart".into()))?;
        let m = config.bar.margins;
        let (w, h) = (config.width as f64, config.height as f64);

        let countries = distinct_countries(records.iter().copied());
        let x = BandScale::new(&countries, (m.left, w - m.right)).padding_inner(config.bar.padding_inner);
        let y = LinearScale::new(config.value_domain(lo, hi), (h - m.bottom, m.top));
        debug!(
            "bar scales: {} bands of {:.1}px, values {:?}",
            countries.len(),
            x.bandwidth(),
            y.domain()
        );
        Ok(Self { x, y, color })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub geo: String,
    pub country: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb8,
}

/// Everything the bar chart draws, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub width: u32,
    pub height: u32,
    pub bars: Vec<Bar>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

/// Lay out one bar per record.
///
/// `x = band(country)`, `y = linear(value)`, `width = bandwidth`,
/// `height = linear(0) - linear(value)`. Negative values hang below the
/// zero line instead of getting a negative height.
pub fn bar_chart<'a, I>(records: I, scales: &BarScales, config: &ChartConfig) -> Result<BarChart>
where
    I: IntoIterator<Item = &'a Record>,
{
    let zero = scales.y.map(0.0);
    let mut bars = Vec::new();
    for r in records {
        let Some(x) = scales.x.map(r.country()) else {
            debug!("{} is outside the band domain, not drawn", r.country());
            continue;
        };
        let y = scales.y.map(r.value());
        bars.push(Bar {
            geo: r.geo().to_string(),
            country: r.country().to_string(),
            value: r.value(),
            x,
            y: y.min(zero),
            width: scales.x.bandwidth(),
            height: (zero - y).abs(),
            fill: scales.color.map(r.country()).unwrap_or(LIGHT_GREY),
        });
    }
    if bars.is_empty() {
        return Err(Error::EmptyDataset("bar chart".into()));
    }

    let m = config.bar.margins;
    let axis_y = config.height as f64 - m.bottom;
    let max_label_px = (m.bottom - TICK_SIZE - TICK_PADDING).max(0.0);
    Ok(BarChart {
        width: config.width,
        height: config.height,
        bars,
        x_axis: Axis::band_bottom(&scales.x, axis_y, config.font_size, max_label_px),
        y_axis: Axis::linear_left(
            &scales.y,
            m.left,
            config.y_ticks,
            &config.locale,
            config.font_size,
        ),
    })
}

impl BarChart {
    /// Bars first, axes on top.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.width, self.height);
        scene.extend(self.bars.iter().map(|b| {
            Mark::Rect(RectMark {
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                fill: b.fill,
            })
        }));
        scene.extend(self.x_axis.marks());
        scene.extend(self.y_axis.marks());
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::types::TABLEAU10;

    fn rows() -> Vec<Record> {
        vec![
            Record::new("FR", "France", 2020, 10.0).unwrap(),
            Record::new("AT", "Austria", 2020, 20.0).unwrap(),
        ]
    }

    #[test]
    fn bars_follow_the_scales() {
        let rows = rows();
        let cfg = ChartConfig::default();
        let colors = ColorScale::new(&["Austria", "France"], &TABLEAU10);
        let scales = BarScales::build(&rows, &cfg, colors).unwrap();
        let chart = bar_chart(&rows, &scales, &cfg).unwrap();

        assert_eq!(chart.bars.len(), 2);
        let fr = &chart.bars[0];
        assert_eq!(fr.x, scales.x.map("France").unwrap());
        assert_eq!(fr.width, scales.x.bandwidth());
        assert_eq!(fr.y, scales.y.map(10.0));
        assert_eq!(fr.height, scales.y.map(0.0) - scales.y.map(10.0));
        assert_eq!(fr.fill, TABLEAU10[1]);

        // Tallest bar reaches the top margin, baseline sits on the bottom margin.
        let at = &chart.bars[1];
        assert_eq!(at.y, 20.0);
        assert_eq!(at.y + at.height, 320.0);
    }

    #[test]
    fn value_domain_is_anchored_at_zero() {
        let rows = vec![
            Record::new("LU", "Luxembourg", 2020, -1.0).unwrap(),
            Record::new("EE", "Estonia", 2020, 4.0).unwrap(),
        ];
        let cfg = ChartConfig::default();
        let scales = BarScales::build(&rows, &cfg, ColorScale::new(&["Estonia"], &TABLEAU10)).unwrap();
        assert_eq!(scales.y.domain(), (0.0, 4.0));
        let chart = bar_chart(&rows, &scales, &cfg).unwrap();
        assert_eq!(chart.bars[1].y, 20.0);
        assert_eq!(chart.bars[1].y + chart.bars[1].height, 320.0);
    }

    #[test]
    fn negative_values_extend_below_zero() {
        let rows = vec![
            Record::new("LU", "Luxembourg", 2020, -1.0).unwrap(),
            Record::new("EE", "Estonia", 2020, 4.0).unwrap(),
        ];
        let mut cfg = ChartConfig::default();
        cfg.extend_below_zero = true;
        let scales = BarScales::build(&rows, &cfg, ColorScale::new(&["Estonia"], &TABLEAU10)).unwrap();
        assert_eq!(scales.y.domain(), (-1.0, 4.0));
        let chart = bar_chart(&rows, &scales, &cfg).unwrap();
        let lu = &chart.bars[0];
        assert_eq!(lu.y, scales.y.map(0.0));
        assert!(lu.height > 0.0);
        assert_eq!(lu.fill, LIGHT_GREY);
    }

    #[test]
    fn empty_input_is_an_error() {
        let rows: Vec<Record> = Vec::new();
        let cfg = ChartConfig::default();
        let err = BarScales::build(&rows, &cfg, ColorScale::new(&["A"], &TABLEAU10)).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }
}
