//! Multi-series line chart: one straight-segment path per country through time.

use super::axis::Axis;
use super::scene::{HAnchor, Mark, PathMark, Scene, TextMark, VAnchor};
use super::types::{LineColors, Rgb8};
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::Record;
use crate::scale::{ColorScale, LinearScale, TimeScale};
use crate::stats::{extent, group_by_country};
use chrono::NaiveDate;
use log::debug;

/// Gap between the last point of a line and its end label.
const END_LABEL_GAP: f64 = 4.0;

/// Scales shared by every series: one time axis for all countries and a
/// value scale anchored at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LineScales {
    pub x: TimeScale,
    pub y: LinearScale,
    pub color: ColorScale,
}

impl LineScales {
    pub fn build<'a, I>(records: I, config: &ChartConfig, color: ColorScale) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        let empty = || Error::EmptyDataset("line chart".into());
        let dates = extent(records.iter().copied(), Record::date).ok_or_else(empty)?;
        let (lo, hi) = extent(records.iter().copied(), Record::value).ok_or_else(empty)?;
        let m = config.line.margins;
        let (w, h) = (config.width as f64, config.height as f64);

        let x = TimeScale::new(dates, (m.left, w - m.right));
        let y = LinearScale::new(config.value_domain(lo, hi), (h - m.bottom, m.top));
        debug!("line scales: dates {:?}, values {:?}", dates, y.domain());
        Ok(Self { x, y, color })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// One country's line, points in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub country: String,
    pub points: Vec<SeriesPoint>,
    pub stroke: Rgb8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub width: u32,
    pub height: u32,
    pub series: Vec<Series>,
    pub stroke_width: u32,
    pub end_labels: bool,
    pub font_size: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

/// Group by country, order each group by date and project onto the scales.
/// Groups appear in first-seen order; input need not be sorted.
pub fn line_chart<'a, I>(records: I, scales: &LineScales, config: &ChartConfig) -> Result<LineChart>
where
    I: IntoIterator<Item = &'a Record>,
{
    let groups = group_by_country(records);
    if groups.is_empty() {
        return Err(Error::EmptyDataset("line chart".into()));
    }

    let series = groups
        .into_iter()
        .map(|group| {
            let mut recs = group.records;
            recs.sort_by_key(|r| r.date());
            let stroke = match config.line.colors {
                LineColors::Flat => config.line.flat_color,
                LineColors::Country => scales
                    .color
                    .map(group.country)
                    .unwrap_or(config.line.flat_color),
            };
            Series {
                country: group.country.to_string(),
                points: recs
                    .iter()
                    .map(|r| SeriesPoint {
                        date: r.date(),
                        value: r.value(),
                        x: scales.x.map(r.date()),
                        y: scales.y.map(r.value()),
                    })
                    .collect(),
                stroke,
            }
        })
        .collect();

    let m = config.line.margins;
    Ok(LineChart {
        width: config.width,
        height: config.height,
        series,
        stroke_width: config.line.stroke_width,
        end_labels: config.line.end_labels,
        font_size: config.font_size,
        x_axis: Axis::time_bottom(
            &scales.x,
            config.height as f64 - m.bottom,
            config.x_ticks,
            config.font_size,
        ),
        y_axis: Axis::linear_left(
            &scales.y,
            m.left,
            config.y_ticks,
            &config.locale,
            config.font_size,
        ),
    })
}

impl LineChart {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.width, self.height);
        for s in &self.series {
            scene.push(Mark::Path(PathMark {
                points: s.points.iter().map(|p| (p.x, p.y)).collect(),
                stroke: s.stroke,
                stroke_width: self.stroke_width,
            }));
        }
        scene.extend(self.x_axis.marks());
        scene.extend(self.y_axis.marks());
        if self.end_labels {
            for s in &self.series {
                if let Some(last) = s.points.last() {
                    scene.push(Mark::Text(TextMark {
                        text: s.country.clone(),
                        x: last.x + END_LABEL_GAP,
                        y: last.y,
                        size: self.font_size,
                        color: s.stroke,
                        h_anchor: HAnchor::Start,
                        v_anchor: VAnchor::Middle,
                        rotation: Default::default(),
                    }));
                }
            }
        }
        scene
    }
}
