//! Load → aggregate → scale → draw, for the two charts of one year.

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::Dataset;
use crate::scale::ColorScale;
use crate::stats::{distinct_countries, filter_by_year, latest_year, sort_by_value};
use crate::storage::{LoadOptions, load_csv_with};
use crate::viz::bar::{BarChart, BarScales, bar_chart};
use crate::viz::container::Container;
use crate::viz::line::{LineChart, LineScales, line_chart};
use crate::viz::types::{BAR_MOUNT, LINE_MOUNT};
use log::info;
use std::path::Path;

/// Both chart layouts for one selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    pub year: i32,
    pub bar: BarChart,
    pub line: LineChart,
}

/// Build the bar chart of `year` and the line chart of every year.
///
/// Both charts share one colour scale over every country in `dataset`, so a
/// country keeps its colour whichever year is selected.
pub fn build_charts(dataset: &Dataset, year: i32, config: &ChartConfig) -> Result<Charts> {
    config.validate()?;
    let color = ColorScale::new(&distinct_countries(dataset), config.palette.colors());

    let view = filter_by_year(dataset, year);
    if view.is_empty() {
        return Err(Error::EmptyDataset(format!("year {year}")));
    }
    let mut rows = view.records().to_vec();
    sort_by_value(&mut rows, config.bar.sort);

    let bar_scales = BarScales::build(rows.iter().copied(), config, color.clone())?;
    let bar = bar_chart(rows.iter().copied(), &bar_scales, config)?;

    let line_scales = LineScales::build(dataset, config, color)?;
    let line = line_chart(dataset, &line_scales, config)?;

    Ok(Charts { year, bar, line })
}

/// Build both charts and draw them into the `bar` and `line` mount points.
///
/// Both mount points must exist and be empty; otherwise nothing is drawn.
pub fn render_charts(
    dataset: &Dataset,
    year: i32,
    config: &ChartConfig,
    container: &mut Container,
) -> Result<Charts> {
    container.ensure_free(&[BAR_MOUNT, LINE_MOUNT])?;
    let charts = build_charts(dataset, year, config)?;
    container.render(BAR_MOUNT, &charts.bar.scene())?;
    container.render(LINE_MOUNT, &charts.line.scene())?;
    Ok(charts)
}

/// Read the CSV, then render. `year = None` selects the latest year present.
///
/// A failed load returns before any surface is created.
pub fn load_and_render<P: AsRef<Path>>(
    path: P,
    opts: &LoadOptions,
    year: Option<i32>,
    config: &ChartConfig,
    container: &mut Container,
) -> Result<Charts> {
    let dataset = load_csv_with(path, opts)?;
    let year = match year {
        Some(y) => y,
        None => latest_year(&dataset).ok_or_else(|| Error::EmptyDataset("no rows loaded".into()))?,
    };
    info!("rendering charts for {year}");
    render_charts(&dataset, year, config, container)
}
