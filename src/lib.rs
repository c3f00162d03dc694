//! paygap_viz
//!
//! Load a tidy `geo,country,year,value` table (e.g. the gender pay gap by
//! country) and draw it as two charts: a bar chart of one year's values per
//! country and a line chart of each country over time. Pairs with the
//! `paygap` CLI.
//!
//! ### Features
//! - Strict or lenient CSV loading with row-level error reporting
//! - Aggregations: extent, mean, median, filter by year, group by country
//! - Band, linear, time and colour scales
//! - SVG output out of the box, PNG with a registered font
//!
//! ### Example
//! ```no_run
//! use paygap_viz::{ChartConfig, Container, SurfaceFormat};
//!
//! let data = paygap_viz::storage::load_csv("data/data.csv")?;
//! let year = paygap_viz::stats::latest_year(&data).unwrap_or(2020);
//! let mut out = Container::in_dir("charts", SurfaceFormat::Svg);
//! paygap_viz::pipeline::render_charts(&data, year, &ChartConfig::default(), &mut out)?;
//! let summary = paygap_viz::stats::summarize(&paygap_viz::stats::filter_by_year(&data, year));
//! println!("{:#?}", summary);
//! # Ok::<(), paygap_viz::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::ChartConfig;
pub use error::{Error, Result};
pub use models::{Dataset, FilteredDataset, Record};
pub use pipeline::{Charts, build_charts, load_and_render, render_charts};
pub use viz::{Container, SurfaceFormat};
