//! Chart rendering: compute chart layouts and draw them to **SVG** or **PNG**.
//!
//! - [`bar`] lays out one bar per country for a single year
//! - [`line`] lays out one line per country over time
//! - [`axis`] builds bottom/left axes from scales
//! - [`render`] paints a [`Scene`] with Plotters
//! - [`container`] binds scenes to named mount points (`bar`, `line`)
//!
//! Layout is pure: chart builders return plain data (`BarChart`, `LineChart`)
//! whose `scene()` lists the marks to draw. Only [`render`] touches a backend.

pub mod axis;
pub mod bar;
pub mod container;
pub mod line;
pub mod render;
pub mod scene;
pub mod text;
pub mod types;
pub mod util;

pub use bar::{Bar, BarChart, BarScales, bar_chart};
pub use container::Container;
pub use line::{LineChart, LineScales, Series, SeriesPoint, line_chart};
pub use render::{register_font_file, render_to_file, scene_to_svg_string};
pub use scene::{Mark, Scene};
pub use types::{BAR_MOUNT, LINE_MOUNT, LineColors, Margins, Palette, Rgb8, SurfaceFormat};
