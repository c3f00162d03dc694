use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use paygap_viz::stats::{self, SortOrder};
use paygap_viz::storage::{self, LoadOptions};
use paygap_viz::viz::{self, LineColors};
use paygap_viz::{ChartConfig, Container, SurfaceFormat, pipeline};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "paygap",
    version,
    about = "Draw per-country bar and line charts from a geo,country,year,value table"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the table and write `bar` and `line` charts for one year.
    Render(RenderArgs),
    /// Print min, max, extent, mean and median of one year's values.
    Stats(StatsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Svg,
    Png,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Colors {
    Flat,
    Country,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Sort {
    None,
    Asc,
    Desc,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// CSV file with columns geo,country,year,value.
    #[arg(long, default_value = "data/data.csv")]
    data: PathBuf,
    /// Year to chart (default: latest year in the data).
    #[arg(short, long)]
    year: Option<i32>,
    /// Field delimiter (single ASCII character).
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Skip rows that fail to parse instead of aborting.
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Directory receiving bar.<ext> and line.<ext>.
    #[arg(short, long, default_value = "charts")]
    out_dir: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,
    /// JSON chart configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    line_colors: Option<Colors>,
    /// Label each line with its country at the last point.
    #[arg(long, default_value_t = false)]
    end_labels: bool,
    #[arg(long, value_enum)]
    sort: Option<Sort>,
    /// Let value axes reach below zero when the data has negative values.
    #[arg(long, default_value_t = false)]
    extend_below_zero: bool,
    /// Locale for tick labels (e.g. en, de, fr).
    #[arg(long)]
    locale: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// TrueType font file; required for PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    data: DataArgs,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Up to 4 decimals, trailing zeros and dot trimmed.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn load_options(args: &DataArgs) -> Result<LoadOptions> {
    anyhow::ensure!(
        args.delimiter.is_ascii(),
        "--delimiter must be a single ASCII character"
    );
    Ok(LoadOptions {
        delimiter: args.delimiter as u8,
        skip_invalid_rows: args.skip_invalid,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("loading chart config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(c) = args.line_colors {
        config.line.colors = match c {
            Colors::Flat => LineColors::Flat,
            Colors::Country => LineColors::Country,
        };
    }
    if args.end_labels {
        config.line.end_labels = true;
    }
    if args.extend_below_zero {
        config.extend_below_zero = true;
    }
    if let Some(s) = args.sort {
        config.bar.sort = match s {
            Sort::None => SortOrder::None,
            Sort::Asc => SortOrder::Ascending,
            Sort::Desc => SortOrder::Descending,
        };
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }

    if let Some(font) = args.font.as_ref() {
        viz::register_font_file(font)?;
    }
    let format = match args.format {
        Format::Svg => SurfaceFormat::Svg,
        Format::Png => SurfaceFormat::Png,
    };

    let opts = load_options(&args.data)?;
    let mut container = Container::in_dir(&args.out_dir, format);
    let charts = pipeline::load_and_render(
        &args.data.data,
        &opts,
        args.data.year,
        &config,
        &mut container,
    )
    .with_context(|| format!("rendering charts from {}", args.data.data.display()))?;

    for path in container.teardown() {
        eprintln!("Wrote {} chart to {}", charts.year, path.display());
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let opts = load_options(&args.data)?;
    let data = storage::load_csv_with(&args.data.data, &opts)
        .with_context(|| format!("loading {}", args.data.data.display()))?;
    let year = match args.data.year {
        Some(y) => y,
        None => stats::latest_year(&data).context("no rows loaded")?,
    };

    let view = stats::filter_by_year(&data, year);
    let value = |r: &paygap_viz::Record| r.value();
    let ext = stats::extent(&view, value);
    println!(
        "{}  count={}  min={} max={} extent=[{}, {}] mean={} median={}",
        year,
        view.len(),
        fmt_opt(stats::min(&view, value)),
        fmt_opt(stats::max(&view, value)),
        fmt_opt(ext.map(|e| e.0)),
        fmt_opt(ext.map(|e| e.1)),
        fmt_opt(stats::mean(&view, value)),
        fmt_opt(stats::median(&view, value)),
    );
    Ok(())
}
