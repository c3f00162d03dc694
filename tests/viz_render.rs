use paygap_viz::models::{Dataset, Record, date_to_year};
use paygap_viz::viz::{self, Container, SurfaceFormat};
use paygap_viz::{ChartConfig, Error, build_charts, render_charts, stats};
use std::fs;

fn example() -> Dataset {
    Dataset::new(vec![
        Record::new("FR", "France", 2020, 10.0).unwrap(),
        Record::new("FR", "France", 2021, 12.0).unwrap(),
        Record::new("AT", "Austria", 2020, 8.0).unwrap(),
    ])
}

#[test]
fn france_austria_end_to_end() {
    let data = example();
    assert_eq!(stats::filter_by_year(&data, 2020).len(), 2);

    let charts = build_charts(&data, 2020, &ChartConfig::default()).unwrap();
    let bar = charts.bar.scene();
    assert_eq!(bar.rects().count(), 2);

    assert_eq!(charts.line.series.len(), 2);
    let france = &charts.line.series[0];
    assert_eq!(france.country, "France");
    let years: Vec<i32> = france.points.iter().map(|p| date_to_year(p.date)).collect();
    assert_eq!(years, [2020, 2021]);
    assert!(france.points[0].x < france.points[1].x);
    assert_eq!(charts.line.series[1].points.len(), 1);
}

#[test]
fn both_mount_points_receive_svg() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Container::in_dir(dir.path(), SurfaceFormat::Svg);
    render_charts(&example(), 2020, &ChartConfig::default(), &mut out).unwrap();
    let files = out.teardown();
    assert_eq!(files, [dir.path().join("bar.svg"), dir.path().join("line.svg")]);

    let bar = fs::read_to_string(dir.path().join("bar.svg")).unwrap();
    assert!(bar.contains(r#"width="900""#));
    assert!(bar.contains(r#"height="400""#));
    assert!(bar.contains("France"));
    assert!(bar.contains("Austria"));
    // background + two bars
    assert_eq!(bar.matches("<rect").count(), 3);

    let line = fs::read_to_string(dir.path().join("line.svg")).unwrap();
    assert!(line.contains("<polyline"));
    assert!(line.contains("2021"));
}

#[test]
fn png_without_font_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Container::in_dir(dir.path(), SurfaceFormat::Png);
    let err = render_charts(&example(), 2020, &ChartConfig::default(), &mut out).unwrap_err();
    assert!(matches!(err, Error::FontRequired));
    assert!(!dir.path().join("bar.png").exists());
}

#[test]
fn rendering_twice_into_one_mount_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Container::in_dir(dir.path(), SurfaceFormat::Svg);
    render_charts(&example(), 2020, &ChartConfig::default(), &mut out).unwrap();
    let err = render_charts(&example(), 2021, &ChartConfig::default(), &mut out).unwrap_err();
    assert!(matches!(err, Error::SurfaceExists(id) if id == "bar"));
}

#[test]
fn missing_mount_point() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Container::new();
    out.mount("bar", dir.path().join("bar.svg")).unwrap();
    let err = render_charts(&example(), 2020, &ChartConfig::default(), &mut out).unwrap_err();
    assert!(matches!(err, Error::MountPointMissing(id) if id == "line"));
    assert!(!dir.path().join("bar.svg").exists());
    assert!(out.teardown().is_empty());
}

#[test]
fn bar_labels_are_rotated_with_their_end_at_the_tick() {
    let charts = build_charts(&example(), 2020, &ChartConfig::default()).unwrap();
    let svg = viz::scene_to_svg_string(&charts.bar.scene()).unwrap();
    let label = svg
        .split("<text")
        .find(|el| el.contains(">France</text>"))
        .expect("France label");
    assert!(label.contains(r#"text-anchor="end""#), "{label}");
    assert!(label.contains("rotate(270"), "{label}");

    let tick_x = charts.bar.x_axis.ticks[0].offset.round() as i32;
    assert!(label.contains(&format!(r#"x="{tick_x}""#)), "{label}");
}

#[test]
fn tiny_values_get_full_precision_ticks() {
    let data = Dataset::new(vec![
        Record::new("FR", "France", 2020, 1e-18).unwrap(),
        Record::new("AT", "Austria", 2020, 2e-18).unwrap(),
    ]);
    let charts = build_charts(&data, 2020, &ChartConfig::default()).unwrap();
    let labels: Vec<&str> = charts.bar.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
    // 2e-19 steps need 19 decimals.
    assert_eq!(labels[0], "0.0000000000000000000");
    assert_eq!(labels[1], "0.0000000000000000002");
    assert!(viz::scene_to_svg_string(&charts.bar.scene()).is_ok());
}

#[test]
fn svg_string_has_the_declared_size() {
    let mut cfg = ChartConfig::default();
    cfg.width = 640;
    cfg.height = 320;
    let charts = build_charts(&example(), 2020, &cfg).unwrap();
    let svg = viz::scene_to_svg_string(&charts.line.scene()).unwrap();
    assert!(svg.contains(r#"width="640""#));
    assert!(svg.contains(r#"height="320""#));
}

#[test]
fn empty_year_draws_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Container::in_dir(dir.path(), SurfaceFormat::Svg);
    let err = render_charts(&example(), 1999, &ChartConfig::default(), &mut out).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset(_)));
    assert!(out.teardown().is_empty());
}
