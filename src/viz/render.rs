//! Paint a [`Scene`] onto a Plotters drawing area (SVG or PNG).

use super::scene::{HAnchor, Mark, Rotation, Scene, TextMark, VAnchor};
use super::types::{Rgb8, SurfaceFormat};
use crate::error::{Error, Result};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once a "sans-serif" face has been handed to Plotters.
static FONT_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register a TrueType/OpenType file as the "sans-serif" face.
///
/// Required for PNG output: the `ab_glyph` text path doesn't discover OS fonts.
/// SVG output only writes `<text>` elements and works without it.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Plotters keeps the face for the whole process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).map_err(|_| {
        Error::Font {
            path: path.to_path_buf(),
            reason: "not a valid TrueType/OpenType font".into(),
        }
    })?;
    FONT_REGISTERED.store(true, Ordering::Release);
    Ok(())
}

pub fn font_registered() -> bool {
    FONT_REGISTERED.load(Ordering::Acquire)
}

/// Pick the surface format from a file extension (`.png`, anything else is SVG).
pub fn format_for_path(path: &Path) -> SurfaceFormat {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => SurfaceFormat::Png,
        _ => SurfaceFormat::Svg,
    }
}

/// Create a surface of the scene's size at `path`, draw and present it.
pub fn render_to_file(path: &Path, scene: &Scene, format: SurfaceFormat) -> Result<()> {
    let size = (scene.width, scene.height);
    match format {
        SurfaceFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_scene(&root, scene)
        }
        SurfaceFormat::Png => {
            if !font_registered() {
                return Err(Error::FontRequired);
            }
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_scene(&root, scene)
        }
    }
}

/// Render to an in-memory SVG document.
pub fn scene_to_svg_string(scene: &Scene) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (scene.width, scene.height)).into_drawing_area();
        draw_scene(&root, scene)?;
    }
    Ok(buf)
}

/// Helper that draws to any Plotters backend.
pub fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&rgb(scene.background)).map_err(draw_err)?;
    for mark in &scene.marks {
        match mark {
            Mark::Rect(r) => {
                let x0 = r.x.round() as i32;
                let y0 = r.y.round() as i32;
                let x1 = (r.x + r.width).round() as i32;
                let y1 = (r.y + r.height).round() as i32;
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], rgb(r.fill).filled()))
                    .map_err(draw_err)?;
            }
            Mark::Path(p) => {
                if p.points.len() < 2 {
                    continue;
                }
                let pts: Vec<(i32, i32)> = p
                    .points
                    .iter()
                    .map(|(x, y)| (x.round() as i32, y.round() as i32))
                    .collect();
                root.draw(&PathElement::new(pts, rgb(p.stroke).stroke_width(p.stroke_width)))
                    .map_err(draw_err)?;
            }
            Mark::Text(t) => {
                let pos = (t.x.round() as i32, t.y.round() as i32);
                root.draw(&Text::new(t.text.clone(), pos, text_style(t)))
                    .map_err(draw_err)?;
            }
        }
    }
    root.present().map_err(draw_err)?;
    Ok(())
}

fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn text_style(t: &TextMark) -> TextStyle<'static> {
    let h = match t.h_anchor {
        HAnchor::Start => HPos::Left,
        HAnchor::Middle => HPos::Center,
        HAnchor::End => HPos::Right,
    };
    let v = match t.v_anchor {
        VAnchor::Top => VPos::Top,
        VAnchor::Middle => VPos::Center,
        VAnchor::Bottom => VPos::Bottom,
    };
    let transform = match t.rotation {
        Rotation::None => FontTransform::None,
        Rotation::QuarterCounterClockwise => FontTransform::Rotate270,
    };
    FontDesc::new(FontFamily::SansSerif, t.size, FontStyle::Normal)
        .transform(transform)
        .color(&rgb(t.color))
        .pos(Pos::new(h, v))
}

fn draw_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::scene::{PathMark, RectMark};

    #[test]
    fn svg_contains_every_mark() {
        let mut scene = Scene::new(200, 100);
        scene.push(Mark::Rect(RectMark {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 50.0,
            fill: Rgb8::new(78, 121, 167),
        }));
        scene.push(Mark::Path(PathMark {
            points: vec![(0.0, 0.0), (100.0, 50.0)],
            stroke: Rgb8::new(0, 0, 0),
            stroke_width: 2,
        }));
        scene.push(Mark::Text(TextMark {
            text: "France".into(),
            x: 50.0,
            y: 90.0,
            size: 10.0,
            color: Rgb8::new(0, 0, 0),
            h_anchor: HAnchor::End,
            v_anchor: VAnchor::Middle,
            rotation: Rotation::QuarterCounterClockwise,
        }));

        let svg = scene_to_svg_string(&scene).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("France"));
        assert!(svg.contains("<polyline"));
        // background + one bar
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn non_font_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"geo,country,year,value\n").unwrap();
        let err = register_font_file(&path).unwrap_err();
        assert!(matches!(err, Error::Font { path: p, .. } if p == path));
        assert!(!font_registered());

        let err = register_font_file(dir.path().join("missing.ttf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn extension_picks_format() {
        assert_eq!(format_for_path(Path::new("a/bar.PNG")), SurfaceFormat::Png);
        assert_eq!(format_for_path(Path::new("a/bar.svg")), SurfaceFormat::Svg);
        assert_eq!(format_for_path(Path::new("a/bar")), SurfaceFormat::Svg);
    }
}
