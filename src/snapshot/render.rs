//! Scene serialization and rasterization
//!
//! The display list is written out as an SVG document and rasterized with
//! `resvg`, which resolves font families against the system font database.

use super::layout::{Anchor, DrawOp, Scene};
use super::SnapshotError;
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Serialize a scene to an SVG document
pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height,
    );

    for op in &scene.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let _ = writeln!(
                    svg,
                    r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{color}"/>"#
                );
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => {
                let _ = writeln!(
                    svg,
                    r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" fill="none" stroke="{color}" stroke-width="{line_width}"/>"#
                );
            }
            DrawOp::Text {
                x,
                y,
                anchor,
                size,
                bold,
                family,
                color,
                content,
            } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let weight = if *bold { "bold" } else { "normal" };
                let _ = writeln!(
                    svg,
                    r#"  <text x="{x}" y="{y}" text-anchor="{anchor}" font-size="{size}" font-weight="{weight}" font-family="{family}" fill="{color}">{}</text>"#,
                    escape_xml(content),
                    family = escape_xml(family),
                );
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize a scene to PNG bytes
///
/// System fonts are always loaded; `font_dirs` adds extra directories
/// (useful when the system has no CJK font installed).
pub fn rasterize(scene: &Scene, font_dirs: &[PathBuf]) -> Result<Vec<u8>, SnapshotError> {
    let svg = to_svg(scene);

    let mut options = usvg::Options::default();
    {
        let fontdb = options.fontdb_mut();
        fontdb.load_system_fonts();
        for dir in font_dirs {
            fontdb.load_fonts_dir(dir);
        }
    }

    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| SnapshotError::Svg(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(scene.width, scene.height).ok_or(
        SnapshotError::Canvas {
            width: scene.width,
            height: scene.height,
        },
    )?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| SnapshotError::Encode(e.to_string()))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::super::layout::{compose, SnapshotStock};
    use super::*;

    fn sample_scene() -> Scene {
        let stocks = vec![
            SnapshotStock {
                code: "600001".to_string(),
                name: "浦发<银行>".to_string(),
            },
            SnapshotStock {
                code: "000002".to_string(),
                name: "万科A".to_string(),
            },
        ];
        compose(&stocks, "ma5", "AI & 半导体", "2026/10/19 09:30:00")
    }

    #[test]
    fn test_svg_has_canvas_size() {
        let svg = to_svg(&sample_scene());
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1400" height="330""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_escapes_text() {
        let svg = to_svg(&sample_scene());
        assert!(svg.contains("策略: ma5 | AI &amp; 半导体"));
        assert!(svg.contains("浦发&lt;银行&gt;"));
        assert!(!svg.contains("<银行>"));
    }

    #[test]
    fn test_svg_anchors() {
        let svg = to_svg(&sample_scene());
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"text-anchor="start""#));
    }

    #[test]
    fn test_rasterize_produces_png() {
        let png = rasterize(&sample_scene(), &[]).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]));
    }
}
