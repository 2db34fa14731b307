//! SVG serialization of recorded drawings.
//!
//! Each distinct clip polygon becomes one `<clipPath>`. Runs of commands
//! that share a clip stack are wrapped in nested `<g clip-path>` groups,
//! outermost clip first.

use std::fmt::Write as _;

use kurbo::PathEl;
use sonotex_spec::Point;

use crate::canvas::{DrawCommand, RecordingCanvas};
use crate::color::Color;
use crate::path::Path;

/// Format a coordinate with at most three decimals.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn point(p: Point) -> String {
    format!("{} {}", num(p.x), num(p.y))
}

/// SVG path data for a path.
pub fn path_data(path: &Path) -> String {
    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => format!("M{}", point(p)),
            PathEl::LineTo(p) => format!("L{}", point(p)),
            PathEl::QuadTo(c, p) => format!("Q{} {}", point(c), point(p)),
            PathEl::CurveTo(c1, c2, p) => {
                format!("C{} {} {}", point(c1), point(c2), point(p))
            }
            PathEl::ClosePath => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn polygon_points(polygon: &[Point]) -> String {
    polygon
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint(color: Option<Color>) -> String {
    color.map(|c| c.to_hex()).unwrap_or_else(|| "none".to_string())
}

fn path_element(command: &DrawCommand) -> String {
    let mut element = format!(
        r#"<path d="{}" fill="{}" fill-rule="evenodd""#,
        path_data(&command.path),
        paint(command.fill)
    );
    match command.stroke {
        Some(stroke) => {
            let _ = write!(
                element,
                r#" stroke="{}" stroke-width="{}""#,
                stroke.to_hex(),
                num(command.path.stroke_width)
            );
        }
        None => element.push_str(r#" stroke="none""#),
    }
    element.push_str("/>");
    element
}

/// Clip polygons indexed by first appearance.
#[derive(Default)]
struct ClipTable {
    polygons: Vec<Vec<Point>>,
}

impl ClipTable {
    fn id(&mut self, polygon: &[Point]) -> usize {
        if let Some(index) = self.polygons.iter().position(|p| p.as_slice() == polygon) {
            return index;
        }
        self.polygons.push(polygon.to_vec());
        self.polygons.len() - 1
    }
}

/// Serialize a recorded canvas as a standalone SVG document.
pub fn render_svg(canvas: &RecordingCanvas, background: Color) -> String {
    let mut clips = ClipTable::default();
    let mut body = String::new();

    let commands = canvas.commands();
    let mut i = 0;
    while i < commands.len() {
        let stack = &commands[i].clips;
        let mut end = i;
        while end < commands.len() && &commands[end].clips == stack {
            end += 1;
        }

        let ids: Vec<usize> = stack.iter().map(|polygon| clips.id(polygon)).collect();
        for id in &ids {
            let _ = writeln!(body, r#"<g clip-path="url(#clip{})">"#, id);
        }
        for command in &commands[i..end] {
            body.push_str(&path_element(command));
            body.push('\n');
        }
        for _ in &ids {
            body.push_str("</g>\n");
        }
        i = end;
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(canvas.width()),
        h = num(canvas.height())
    );
    if !clips.polygons.is_empty() {
        svg.push_str("<defs>\n");
        for (id, polygon) in clips.polygons.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<clipPath id="clip{}"><polygon points="{}"/></clipPath>"#,
                id,
                polygon_points(polygon)
            );
        }
        svg.push_str("</defs>\n");
    }
    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        background.to_hex()
    );
    svg.push_str(&body);
    svg.push_str("</svg>\n");
    svg
}
