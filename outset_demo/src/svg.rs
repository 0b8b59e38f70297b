// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a recorded [`SceneFigure`].

use std::fmt::Write as _;

use kurbo::{Point, Rect, Size};
use outset::{
    Canvas, DrawCommand, Edge, Figure, Glyph, MarkerStyle, SceneFigure, ScenePanel, ShapeStyle,
};
use peniko::Color;

/// Pixels per inch; marker sizes are in points, so they map one to one.
const DPI: f64 = 72.0;

/// Maps data coordinates of one panel onto the page (pixels, y down).
#[derive(Clone, Copy, Debug)]
struct PanelTransform {
    window: Rect,
    page: Rect,
}

impl PanelTransform {
    fn new(panel: &ScenePanel, page_height: f64, figure: Size) -> Self {
        let position = panel.position();
        let page = Rect::new(
            position.x0 * figure.width * DPI,
            page_height - position.y1 * figure.height * DPI,
            position.x1 * figure.width * DPI,
            page_height - position.y0 * figure.height * DPI,
        );
        Self {
            window: panel.view_window(),
            page,
        }
    }

    fn apply(&self, p: Point) -> Point {
        let w = self.window;
        let tx = if w.width() > 0.0 {
            (p.x - w.x0) / w.width()
        } else {
            0.5
        };
        let ty = if w.height() > 0.0 {
            (p.y - w.y0) / w.height()
        } else {
            0.5
        };
        Point::new(
            self.page.x0 + tx * self.page.width(),
            self.page.y1 - ty * self.page.height(),
        )
    }

    fn apply_rect(&self, r: Rect) -> Rect {
        Rect::from_points(
            self.apply(Point::new(r.x0, r.y0)),
            self.apply(Point::new(r.x1, r.y1)),
        )
    }
}

/// Renders every panel of `figure` into one SVG document.
pub(crate) fn figure_to_svg(figure: &SceneFigure) -> String {
    let size = figure.size_inches();
    let (width, height) = (size.width * DPI, size.height * DPI);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
    );
    out.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    out.push('\n');

    for (i, panel) in figure.panels().iter().enumerate() {
        let transform = PanelTransform::new(panel, height, size);
        let page = transform.page;
        let _ = writeln!(
            out,
            r#"<clipPath id="panel{i}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            page.x0,
            page.y0,
            page.width(),
            page.height()
        );
        let _ = write!(
            out,
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff""##,
            page.x0,
            page.y0,
            page.width(),
            page.height()
        );
        if !panel.stripped().spines {
            out.push_str(r##" stroke="#333333" stroke-width="1""##);
        }
        out.push_str("/>\n");

        // Edge stubs sit in the margin, outside the clip.
        let (stubs, clipped): (Vec<&DrawCommand>, Vec<&DrawCommand>) =
            panel.commands_by_z().into_iter().partition(|c| {
                matches!(c, DrawCommand::Marker { glyph: Glyph::EdgeStub { .. }, .. })
            });
        let _ = writeln!(out, r#"<g clip-path="url(#panel{i})">"#);
        for command in clipped {
            write_command(&mut out, &transform, command);
        }
        out.push_str("</g>\n");
        for command in stubs {
            write_command(&mut out, &transform, command);
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_command(out: &mut String, transform: &PanelTransform, command: &DrawCommand) {
    match command {
        DrawCommand::Rect { frame, style } => {
            let r = transform.apply_rect(*frame);
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
            write_shape_paint(out, style);
            out.push_str("/>\n");
        }
        DrawCommand::Polygon { vertices, style } => {
            let points: Vec<String> = vertices
                .iter()
                .map(|&v| {
                    let p = transform.apply(v);
                    format!("{},{}", p.x, p.y)
                })
                .collect();
            let _ = write!(out, r#"<polygon points="{}""#, points.join(" "));
            write_shape_paint(out, style);
            out.push_str("/>\n");
        }
        DrawCommand::Marker { at, glyph, style } => {
            write_marker(out, transform.apply(*at), glyph, style);
        }
    }
}

fn write_marker(out: &mut String, at: Point, glyph: &Glyph, style: &MarkerStyle) {
    let r = style.size / 2.0;
    match glyph {
        Glyph::Dot => {
            let _ = write!(out, r#"<circle cx="{}" cy="{}" r="{}""#, at.x, at.y, r);
            write_paint_attr(out, "fill", style.color);
            out.push_str("/>\n");
        }
        Glyph::MagnifyingGlass => {
            let lens = 0.6 * r;
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{lens}" fill="none" stroke-width="{}""#,
                at.x - 0.2 * r,
                at.y - 0.2 * r,
                0.25 * r
            );
            write_paint_attr(out, "stroke", style.color);
            out.push_str("/>\n");
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
                at.x + 0.25 * r,
                at.y + 0.25 * r,
                at.x + r,
                at.y + r,
                0.3 * r
            );
            write_paint_attr(out, "stroke", style.color);
            out.push_str("/>\n");
        }
        Glyph::Asterisk => write_label(out, at, "*", style.size * 1.5, style.color),
        Glyph::Arrow => write_label(out, at, "\u{2197}", style.size, style.color),
        Glyph::Badge(text) => {
            let _ = write!(out, r#"<circle cx="{}" cy="{}" r="{}""#, at.x, at.y, r);
            write_paint_attr(out, "fill", style.color);
            write_paint_attr(out, "stroke", style.accent);
            out.push_str(r#" stroke-width="1"/>"#);
            out.push('\n');
            write_label(out, at, text, 0.6 * style.size, style.accent);
        }
        Glyph::EdgeStub { edge, spans } => {
            let text = match edge {
                Edge::Left => format!("\u{21E4}\u{00D7}{spans}"),
                Edge::Right => format!("\u{00D7}{spans}\u{21E5}"),
                Edge::Bottom => format!("\u{2913}\u{00D7}{spans}"),
                Edge::Top => format!("\u{2912}\u{00D7}{spans}"),
            };
            write_label(out, at, &text, style.size, style.color);
        }
    }
}

fn write_label(out: &mut String, at: Point, text: &str, font_size: f64, color: Color) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{font_size}" font-family="sans-serif" text-anchor="middle" dominant-baseline="central""#,
        at.x, at.y
    );
    write_paint_attr(out, "fill", color);
    out.push('>');
    out.push_str(&escape_xml(text));
    out.push_str("</text>\n");
}

fn write_shape_paint(out: &mut String, style: &ShapeStyle) {
    match style.fill {
        Some(color) => write_paint_attr(out, "fill", color),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(color) = style.stroke
        && style.stroke_width > 0.0
    {
        write_paint_attr(out, "stroke", color);
        let _ = write!(out, r#" stroke-width="{}""#, style.stroke_width);
        if style.dashed {
            out.push_str(r#" stroke-dasharray="4 2""#);
        }
    }
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
