// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Figure`] that records draw calls.
//!
//! Panels keep a list of [`DrawCommand`]s in call order along with their view window and
//! figure position. Nothing is rasterized; consumers replay the commands (see the demo's SVG
//! writer) or inspect them directly.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::canvas::{Canvas, Figure, MarkerStyle, ShapeStyle, Strip};
use crate::geometry::extent;
use crate::glyph::Glyph;

/// Placeholder view window of a panel that has not been drawn on.
pub const DEFAULT_WINDOW: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// Margin added around autoscaled data, as a fraction of the data span.
const AUTOSCALE_MARGIN: f64 = 0.05;

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A filled, outlined rectangle.
    Rect {
        /// Rectangle in data space.
        frame: Rect,
        /// Paint.
        style: ShapeStyle,
    },
    /// A closed polygon.
    Polygon {
        /// Vertices in data space.
        vertices: Vec<Point>,
        /// Paint.
        style: ShapeStyle,
    },
    /// A glyph marker.
    Marker {
        /// Centre in data space.
        at: Point,
        /// Glyph shape.
        glyph: Glyph,
        /// Paint.
        style: MarkerStyle,
    },
}

impl DrawCommand {
    /// Paint order of the command.
    pub fn z_order(&self) -> f64 {
        match self {
            Self::Rect { style, .. } | Self::Polygon { style, .. } => style.z_order,
            Self::Marker { style, .. } => style.z_order,
        }
    }
}

/// A recorded panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePanel {
    window: Rect,
    position: Rect,
    figure_size: Size,
    drawn: bool,
    stripped: Strip,
    commands: Vec<DrawCommand>,
}

impl ScenePanel {
    /// Creates a pristine panel at `position` in a figure of `figure_size` inches.
    pub fn new(position: Rect, figure_size: Size) -> Self {
        Self {
            window: DEFAULT_WINDOW,
            position,
            figure_size,
            drawn: false,
            stripped: Strip::NONE,
            commands: Vec::new(),
        }
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded commands sorted by paint order; ties keep call order.
    pub fn commands_by_z(&self) -> Vec<&DrawCommand> {
        let mut sorted: Vec<&DrawCommand> = self.commands.iter().collect();
        sorted.sort_by(|a, b| a.z_order().total_cmp(&b.z_order()));
        sorted
    }

    /// Number of recorded rectangles.
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    /// Number of recorded polygons.
    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    /// Number of recorded markers other than data points.
    pub fn marker_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Marker { glyph, .. } if *glyph != Glyph::Dot))
            .count()
    }

    /// Decorations removed so far.
    pub fn stripped(&self) -> Strip {
        self.stripped
    }

    /// Size of the enclosing figure in inches.
    pub fn figure_size(&self) -> Size {
        self.figure_size
    }

    /// Plots data points and autoscales the view to include them.
    ///
    /// A pristine view is replaced by the data extent plus a small margin; otherwise the view
    /// only grows.
    pub fn scatter(&mut self, points: &[Point], style: &MarkerStyle) {
        let Ok(bounds) = extent(points) else {
            return;
        };
        let margin = |span: f64| {
            if span > 0.0 {
                span * AUTOSCALE_MARGIN
            } else {
                0.5
            }
        };
        let fitted = bounds.inflate(margin(bounds.width()), margin(bounds.height()));
        let window = if self.drawn {
            self.window.union(fitted)
        } else {
            fitted
        };
        self.set_view_window(window);
        for &at in points {
            self.draw_marker(at, &Glyph::Dot, style);
        }
    }

    pub(crate) fn set_figure_size(&mut self, size: Size) {
        self.figure_size = size;
    }
}

impl Canvas for ScenePanel {
    fn view_window(&self) -> Rect {
        self.window
    }

    fn set_view_window(&mut self, window: Rect) {
        self.window = window;
        self.drawn = true;
    }

    fn physical_size(&self) -> Size {
        Size::new(
            self.position.width() * self.figure_size.width,
            self.position.height() * self.figure_size.height,
        )
    }

    fn position(&self) -> Rect {
        self.position
    }

    fn set_position(&mut self, position: Rect) {
        self.position = position;
    }

    fn is_pristine(&self) -> bool {
        !self.drawn
    }

    fn draw_rect(&mut self, frame: Rect, style: &ShapeStyle) {
        self.drawn = true;
        self.commands.push(DrawCommand::Rect {
            frame,
            style: *style,
        });
    }

    fn draw_polygon(&mut self, vertices: &[Point], style: &ShapeStyle) {
        self.drawn = true;
        self.commands.push(DrawCommand::Polygon {
            vertices: vertices.to_vec(),
            style: *style,
        });
    }

    fn draw_marker(&mut self, at: Point, glyph: &Glyph, style: &MarkerStyle) {
        self.drawn = true;
        self.commands.push(DrawCommand::Marker {
            at,
            glyph: glyph.clone(),
            style: *style,
        });
    }

    fn strip(&mut self, strip: Strip) {
        self.stripped = Strip {
            axes: self.stripped.axes || strip.axes,
            labels: self.stripped.labels || strip.labels,
            spines: self.stripped.spines || strip.spines,
            ticks: self.stripped.ticks || strip.ticks,
            titles: self.stripped.titles || strip.titles,
        };
    }
}

/// A recorded figure.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneFigure {
    size: Size,
    panels: Vec<ScenePanel>,
}

impl SceneFigure {
    /// Creates an empty figure of `size` inches.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            panels: Vec::new(),
        }
    }
}

impl Default for SceneFigure {
    fn default() -> Self {
        Self::new(Size::new(6.4, 4.8))
    }
}

impl Figure for SceneFigure {
    type Panel = ScenePanel;

    fn size_inches(&self) -> Size {
        self.size
    }

    fn set_size_inches(&mut self, size: Size) {
        self.size = size;
        for panel in &mut self.panels {
            panel.set_figure_size(size);
        }
    }

    fn add_panel(&mut self, position: Rect) -> usize {
        self.panels.push(ScenePanel::new(position, self.size));
        self.panels.len() - 1
    }

    fn panels(&self) -> &[ScenePanel] {
        &self.panels
    }

    fn panels_mut(&mut self) -> &mut [ScenePanel] {
        &mut self.panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::palette::css;

    fn dot_style() -> MarkerStyle {
        MarkerStyle {
            color: css::BLACK,
            accent: css::WHITE,
            size: 4.0,
            z_order: crate::z_order::DATA_POINTS,
        }
    }

    #[test]
    fn scatter_replaces_pristine_view() {
        let mut panel = ScenePanel::new(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(2.0, 2.0));
        assert!(panel.is_pristine(), "new panels are pristine");
        panel.scatter(&[Point::new(0.0, 10.0), Point::new(10.0, 20.0)], &dot_style());
        assert!(!panel.is_pristine(), "scatter draws");
        assert_eq!(panel.view_window(), Rect::new(-0.5, 9.5, 10.5, 20.5));
        assert_eq!(panel.marker_count(), 0);
        assert_eq!(panel.commands().len(), 2);
    }

    #[test]
    fn scatter_grows_drawn_view() {
        let mut panel = ScenePanel::new(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(2.0, 2.0));
        panel.set_view_window(Rect::new(-100.0, -100.0, 100.0, 100.0));
        panel.scatter(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &dot_style());
        assert_eq!(panel.view_window(), Rect::new(-100.0, -100.0, 100.0, 100.0));
    }

    #[test]
    fn resizing_figure_updates_physical_sizes() {
        let mut figure = SceneFigure::new(Size::new(4.0, 2.0));
        let index = figure.add_panel(Rect::new(0.0, 0.0, 0.5, 0.5));
        assert_eq!(figure.panels()[index].physical_size(), Size::new(2.0, 1.0));
        figure.set_size_inches(Size::new(8.0, 8.0));
        assert_eq!(figure.panels()[index].physical_size(), Size::new(4.0, 4.0));
    }

    #[test]
    fn strips_accumulate() {
        let mut panel = ScenePanel::new(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(2.0, 2.0));
        panel.strip(Strip {
            spines: true,
            ..Strip::NONE
        });
        panel.strip(Strip::default());
        let stripped = panel.stripped();
        assert!(stripped.spines && stripped.ticks, "got {stripped:?}");
        assert!(!stripped.axes, "axes were never stripped");
    }
}
