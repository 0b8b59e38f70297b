// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface contract.
//!
//! Marquee layout never rasterizes anything itself. It reads and writes a data-space view window,
//! asks how large the drawing area is, and issues three kinds of draw calls. Any plotting backend
//! that can do that implements [`Canvas`]; a collection of canvases laid out on a page implements
//! [`Figure`].

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::glyph::Glyph;

/// Fill and outline for frames and leaders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Fill paint, if any.
    pub fill: Option<Color>,
    /// Outline paint, if any.
    pub stroke: Option<Color>,
    /// Outline width in points.
    pub stroke_width: f64,
    /// Whether the outline is dashed.
    pub dashed: bool,
    /// Paint order; higher draws on top.
    pub z_order: f64,
}

/// Paint for glyph markers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Main glyph colour.
    pub color: Color,
    /// Contrasting colour for glyph details (badge text, lens glare).
    pub accent: Color,
    /// Marker size in points.
    pub size: f64,
    /// Paint order; higher draws on top.
    pub z_order: f64,
}

/// Panel decorations to remove, used when outsets are shrunk into insets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strip {
    /// Hide the panel entirely except for its content.
    pub axes: bool,
    /// Hide axis labels.
    pub labels: bool,
    /// Hide the panel border.
    pub spines: bool,
    /// Hide tick marks and tick labels.
    pub ticks: bool,
    /// Hide the panel title.
    pub titles: bool,
}

impl Strip {
    /// Remove nothing.
    pub const NONE: Self = Self {
        axes: false,
        labels: false,
        spines: false,
        ticks: false,
        titles: false,
    };

    /// Returns `true` if nothing is removed.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for Strip {
    fn default() -> Self {
        Self {
            labels: true,
            ticks: true,
            titles: true,
            ..Self::NONE
        }
    }
}

/// A single plotting panel.
///
/// The view window is in data units with ascending bounds. Positions are fractions of the
/// enclosing figure with y up.
pub trait Canvas {
    /// Current data-space view window.
    fn view_window(&self) -> Rect;

    /// Replaces the view window.
    fn set_view_window(&mut self, window: Rect);

    /// Physical size of the drawing area in inches.
    fn physical_size(&self) -> Size;

    /// Box occupied within the figure, as figure fractions.
    fn position(&self) -> Rect;

    /// Moves the panel within the figure.
    fn set_position(&mut self, position: Rect);

    /// Fraction of the figure covered by the drawing area, per axis.
    fn occupied_fraction(&self) -> Size {
        self.position().size()
    }

    /// Returns `true` until anything has been drawn or the view has been set explicitly.
    ///
    /// A pristine view carries placeholder limits, so marquee layout replaces it rather than
    /// growing it.
    fn is_pristine(&self) -> bool;

    /// Draws a filled, outlined rectangle in data space.
    fn draw_rect(&mut self, frame: Rect, style: &ShapeStyle);

    /// Draws a closed, filled polygon in data space.
    fn draw_polygon(&mut self, vertices: &[Point], style: &ShapeStyle);

    /// Draws a glyph centred at a data-space point.
    fn draw_marker(&mut self, at: Point, glyph: &Glyph, style: &MarkerStyle);

    /// Removes panel decorations. Backends without decorations ignore this.
    fn strip(&mut self, strip: Strip) {
        let _ = strip;
    }
}

/// A page of panels with a physical size.
pub trait Figure {
    /// Panel type.
    type Panel: Canvas;

    /// Figure size in inches.
    fn size_inches(&self) -> Size;

    /// Resizes the figure. Panel positions keep their figure fractions.
    fn set_size_inches(&mut self, size: Size);

    /// Adds a panel at `position` (figure fractions) and returns its index.
    fn add_panel(&mut self, position: Rect) -> usize;

    /// Panels in creation order.
    fn panels(&self) -> &[Self::Panel];

    /// Panels in creation order, mutably.
    fn panels_mut(&mut self) -> &mut [Self::Panel];
}
