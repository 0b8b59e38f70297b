// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlier handling: fit the view to the bulk of the data and park the stragglers at its edge.
//!
//! [`rescale_clip_outliers`] fits each axis to the values its [`OutlierBounds`] rule keeps.
//! [`stub_all_clipped_values`] then moves every point that fell outside the view just past the
//! nearest edge and marks it with a [`Glyph::EdgeStub`] telling how many view spans away the
//! value really lies.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use tracing::debug;

use crate::canvas::{Canvas, MarkerStyle};
use crate::error::OutsetError;
use crate::glyph::{Edge, Glyph};
use crate::z_order;

/// Decides which values along one axis are inliers.
pub trait OutlierBounds: fmt::Debug {
    /// Inclusive `(lower, upper)` inlier range for `values`.
    fn bounds(&self, values: &[f64]) -> (f64, f64);
}

/// Inliers lie within `multiplier` interquartile ranges of the first and third quartiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IqrBounds {
    /// Interquartile ranges allowed beyond each quartile.
    pub multiplier: f64,
}

impl IqrBounds {
    /// Bounds at `multiplier` interquartile ranges.
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Default for IqrBounds {
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl OutlierBounds for IqrBounds {
    fn bounds(&self, values: &[f64]) -> (f64, f64) {
        if values.iter().all(|&v| v == 0.0) {
            return (0.0, 0.0);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (q1, q3) = (quartile(&sorted, 1), quartile(&sorted, 3));
        let iqr = q3 - q1;
        (q1 - self.multiplier * iqr, q3 + self.multiplier * iqr)
    }
}

/// `k`-th quartile of non-empty `sorted`, interpolating linearly between ranks.
fn quartile(sorted: &[f64], k: usize) -> f64 {
    let scaled = k * (sorted.len() - 1);
    let (index, rem) = (scaled / 4, scaled % 4);
    let lo = sorted[index];
    if rem == 0 {
        lo
    } else {
        lo + (sorted[index + 1] - lo) * rem as f64 / 4.0
    }
}

/// Padded limits of the values `rule` keeps, or `None` if it keeps nothing.
///
/// A single distinct inlier is padded relative to its magnitude, or by `pad` if it is zero.
fn inlier_limits(values: &[f64], rule: &dyn OutlierBounds, pad: f64) -> Option<(f64, f64)> {
    let (lower, upper) = rule.bounds(values);
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| lower <= *v && *v <= upper)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })?;
    let scale = if max > min {
        max - min
    } else if min != 0.0 {
        min.abs()
    } else {
        1.0
    };
    Some((min - pad * scale, max + pad * scale))
}

/// Fits the view of `canvas` to the inliers of `points`, padded by `pad` of the inlier span.
///
/// Each axis is judged by its own rule and left as is when the rule keeps no values. Returns
/// the resulting window.
pub fn rescale_clip_outliers<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[Point],
    x_bounds: &dyn OutlierBounds,
    y_bounds: &dyn OutlierBounds,
    pad: f64,
) -> Result<Rect, OutsetError> {
    if !(pad.is_finite() && pad >= 0.0) {
        return Err(OutsetError::InvalidPad(pad));
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let current = canvas.view_window();
    let (x0, x1) = inlier_limits(&xs, x_bounds, pad).unwrap_or((current.x0, current.x1));
    let (y0, y1) = inlier_limits(&ys, y_bounds, pad).unwrap_or((current.y0, current.y1));
    let window = Rect::new(x0, y0, x1, y1);
    debug!(?current, ?window, "fitting view to inliers");
    if window != current {
        canvas.set_view_window(window);
    }
    Ok(window)
}

/// Default style for edge stubs: red, large and above everything else.
pub fn edge_stub_style(color: Color) -> MarkerStyle {
    MarkerStyle {
        color,
        accent: css::WHITE,
        size: 12.0,
        z_order: z_order::EDGE_STUBS,
    }
}

#[allow(clippy::cast_possible_truncation, reason = "saturating cast of a non-negative ratio")]
fn whole_spans(distance: f64, span: f64) -> u32 {
    (distance / span) as u32
}

fn check_offset(offset: f64) -> Result<(), OutsetError> {
    if offset.is_finite() && offset >= 0.0 {
        Ok(())
    } else {
        Err(OutsetError::InvalidPad(offset))
    }
}

/// Stubs for `point` against `window`: where to park it and which edges it crossed.
fn edge_stubs(window: Rect, point: Point, offset: f64) -> (Point, Vec<Glyph>) {
    let (width, height) = (window.width(), window.height());
    let mut at = point;
    let mut stubs = Vec::new();
    if point.x < window.x0 {
        at.x = window.x0 - width * offset;
        stubs.push(Glyph::EdgeStub {
            edge: Edge::Left,
            spans: whole_spans(window.x0 - point.x, width),
        });
    } else if point.x > window.x1 {
        at.x = window.x1 + width * offset;
        stubs.push(Glyph::EdgeStub {
            edge: Edge::Right,
            spans: whole_spans(point.x - window.x1, width),
        });
    }
    if point.y < window.y0 {
        at.y = window.y0 - height * offset;
        stubs.push(Glyph::EdgeStub {
            edge: Edge::Bottom,
            spans: whole_spans(window.y0 - point.y, height),
        });
    } else if point.y > window.y1 {
        at.y = window.y1 + height * offset;
        stubs.push(Glyph::EdgeStub {
            edge: Edge::Top,
            spans: whole_spans(point.y - window.y1, height),
        });
    }
    (at, stubs)
}

/// Draws edge stubs for one point outside the view and returns where the point was parked.
///
/// The point is moved `offset` of the view span past each edge it lies beyond; a point beyond
/// both a horizontal and a vertical edge gets two stubs. Points inside the view are returned
/// unchanged and draw nothing.
pub fn stub_edge_mark<C: Canvas + ?Sized>(
    canvas: &mut C,
    point: Point,
    style: &MarkerStyle,
    offset: f64,
) -> Result<Point, OutsetError> {
    check_offset(offset)?;
    let (at, stubs) = edge_stubs(canvas.view_window(), point, offset);
    for stub in &stubs {
        canvas.draw_marker(at, stub, style);
    }
    Ok(at)
}

/// Stubs every point of `points` that lies outside the view.
///
/// Returns the points with the clipped ones parked in the margin, in input order, ready to be
/// drawn in place of the originals.
pub fn stub_all_clipped_values<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[Point],
    style: &MarkerStyle,
    offset: f64,
) -> Result<Vec<Point>, OutsetError> {
    check_offset(offset)?;
    let window = canvas.view_window();
    let mut stubbed = 0_usize;
    let parked: Vec<Point> = points
        .iter()
        .map(|&point| {
            let (at, stubs) = edge_stubs(window, point, offset);
            if !stubs.is_empty() {
                stubbed += 1;
            }
            for stub in &stubs {
                canvas.draw_marker(at, stub, style);
            }
            at
        })
        .collect();
    debug!(stubbed, total = points.len(), "stubbed clipped values");
    Ok(parked)
}
