// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for marquee parts.
//!
//! Frames, leaders and glyphs of one marquee share a base z-order; glyphs are lifted above every
//! marquee body. Overlapping marquees are separated by a small depth perturbation so that frames
//! further from the view's upper-right corner, whose leaders cross the most, draw on top.

use kurbo::{Point, Rect};

/// Default base z-order for marquee frames and leaders.
pub const MARQUEE: f64 = 0.0;

/// Offset from a marquee's z-order to its glyph.
pub const GLYPH_LIFT: f64 = 1.01;

/// Largest depth perturbation, applied to a frame at the view's lower-left corner.
pub const DEPTH_TIE_BREAK: f64 = 0.01;

/// Default z-order for data points drawn by the scene figure.
pub const DATA_POINTS: f64 = -1.0;

/// Default z-order for edge stubs, above everything else.
pub const EDGE_STUBS: f64 = 10_000.0;

/// Depth perturbation for `frame` within `window`, in `0..=DEPTH_TIE_BREAK` for frames inside the
/// view.
///
/// The frame's upper-right corner is normalized against the window and its distance from the
/// window's upper-right corner is scaled by the unit-square diagonal.
pub fn depth_perturbation(frame: Rect, window: Rect) -> f64 {
    let corner = Point::new(
        (frame.x1 - window.x0) / window.width(),
        (frame.y1 - window.y0) / window.height(),
    );
    let drop = Point::new(1.0, 1.0) - corner;
    let depth = DEPTH_TIE_BREAK * drop.hypot() / core::f64::consts::SQRT_2;
    if depth.is_finite() { depth } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_grows_away_from_upper_right() {
        let window = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far = depth_perturbation(Rect::new(0.0, 0.0, 1.0, 1.0), window);
        let near = depth_perturbation(Rect::new(8.0, 8.0, 10.0, 10.0), window);
        assert_eq!(near, 0.0);
        assert!(far > near, "far frames draw on top ({far} <= {near})");
        assert!(far <= DEPTH_TIE_BREAK, "perturbation is bounded, got {far}");
    }

    #[test]
    fn degenerate_window_has_no_perturbation() {
        let window = Rect::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(depth_perturbation(Rect::new(1.0, 1.0, 1.0, 1.0), window), 0.0);
    }
}
