// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View aspect ratios: measuring, forcing and agreeing on one.
//!
//! Forcing an aspect only ever widens a view, symmetrically about its centre, so data that was
//! visible stays visible.

use alloc::vec::Vec;

use kurbo::Rect;
use tracing::debug;

use crate::canvas::Canvas;
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Data-space aspect ratio of a view window (`height / width`).
pub fn compute_aspect(window: Rect) -> f64 {
    window.height() / window.width()
}

/// Widens `window` along one axis until its aspect is `target`.
///
/// Windows that already match, and targets or windows without a finite positive aspect, are
/// returned unchanged.
pub fn forced_window(window: Rect, target: f64) -> Rect {
    let current = compute_aspect(window);
    let usable = |a: f64| a.is_finite() && a > 0.0;
    if !usable(target) || !usable(current) {
        debug!(target, current, "aspect not forceable; leaving view unchanged");
        return window;
    }
    if (target - current).abs() <= f64::EPSILON * current.max(target) {
        return window;
    }
    if target < current {
        // Too tall: widen x.
        let grow = (window.width() * current / target - window.width()) / 2.0;
        Rect::new(window.x0 - grow, window.y0, window.x1 + grow, window.y1)
    } else {
        // Too wide: heighten y.
        let grow = (window.height() * target / current - window.height()) / 2.0;
        Rect::new(window.x0, window.y0 - grow, window.x1, window.y1 + grow)
    }
}

/// Forces `canvas`'s view to the `target` aspect without shrinking it.
pub fn force_aspect<C: Canvas + ?Sized>(canvas: &mut C, target: f64) {
    let window = canvas.view_window();
    let forced = forced_window(window, target);
    if forced != window {
        canvas.set_view_window(forced);
    }
}

/// Geometric mean of the smallest and largest aspect, or `1.0` with no input.
pub fn consensus_aspect(aspects: impl IntoIterator<Item = f64>) -> f64 {
    let mut bounds: Option<(f64, f64)> = None;
    for aspect in aspects {
        bounds = Some(match bounds {
            None => (aspect, aspect),
            Some((lo, hi)) => (lo.min(aspect), hi.max(aspect)),
        });
    }
    match bounds {
        Some((lo, hi)) => (lo * hi).sqrt(),
        None => 1.0,
    }
}

/// Forces every canvas to the consensus of their current aspects and returns that aspect.
pub fn equalize_aspect<'a, C: Canvas + ?Sized + 'a>(
    canvases: impl IntoIterator<Item = &'a mut C>,
) -> f64 {
    let mut canvases: Vec<&mut C> = canvases.into_iter().collect();
    let target = consensus_aspect(canvases.iter().map(|c| compute_aspect(c.view_window())));
    debug!(target, panels = canvases.len(), "equalizing aspect");
    for canvas in &mut canvases {
        force_aspect(&mut **canvas, target);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ScenePanel;
    use kurbo::Size;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn tall_window_is_widened() {
        let window = Rect::new(0.0, 0.0, 1.0, 4.0);
        let forced = forced_window(window, 2.0);
        assert_eq!(forced, Rect::new(-0.5, 0.0, 1.5, 4.0));
        assert_close(compute_aspect(forced), 2.0);
    }

    #[test]
    fn wide_window_is_heightened() {
        let window = Rect::new(0.0, 0.0, 4.0, 1.0);
        let forced = forced_window(window, 0.5);
        assert_eq!(forced, Rect::new(0.0, -0.5, 4.0, 1.5));
    }

    #[test]
    fn matching_and_degenerate_targets_are_no_ops() {
        let window = Rect::new(-3.0, 1.0, 7.0, 2.5);
        assert_eq!(forced_window(window, compute_aspect(window)), window);
        assert_eq!(forced_window(window, 0.0), window);
        assert_eq!(forced_window(window, f64::NAN), window);
        let flat = Rect::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(forced_window(flat, 1.0), flat);
    }

    #[test]
    fn consensus_is_geometric_mean_of_extremes() {
        assert_close(consensus_aspect([0.5, 1.0, 8.0]), 2.0);
        assert_close(consensus_aspect([]), 1.0);
    }

    #[test]
    fn equalize_forces_every_panel() {
        let figure_size = Size::new(4.0, 4.0);
        let mut panels = [
            ScenePanel::new(Rect::new(0.0, 0.0, 0.5, 1.0), figure_size),
            ScenePanel::new(Rect::new(0.5, 0.0, 1.0, 1.0), figure_size),
        ];
        panels[0].set_view_window(Rect::new(0.0, 0.0, 1.0, 4.0));
        panels[1].set_view_window(Rect::new(0.0, 0.0, 1.0, 1.0));
        let target = equalize_aspect(panels.iter_mut());
        assert_close(target, 2.0);
        for panel in &panels {
            assert_close(compute_aspect(panel.view_window()), target);
        }
    }
}
