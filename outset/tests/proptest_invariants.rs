// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for marquee layout.
//!
//! 1. Outer pads occupy exactly the requested fraction of the padded span.
//! 2. Non-tight marquee rendering never shrinks a view.
//! 3. Forcing a view to its own aspect is a no-op.
//! 4. The consensus aspect lies between the extremes and every view matches it afterwards.
//! 5. Leader outlines never self-intersect.
//! 6. Corner layouts return the requested number of in-bounds insets.

use kurbo::{Point, Rect, Size};
use outset::{
    Canvas, Corner, CornerInsetSpec, GroupKey, MarqueeConfig, OuterPad, PadUnit,
    PointGroup, ScenePanel, StretchUnit, ViewMetrics, compose_leader, compute_aspect,
    consensus_aspect, equalize_aspect, forced_window, layout_corner_insets,
    pad_from_axes_fraction, render_marquees,
};
use peniko::color::palette::css;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-100.0..100.0, -100.0..100.0, 0.01..50.0, 0.01..50.0)
        .prop_map(|(x, y, w, h): (f64, f64, f64, f64)| Rect::new(x, y, x + w, y + h))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-50.0..50.0, -50.0..50.0).prop_map(|(x, y): (f64, f64)| Point::new(x, y))
}

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<Point>>> {
    proptest::collection::vec(proptest::collection::vec(point_strategy(), 1..6), 1..4)
}

fn corner_strategy() -> impl Strategy<Value = Corner> {
    prop_oneof![
        Just(Corner::NorthEast),
        Just(Corner::NorthWest),
        Just(Corner::SouthEast),
        Just(Corner::SouthWest),
    ]
}

fn contains(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && outer.x1 >= inner.x1 && outer.y1 >= inner.y1
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(b - o)
}

/// Strict crossing of two segments; touching endpoints do not count.
fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

fn panel_with_window(window: Rect) -> ScenePanel {
    let mut panel = ScenePanel::new(Rect::new(0.1, 0.1, 0.9, 0.9), Size::new(5.0, 4.0));
    panel.set_view_window(window);
    panel
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Pad round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn axes_pad_round_trips(span in 0.01f64..1.0e4, fraction in 0.0f64..0.49) {
        let pad = pad_from_axes_fraction(span, fraction);
        prop_assert!((pad / (span + 2.0 * pad) - fraction).abs() < 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. No-shrink across non-tight calls
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_tight_rendering_never_shrinks(
        window in rect_strategy(),
        first in groups_strategy(),
        second in groups_strategy(),
        pad in 0.0f64..0.4,
    ) {
        let mut panel = panel_with_window(window);
        let config = MarqueeConfig::default()
            .with_outer_pad(OuterPad::Relative(pad), PadUnit::Axes)
            .with_tight(false);
        let to_groups = |points: Vec<Vec<Point>>| -> Vec<PointGroup> {
            points
                .into_iter()
                .enumerate()
                .map(|(i, pts)| {
                    PointGroup::new(GroupKey { outset: i, hue: 0 }, css::TEAL, pts).unwrap()
                })
                .collect()
        };

        let before = panel.view_window();
        render_marquees(&mut panel, &to_groups(first), &config, None).unwrap();
        let middle = panel.view_window();
        prop_assert!(contains(middle, before), "{middle:?} lost part of {before:?}");

        render_marquees(&mut panel, &to_groups(second), &config, None).unwrap();
        let after = panel.view_window();
        prop_assert!(contains(after, middle), "{after:?} lost part of {middle:?}");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Forcing a view to its own aspect
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn own_aspect_is_a_fixed_point(window in rect_strategy()) {
        prop_assert_eq!(forced_window(window, compute_aspect(window)), window);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Consensus aspect
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn consensus_is_bracketed_and_applied(
        windows in proptest::collection::vec(rect_strategy(), 1..6),
    ) {
        let aspects: Vec<f64> = windows.iter().copied().map(compute_aspect).collect();
        let lo = aspects.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = aspects.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let consensus = consensus_aspect(aspects.iter().copied());
        prop_assert!(lo * (1.0 - 1e-12) <= consensus && consensus <= hi * (1.0 + 1e-12));

        let mut panels: Vec<ScenePanel> = windows.into_iter().map(panel_with_window).collect();
        let originals: Vec<Rect> = panels.iter().map(|p| p.view_window()).collect();
        let target = equalize_aspect(panels.iter_mut());
        for (panel, original) in panels.iter().zip(originals) {
            let aspect = compute_aspect(panel.view_window());
            prop_assert!((aspect - target).abs() <= 1e-6 * target, "{aspect} vs {target}");
            prop_assert!(contains(panel.view_window(), original));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Leader outlines are simple polygons
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn leader_outline_never_self_intersects(
        frame in rect_strategy(),
        window in rect_strategy(),
        stretch in 0.01f64..0.5,
    ) {
        let metrics = ViewMetrics {
            window,
            physical: Size::new(4.0, 3.0),
            occupied: Size::new(0.8, 0.8),
        };
        let leader = compose_leader(frame, &metrics, stretch, StretchUnit::Axes).unwrap();
        let [a, b, c, d] = leader.outline();
        prop_assert!(!segments_cross(a, b, c, d), "edges ab and cd cross: {leader:?}");
        prop_assert!(!segments_cross(b, c, d, a), "edges bc and da cross: {leader:?}");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Corner layouts stay in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn corner_layouts_stay_in_bounds(
        count in 1usize..=5,
        corner in corner_strategy(),
        grid_size in 0.1f64..=1.0,
        pad_ratio in 0.0f64..0.9,
    ) {
        let spec = CornerInsetSpec::default()
            .with_grid_size(grid_size)
            .with_pad_ratio(pad_ratio);
        let rects = layout_corner_insets(count, corner, &spec);
        prop_assert_eq!(rects.len(), count);
        let unit = Rect::new(-1e-12, -1e-12, 1.0 + 1e-12, 1.0 + 1e-12);
        for rect in rects {
            prop_assert!(contains(unit, rect), "{rect:?} leaves the unit square");
        }
    }
}
