// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry kernel: intersections, extents and leader construction.
//!
//! Coordinates are data space with y up: a frame's "upper" edge is `y1`.

use kurbo::{Point, Rect, Vec2};

use crate::error::OutsetError;
use crate::units::{StretchUnit, ViewMetrics, stretch_offset};

/// Intersection of the line through `p1`, `p2` with the line through `p3`, `p4`.
///
/// Parallel or degenerate lines have no unique intersection and yield `(NaN, NaN)`.
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Point {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det == 0.0 {
        return Point::new(f64::NAN, f64::NAN);
    }
    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    Point::new(
        (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / det,
        (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / det,
    )
}

fn closed_perimeter(points: &[Point]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut total = 0.0;
    for &point in points {
        total += prev.distance(point);
        prev = point;
    }
    total
}

/// Advances `order` to the next permutation in lexicographic order.
///
/// Returns `false` once `order` is the last permutation.
fn next_permutation(order: &mut [usize]) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && order[i - 1] >= order[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while order[j] <= order[i - 1] {
        j -= 1;
    }
    order.swap(i - 1, j);
    order[i..].reverse();
    true
}

/// Reorders `points` so the closed polygon through them has minimal perimeter.
///
/// Every permutation is tried in lexicographic index order and the first minimum wins, so ties
/// resolve deterministically towards the input order. Intended for a handful of vertices.
pub fn minimal_perimeter_order<const N: usize>(points: [Point; N]) -> [Point; N] {
    let mut order: [usize; N] = core::array::from_fn(|i| i);
    let mut best = points;
    let mut best_perimeter = closed_perimeter(&points);
    while next_permutation(&mut order) {
        let candidate: [Point; N] = core::array::from_fn(|i| points[order[i]]);
        let perimeter = closed_perimeter(&candidate);
        if perimeter < best_perimeter {
            best = candidate;
            best_perimeter = perimeter;
        }
    }
    best
}

/// Bounding box of a point set.
pub fn extent(points: &[Point]) -> Result<Rect, OutsetError> {
    let (first, rest) = points.split_first().ok_or(OutsetError::EmptyPoints)?;
    let mut bounds = Rect::from_points(*first, *first);
    for &point in rest {
        bounds = bounds.union_pt(point);
    }
    Ok(bounds)
}

/// Checks that a frame's bounds are ascending on both axes.
///
/// NaN bounds are rejected too.
pub fn validate_frame(frame: Rect) -> Result<(), OutsetError> {
    for (min, max) in [(frame.x0, frame.x1), (frame.y0, frame.y1)] {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(OutsetError::NonAscendingBounds { min, max });
        }
    }
    Ok(())
}

/// The four vertices of a marquee leader.
///
/// The leader is a trapezoid spanned by the frame's top and right edges and an outer vertex
/// projected out along the frame diagonal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leader {
    /// Frame upper-left corner.
    pub upper_left: Point,
    /// Frame upper-right corner; the glyph anchor is pulled towards it.
    pub upper_right: Point,
    /// Frame lower-right corner.
    pub lower_right: Point,
    /// Projected outer vertex.
    pub outer: Point,
}

impl Leader {
    /// Vertices in canonical order: upper-left, upper-right, lower-right, outer.
    pub fn vertices(&self) -> [Point; 4] {
        [self.upper_left, self.upper_right, self.lower_right, self.outer]
    }

    /// Vertices reordered so the polygon through them does not self-intersect.
    pub fn outline(&self) -> [Point; 4] {
        minimal_perimeter_order(self.vertices())
    }

    /// Glyph position: `retract` of the way from the outer vertex back to the frame corner.
    pub fn glyph_anchor(&self, retract: f64) -> Point {
        self.outer.lerp(self.upper_right, retract)
    }

    /// Applies `f` to every vertex.
    pub fn map(self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            upper_left: f(self.upper_left),
            upper_right: f(self.upper_right),
            lower_right: f(self.lower_right),
            outer: f(self.outer),
        }
    }
}

/// Builds the leader for `frame` in a view described by `metrics`.
///
/// The outer vertex continues the frame diagonal past the upper-right corner at the angle the
/// diagonal appears on screen, which depends on the view's aspect. `stretch` is measured in
/// `unit`.
pub fn compose_leader(
    frame: Rect,
    metrics: &ViewMetrics,
    stretch: f64,
    unit: StretchUnit,
) -> Result<Leader, OutsetError> {
    validate_frame(frame)?;
    if stretch.is_nan() || stretch < 0.0 {
        return Err(OutsetError::NegativeStretch(stretch));
    }
    let window = metrics.window;
    // atan(fh / fw * vw / vh), with pi/2 for zero-width frames and 0 for points.
    let theta = Vec2::new(
        frame.width() * window.height(),
        frame.height() * window.width(),
    )
    .atan2();
    let direction = Vec2::from_angle(theta) * stretch;
    let upper_right = Point::new(frame.x1, frame.y1);
    Ok(Leader {
        upper_left: Point::new(frame.x0, frame.y1),
        upper_right,
        lower_right: Point::new(frame.x1, frame.y0),
        outer: upper_right + stretch_offset(frame, metrics, direction, unit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn assert_point_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn unit_metrics() -> ViewMetrics {
        ViewMetrics {
            window: Rect::new(0.0, 0.0, 1.0, 1.0),
            physical: Size::new(1.0, 1.0),
            occupied: Size::new(1.0, 1.0),
        }
    }

    #[test]
    fn intersection_of_crossing_diagonals() {
        let p = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
        );
        assert_point_close(p, Point::new(1.0, 1.0));
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let p = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
        );
        assert!(p.x.is_nan() && p.y.is_nan(), "got {p:?}");
    }

    #[test]
    fn permutations_are_lexicographic() {
        let mut order = [0, 1, 2];
        let mut seen = alloc::vec![order];
        while next_permutation(&mut order) {
            seen.push(order);
        }
        assert_eq!(
            seen,
            [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]]
        );
    }

    #[test]
    fn bowtie_is_untangled() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let ordered = minimal_perimeter_order(square);
        assert_eq!(
            ordered,
            [
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn convex_input_keeps_its_order() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_eq!(minimal_perimeter_order(square), square);
    }

    #[test]
    fn extent_covers_all_points() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(3.0, 2.0),
            Point::new(-1.0, 4.0),
        ];
        assert_eq!(extent(&points), Ok(Rect::new(-1.0, 1.0, 3.0, 4.0)));
        assert_eq!(extent(&[]), Err(OutsetError::EmptyPoints));
    }

    #[test]
    fn square_frame_in_square_view_leaves_at_45_degrees() {
        let frame = Rect::new(0.2, 0.2, 0.4, 0.4);
        let leader = compose_leader(frame, &unit_metrics(), 0.1, StretchUnit::Axes).unwrap();
        let step = 0.1 * core::f64::consts::FRAC_1_SQRT_2;
        assert_point_close(leader.outer, Point::new(0.4 + step, 0.4 + step));
        assert_eq!(leader.upper_left, Point::new(0.2, 0.4));
        assert_eq!(leader.lower_right, Point::new(0.4, 0.2));
    }

    #[test]
    fn degenerate_frames_pick_a_fallback_angle() {
        let m = unit_metrics();
        let vertical = compose_leader(Rect::new(0.5, 0.2, 0.5, 0.4), &m, 0.1, StretchUnit::Axes)
            .unwrap();
        assert_point_close(vertical.outer, Point::new(0.5, 0.5));

        let point = compose_leader(Rect::new(0.5, 0.5, 0.5, 0.5), &m, 0.1, StretchUnit::Axes)
            .unwrap();
        assert_point_close(point.outer, Point::new(0.6, 0.5));
    }

    #[test]
    fn glyph_anchor_retracts_towards_corner() {
        let frame = Rect::new(0.0, 0.0, 0.5, 0.5);
        let leader = compose_leader(frame, &unit_metrics(), 0.2, StretchUnit::Axes).unwrap();
        assert_point_close(leader.glyph_anchor(0.0), leader.outer);
        assert_point_close(leader.glyph_anchor(1.0), leader.upper_right);
    }

    #[test]
    fn invalid_leader_arguments_are_rejected() {
        let m = unit_metrics();
        assert_eq!(
            compose_leader(Rect::new(0.0, 0.0, 1.0, 1.0), &m, -0.1, StretchUnit::Axes),
            Err(OutsetError::NegativeStretch(-0.1))
        );
        let reversed = Rect {
            x0: 1.0,
            y0: 0.0,
            x1: 0.0,
            y1: 1.0,
        };
        assert_eq!(
            compose_leader(reversed, &m, 0.1, StretchUnit::Axes),
            Err(OutsetError::NonAscendingBounds { min: 1.0, max: 0.0 })
        );
    }
}
