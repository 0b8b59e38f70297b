// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adjustments applied to a leader before it is drawn.

use kurbo::{Point, Vec2};

use crate::geometry::Leader;

/// Adjusts a freshly composed leader.
///
/// Tweaks run before vertex ordering, so the drawn polygon stays simple whatever they do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LeaderTweak {
    /// Leave the leader as composed.
    #[default]
    Identity,
    /// Mirror the leader about the frame centre.
    ///
    /// A horizontal reflection makes the leader leave from the upper-left corner instead.
    Reflect {
        /// Mirror left to right.
        horizontal: bool,
        /// Mirror top to bottom.
        vertical: bool,
    },
    /// Push outer vertices that land inside a crowded region away from its centre.
    SpreadArea {
        /// Scale applied to the outer vertex's offset from the region centre, per axis.
        factor: Vec2,
        /// Horizontal range of the region; `None` leaves the x coordinate alone.
        xlim: Option<(f64, f64)>,
        /// Vertical range of the region; `None` leaves the y coordinate alone.
        ylim: Option<(f64, f64)>,
    },
}

impl LeaderTweak {
    /// Applies the tweak.
    pub fn apply(&self, leader: Leader) -> Leader {
        match *self {
            Self::Identity => leader,
            Self::Reflect {
                horizontal,
                vertical,
            } => {
                let centre = leader.upper_left.midpoint(leader.lower_right);
                leader.map(|p| {
                    Point::new(
                        if horizontal { 2.0 * centre.x - p.x } else { p.x },
                        if vertical { 2.0 * centre.y - p.y } else { p.y },
                    )
                })
            }
            Self::SpreadArea { factor, xlim, ylim } => {
                let outer = leader.outer;
                let spread = |value: f64, lim: Option<(f64, f64)>, factor: f64| match lim {
                    Some((lo, hi)) if lo <= value && value <= hi => {
                        let centre = (lo + hi) / 2.0;
                        centre + (value - centre) * factor
                    }
                    _ => value,
                };
                Leader {
                    outer: Point::new(
                        spread(outer.x, xlim, factor.x),
                        spread(outer.y, ylim, factor.y),
                    ),
                    ..leader
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader() -> Leader {
        Leader {
            upper_left: Point::new(0.0, 1.0),
            upper_right: Point::new(1.0, 1.0),
            lower_right: Point::new(1.0, 0.0),
            outer: Point::new(2.0, 2.0),
        }
    }

    #[test]
    fn identity_leaves_leader_alone() {
        assert_eq!(LeaderTweak::Identity.apply(leader()), leader());
    }

    #[test]
    fn horizontal_reflection_mirrors_about_frame_centre() {
        let tweak = LeaderTweak::Reflect {
            horizontal: true,
            vertical: false,
        };
        let reflected = tweak.apply(leader());
        assert_eq!(reflected.outer, Point::new(-1.0, 2.0));
        assert_eq!(reflected.upper_right, Point::new(0.0, 1.0));
        assert_eq!(reflected.upper_left, Point::new(1.0, 1.0));
    }

    #[test]
    fn spread_only_moves_vertices_inside_the_region() {
        let tweak = LeaderTweak::SpreadArea {
            factor: Vec2::new(2.0, 3.0),
            xlim: Some((1.0, 3.0)),
            ylim: Some((5.0, 6.0)),
        };
        let spread = tweak.apply(leader());
        assert_eq!(spread.outer, Point::new(2.0, 2.0));

        let tweak = LeaderTweak::SpreadArea {
            factor: Vec2::new(2.0, 3.0),
            xlim: Some((0.0, 3.0)),
            ylim: None,
        };
        let spread = tweak.apply(leader());
        assert_eq!(spread.outer, Point::new(2.5, 2.0));
        assert_eq!(spread.upper_right, leader().upper_right);
    }

    #[test]
    fn spread_without_ranges_is_a_no_op() {
        let tweak = LeaderTweak::SpreadArea {
            factor: Vec2::new(2.0, 2.0),
            xlim: None,
            ylim: None,
        };
        let far = Leader {
            outer: Point::new(12.0, 12.0),
            ..leader()
        };
        assert_eq!(tweak.apply(far), far);
    }
}
