// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee compositing: frames, view padding and draw ordering.
//!
//! Drawing a batch of marquees is three steps:
//! - **Frame**: each point group's extent is padded by the inner pad.
//! - **Pre-pad**: the view is fitted (or grown) to the union of frames, then grown again by the
//!   outer pad measured against the fitted view. Flat axes keep their limits while fitting.
//! - **Draw**: groups are drawn in key order, each as frame, leader and glyph.
//!
//! Outside of tight mode a view never shrinks, so repeated calls on the same canvas only ever
//! reveal more.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use tracing::debug;

use crate::canvas::Canvas;
use crate::config::MarqueeConfig;
use crate::error::OutsetError;
use crate::geometry::{compose_leader, extent, validate_frame};
use crate::glyph::GlyphFactory;
use crate::units::{InnerPad, OuterPad, PadUnit, ViewMetrics, inner_pad_data, outer_pad_data};
use crate::z_order;

/// Draw-order key of a point group: its position in the outset order, then in the hue order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Index into the outset order.
    pub outset: usize,
    /// Index into the hue order.
    pub hue: usize,
}

/// Points that share one marquee.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    /// Draw-order key.
    pub key: GroupKey,
    /// Marquee colour.
    pub color: Color,
    points: Vec<Point>,
}

impl PointGroup {
    /// Creates a group. Groups are never empty.
    pub fn new(key: GroupKey, color: Color, points: Vec<Point>) -> Result<Self, OutsetError> {
        if points.is_empty() {
            return Err(OutsetError::EmptyPoints);
        }
        Ok(Self { key, color, points })
    }

    /// The group's points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A group's frame: its extent padded by `pad`, with relative pads measured against `window`
/// where the extent is flat.
pub fn padded_frame(points: &[Point], window: Rect, pad: InnerPad) -> Result<Rect, OutsetError> {
    let bounds = extent(points)?;
    let delta = inner_pad_data(bounds, window, pad);
    Ok(bounds.inflate(delta.x, delta.y))
}

fn fit_view<C: Canvas + ?Sized>(canvas: &mut C, window: Rect) -> Rect {
    let current = canvas.view_window();
    debug!(?current, ?window, "fitting view to marquees");
    if window != current {
        canvas.set_view_window(window);
    }
    window
}

/// Replaces `current` by `target` on every axis where `target` has extent.
fn replace_spanned(current: Rect, target: Rect) -> Rect {
    let (x0, x1) = if target.width() > 0.0 {
        (target.x0, target.x1)
    } else {
        (current.x0, current.x1)
    };
    let (y0, y1) = if target.height() > 0.0 {
        (target.y0, target.y1)
    } else {
        (current.y0, current.y1)
    };
    Rect::new(x0, y0, x1, y1)
}

/// Fits `canvas`'s view to `frames` plus the outer pad and returns the resulting window.
///
/// A pristine view, or a `tight` call, replaces the window; otherwise the window only grows. The
/// outer pad is resolved against the window after the frames have been fitted so that it holds
/// as a proportion of the final view. An axis along which the frames are flat keeps its current
/// limits for that measurement.
pub fn prepad_view<C: Canvas + ?Sized>(
    canvas: &mut C,
    frames: &[Rect],
    outer_pad: OuterPad,
    outer_pad_unit: PadUnit,
    tight: bool,
) -> Result<Rect, OutsetError> {
    outer_pad.validate(outer_pad_unit)?;
    let Some((first, rest)) = frames.split_first() else {
        return Ok(canvas.view_window());
    };
    let union = rest.iter().fold(*first, |acc, frame| acc.union(*frame));
    let replace = tight || canvas.is_pristine();
    let current = canvas.view_window();
    let fitted = fit_view(
        canvas,
        if replace {
            replace_spanned(current, union)
        } else {
            current.union(union)
        },
    );

    let pad = outer_pad_data(&ViewMetrics::of(canvas), outer_pad, outer_pad_unit)?;
    let padded = union.inflate(pad.x, pad.y);
    let target = if replace {
        padded
    } else {
        padded.union(fitted)
    };
    Ok(fit_view(canvas, target))
}

/// Draws one marquee: frame, leader (unless the stretch is zero) and glyph.
pub fn draw_marquee<C: Canvas + ?Sized>(
    canvas: &mut C,
    frame: Rect,
    color: Color,
    config: &MarqueeConfig,
    glyphs: Option<&mut (dyn GlyphFactory + '_)>,
) -> Result<(), OutsetError> {
    validate_frame(frame)?;
    let metrics = ViewMetrics::of(canvas);
    let z = config.z_order + z_order::depth_perturbation(frame, metrics.window);
    let leader = config.leader_tweak.apply(compose_leader(
        frame,
        &metrics,
        config.leader_stretch,
        config.leader_stretch_unit,
    )?);

    canvas.draw_rect(frame, &config.frame_style(color, z));
    if config.leader_stretch > 0.0 {
        canvas.draw_polygon(&leader.outline(), &config.leader_style(color, z));
    }
    if let Some(glyphs) = glyphs {
        let glyph = glyphs.next_glyph();
        canvas.draw_marker(
            leader.glyph_anchor(config.mark_retract),
            &glyph,
            &config.marker_style(color, z),
        );
    }
    Ok(())
}

/// Frames every group, fits the view and draws the marquees in key order.
///
/// Returns the frames in draw order. Groups with equal keys keep their input order.
pub fn render_marquees<C: Canvas + ?Sized>(
    canvas: &mut C,
    groups: &[PointGroup],
    config: &MarqueeConfig,
    mut glyphs: Option<&mut (dyn GlyphFactory + '_)>,
) -> Result<Vec<Rect>, OutsetError> {
    if config.leader_stretch.is_nan() || config.leader_stretch < 0.0 {
        return Err(OutsetError::NegativeStretch(config.leader_stretch));
    }
    let window = canvas.view_window();
    let mut framed = Vec::with_capacity(groups.len());
    for group in groups {
        assert!(!group.points.is_empty(), "point groups are never empty");
        let frame = padded_frame(&group.points, window, config.inner_pad)?;
        validate_frame(frame)?;
        framed.push((group.key, group.color, frame));
    }
    let frames: Vec<Rect> = framed.iter().map(|(_, _, frame)| *frame).collect();
    prepad_view(
        canvas,
        &frames,
        config.outer_pad,
        config.outer_pad_unit,
        config.tight,
    )?;

    framed.sort_by_key(|(key, _, _)| *key);
    for (_, color, frame) in &framed {
        draw_marquee(canvas, *frame, *color, config, glyphs.as_deref_mut())?;
    }
    Ok(framed.into_iter().map(|(_, _, frame)| frame).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{BadgeSequence, Glyph};
    use crate::scene::{DrawCommand, ScenePanel};
    use crate::units::StretchUnit;
    use alloc::vec;
    use kurbo::{Size, Vec2};
    use peniko::color::palette::css;

    fn panel() -> ScenePanel {
        ScenePanel::new(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(4.0, 4.0))
    }

    fn group(outset: usize, points: &[(f64, f64)]) -> PointGroup {
        PointGroup::new(
            GroupKey { outset, hue: 0 },
            css::RED,
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        )
        .unwrap()
    }

    fn assert_rect_close(actual: Rect, expected: Rect) {
        let err = (actual.x0 - expected.x0).abs()
            + (actual.y0 - expected.y0).abs()
            + (actual.x1 - expected.x1).abs()
            + (actual.y1 - expected.y1).abs();
        assert!(err < 1e-9, "expected {expected:?}, got {actual:?}");
    }

    #[test]
    fn empty_groups_are_rejected() {
        let err = PointGroup::new(GroupKey::default(), css::RED, vec![]).unwrap_err();
        assert_eq!(err, OutsetError::EmptyPoints);
    }

    #[test]
    fn flat_groups_pad_against_the_view() {
        let frame = padded_frame(
            &[Point::new(1.0, 2.0), Point::new(1.0, 4.0)],
            Rect::new(0.0, 0.0, 10.0, 10.0),
            InnerPad::Relative(0.1),
        )
        .unwrap();
        assert_rect_close(frame, Rect::new(0.0, 1.8, 2.0, 4.2));
    }

    #[test]
    fn pristine_view_is_replaced_then_padded() {
        let mut canvas = panel();
        let window = prepad_view(
            &mut canvas,
            &[Rect::new(2.0, 2.0, 4.0, 6.0)],
            OuterPad::Relative(0.25),
            PadUnit::Axes,
            false,
        )
        .unwrap();
        assert_rect_close(window, Rect::new(1.0, 0.0, 5.0, 8.0));
        assert_eq!(canvas.view_window(), window);
    }

    #[test]
    fn drawn_view_never_shrinks() {
        let mut canvas = panel();
        canvas.set_view_window(Rect::new(0.0, 0.0, 100.0, 100.0));
        let window = prepad_view(
            &mut canvas,
            &[Rect::new(2.0, 2.0, 4.0, 6.0)],
            OuterPad::Relative(0.1),
            PadUnit::Axes,
            false,
        )
        .unwrap();
        // The outer pad is measured against the grown view.
        assert_rect_close(window, Rect::new(-10.5, -10.5, 100.0, 100.0));
    }

    #[test]
    fn tight_view_shrinks_to_frames() {
        let mut canvas = panel();
        canvas.set_view_window(Rect::new(0.0, 0.0, 100.0, 100.0));
        let window = prepad_view(
            &mut canvas,
            &[Rect::new(2.0, 2.0, 4.0, 6.0)],
            OuterPad::Absolute(Vec2::new(1.0, 1.0)),
            PadUnit::Axes,
            true,
        )
        .unwrap();
        assert_eq!(window, Rect::new(1.0, 1.0, 5.0, 7.0));
    }

    #[test]
    fn marquees_draw_in_key_order() {
        let mut canvas = panel();
        let groups = [
            group(1, &[(5.0, 5.0), (6.0, 6.0)]),
            group(0, &[(1.0, 1.0), (2.0, 2.0)]),
        ];
        let mut badges = BadgeSequence::numerical(1, 1);
        let config = MarqueeConfig::default()
            .with_inner_pad(InnerPad::Relative(0.0))
            .with_leader_stretch(0.25, StretchUnit::Inches);
        let frames = render_marquees(&mut canvas, &groups, &config, Some(&mut badges)).unwrap();
        assert_eq!(
            frames,
            [Rect::new(1.0, 1.0, 2.0, 2.0), Rect::new(5.0, 5.0, 6.0, 6.0)]
        );

        let kinds: Vec<_> = canvas
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Rect { .. } => "rect",
                DrawCommand::Polygon { .. } => "polygon",
                DrawCommand::Marker { .. } => "marker",
            })
            .collect();
        assert_eq!(
            kinds,
            ["rect", "polygon", "marker", "rect", "polygon", "marker"]
        );
        let DrawCommand::Marker { glyph, .. } = &canvas.commands()[2] else {
            panic!("expected a marker");
        };
        assert_eq!(*glyph, Glyph::Badge("1".into()));
    }

    #[test]
    fn zero_stretch_skips_leader_but_keeps_glyph() {
        let mut canvas = panel();
        let config = MarqueeConfig::default().with_leader_stretch(0.0, StretchUnit::Axes);
        let mut glyphs = crate::glyph::FixedGlyph(Glyph::Asterisk);
        render_marquees(
            &mut canvas,
            &[group(0, &[(0.0, 0.0), (1.0, 1.0)])],
            &config,
            Some(&mut glyphs),
        )
        .unwrap();
        assert_eq!(canvas.rect_count(), 1);
        assert_eq!(canvas.polygon_count(), 0);
        assert_eq!(canvas.marker_count(), 1);
    }

    #[test]
    fn negative_stretch_draws_nothing() {
        let mut canvas = panel();
        let config = MarqueeConfig::default().with_leader_stretch(-1.0, StretchUnit::Axes);
        let err = render_marquees(&mut canvas, &[group(0, &[(0.0, 0.0)])], &config, None);
        assert_eq!(err, Err(OutsetError::NegativeStretch(-1.0)));
        assert!(canvas.commands().is_empty(), "validation happens before drawing");
    }

    #[test]
    fn single_point_pads_against_the_kept_view() {
        let mut canvas = panel();
        let window = prepad_view(
            &mut canvas,
            &[Rect::new(1000.0, 500.0, 1000.0, 500.0)],
            OuterPad::Relative(0.1),
            PadUnit::Axes,
            true,
        )
        .unwrap();
        assert_rect_close(window, Rect::new(999.875, 499.875, 1000.125, 500.125));
    }

    #[test]
    fn flat_axis_keeps_its_limits_while_the_other_is_replaced() {
        let mut canvas = panel();
        let window = prepad_view(
            &mut canvas,
            &[Rect::new(2.0, 5.0, 6.0, 5.0)],
            OuterPad::Relative(0.1),
            PadUnit::Axes,
            false,
        )
        .unwrap();
        assert_rect_close(window, Rect::new(1.5, 4.875, 6.5, 5.125));
    }

    #[test]
    fn reversed_frames_leave_the_view_alone() {
        let mut canvas = panel();
        canvas.set_view_window(Rect::new(0.0, 0.0, 10.0, 10.0));
        let config = MarqueeConfig::default().with_inner_pad(InnerPad::Relative(-1.0));
        let groups = [group(0, &[(1.0, 1.0), (3.0, 3.0)])];
        let err = render_marquees(&mut canvas, &groups, &config, None);
        assert_eq!(
            err,
            Err(OutsetError::NonAscendingBounds { min: 3.0, max: 1.0 })
        );
        assert_eq!(canvas.view_window(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn invalid_outer_pad_leaves_the_view_alone() {
        let mut canvas = panel();
        canvas.set_view_window(Rect::new(0.0, 0.0, 10.0, 10.0));
        let err = prepad_view(
            &mut canvas,
            &[Rect::new(20.0, 20.0, 30.0, 30.0)],
            OuterPad::Relative(-0.1),
            PadUnit::Axes,
            false,
        );
        assert_eq!(err, Err(OutsetError::InvalidPad(-0.1)));
        assert_eq!(canvas.view_window(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
