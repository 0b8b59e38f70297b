// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pad and stretch quantities, resolved into data-space deltas.
//!
//! Outer pads are specified as a proportion of the *final* view: a pad of `f` axes-fraction means
//! the padding ends up occupying `f` of the padded span on each side. Solving
//! `p / (S + 2p) = f` for the data delta `p` gives `p = f * S / (1 - 2f)`, which every unit below
//! reduces to.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use kurbo::{Point, Rect, Size, Vec2};
use tracing::warn;

use crate::canvas::Canvas;
use crate::error::OutsetError;

/// Largest axes fraction accepted before clipping.
///
/// A fraction of exactly one half would need an infinite pad.
pub const MAX_AXES_PAD_FRACTION: f64 = 0.499;

/// Unit tag for outer pads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PadUnit {
    /// Fraction of the padded view span.
    #[default]
    Axes,
    /// Fraction of the whole figure.
    Figure,
    /// Physical length.
    Inches,
}

/// Unit tag for leader stretch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StretchUnit {
    /// Fraction of the view span.
    Axes,
    /// Fraction of the whole figure.
    Figure,
    /// Physical length from the frame's upper-right corner.
    #[default]
    Inches,
    /// Minimum physical distance from the frame's lower-left corner.
    ///
    /// Leaders on large frames collapse to nothing; leaders on small frames reach out far enough
    /// that every glyph clears its frame by the same amount.
    InchesFrom,
}

impl FromStr for PadUnit {
    type Err = OutsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axes" => Ok(Self::Axes),
            "figure" => Ok(Self::Figure),
            "inches" => Ok(Self::Inches),
            other => Err(OutsetError::UnknownUnit(
                other.to_string(),
                "axes, figure, inches",
            )),
        }
    }
}

impl FromStr for StretchUnit {
    type Err = OutsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axes" => Ok(Self::Axes),
            "figure" => Ok(Self::Figure),
            "inches" => Ok(Self::Inches),
            "inchesfrom" => Ok(Self::InchesFrom),
            other => Err(OutsetError::UnknownUnit(
                other.to_string(),
                "axes, figure, inches, inchesfrom",
            )),
        }
    }
}

impl fmt::Display for PadUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Axes => "axes",
            Self::Figure => "figure",
            Self::Inches => "inches",
        })
    }
}

impl fmt::Display for StretchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Axes => "axes",
            Self::Figure => "figure",
            Self::Inches => "inches",
            Self::InchesFrom => "inchesfrom",
        })
    }
}

/// Inner pad around a group's extent, applied before the frame is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InnerPad {
    /// Fraction of the group's own extent per axis.
    ///
    /// Groups with zero extent along an axis fall back to the view span on that axis.
    Relative(f64),
    /// Data-space pad per axis.
    Absolute(Vec2),
}

impl Default for InnerPad {
    fn default() -> Self {
        Self::Relative(0.1)
    }
}

/// Outer pad between the union of frames and the view edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OuterPad {
    /// Proportion in the accompanying [`PadUnit`].
    Relative(f64),
    /// Data-space pad per axis, used as is.
    Absolute(Vec2),
}

impl Default for OuterPad {
    fn default() -> Self {
        Self::Relative(0.1)
    }
}

impl OuterPad {
    /// Rejects relative pads that cannot be converted in `unit`.
    pub fn validate(self, unit: PadUnit) -> Result<(), OutsetError> {
        let Self::Relative(fraction) = self else {
            return Ok(());
        };
        if !(fraction.is_finite() && fraction >= 0.0) {
            return Err(OutsetError::InvalidPad(fraction));
        }
        if unit == PadUnit::Figure && fraction >= 0.5 {
            return Err(OutsetError::FigurePadTooLarge(fraction));
        }
        Ok(())
    }
}

/// Snapshot of everything unit conversion needs to know about a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMetrics {
    /// Data-space view window.
    pub window: Rect,
    /// Physical size of the drawing area in inches.
    pub physical: Size,
    /// Fraction of the figure occupied by the drawing area, per axis.
    pub occupied: Size,
}

impl ViewMetrics {
    /// Reads the current metrics off a canvas.
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Self {
        Self {
            window: canvas.view_window(),
            physical: canvas.physical_size(),
            occupied: canvas.occupied_fraction(),
        }
    }
}

/// Converts an axes fraction into a data delta against `span`.
///
/// Fractions at or above one half are clipped to [`MAX_AXES_PAD_FRACTION`] with a warning.
pub fn pad_from_axes_fraction(span: f64, fraction: f64) -> f64 {
    let fraction = if fraction >= 0.5 {
        warn!(
            fraction,
            clipped = MAX_AXES_PAD_FRACTION,
            "axes-relative pad must be below 0.5; clipping"
        );
        MAX_AXES_PAD_FRACTION
    } else {
        fraction
    };
    fraction * span / (1.0 - 2.0 * fraction)
}

/// Converts a figure fraction into a data delta, given the fraction of the figure the view
/// occupies along the same axis.
pub fn pad_from_figure_fraction(span: f64, occupied: f64, fraction: f64) -> f64 {
    pad_from_axes_fraction(span, fraction / occupied)
}

/// Converts a physical length into a data delta, given the view's physical extent along the
/// same axis.
pub fn pad_from_length(span: f64, physical: f64, length: f64) -> f64 {
    pad_from_axes_fraction(span, length / physical)
}

/// Resolves an inner pad into a data-space delta for a group with the given extent.
pub fn inner_pad_data(extent: Rect, window: Rect, pad: InnerPad) -> Vec2 {
    match pad {
        InnerPad::Absolute(delta) => delta,
        InnerPad::Relative(fraction) => {
            let width = if extent.width() != 0.0 {
                extent.width()
            } else {
                window.width()
            };
            let height = if extent.height() != 0.0 {
                extent.height()
            } else {
                window.height()
            };
            Vec2::new(fraction * width, fraction * height)
        }
    }
}

/// Resolves an outer pad into a data-space delta against the current view.
pub fn outer_pad_data(
    metrics: &ViewMetrics,
    pad: OuterPad,
    unit: PadUnit,
) -> Result<Vec2, OutsetError> {
    pad.validate(unit)?;
    let fraction = match pad {
        OuterPad::Absolute(delta) => return Ok(delta),
        OuterPad::Relative(fraction) => fraction,
    };
    let window = metrics.window;
    Ok(match unit {
        PadUnit::Axes => Vec2::new(
            pad_from_axes_fraction(window.width(), fraction),
            pad_from_axes_fraction(window.height(), fraction),
        ),
        PadUnit::Figure => Vec2::new(
            pad_from_figure_fraction(window.width(), metrics.occupied.width, fraction),
            pad_from_figure_fraction(window.height(), metrics.occupied.height, fraction),
        ),
        PadUnit::Inches => Vec2::new(
            pad_from_length(window.width(), metrics.physical.width, fraction),
            pad_from_length(window.height(), metrics.physical.height, fraction),
        ),
    })
}

/// Converts a leader stretch vector into a data-space offset from the frame's upper-right
/// corner.
///
/// `stretch` is the stretch length already split along the leader direction. Unlike pads, the
/// stretch is a plain proportion of the view and is not inverted.
pub fn stretch_offset(frame: Rect, metrics: &ViewMetrics, stretch: Vec2, unit: StretchUnit) -> Vec2 {
    let window = metrics.window;
    let from_inches = |s: Vec2| {
        Vec2::new(
            s.x / metrics.physical.width * window.width(),
            s.y / metrics.physical.height * window.height(),
        )
    };
    match unit {
        StretchUnit::Axes => Vec2::new(stretch.x * window.width(), stretch.y * window.height()),
        StretchUnit::Figure => Vec2::new(
            stretch.x / metrics.occupied.width * window.width(),
            stretch.y / metrics.occupied.height * window.height(),
        ),
        StretchUnit::Inches => from_inches(stretch),
        StretchUnit::InchesFrom => {
            let naive = from_inches(stretch);
            let reach = Point::new(frame.x0, frame.y0) + naive;
            Vec2::new((reach.x - frame.x1).max(0.0), (reach.y - frame.y1).max(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn metrics() -> ViewMetrics {
        ViewMetrics {
            window: Rect::new(0.0, 0.0, 10.0, 20.0),
            physical: Size::new(4.0, 2.0),
            occupied: Size::new(0.5, 0.25),
        }
    }

    #[test]
    fn axes_pad_occupies_requested_fraction_after_padding() {
        let span = 8.0;
        let pad = pad_from_axes_fraction(span, 0.2);
        assert_close(pad / (span + 2.0 * pad), 0.2);
    }

    #[test]
    fn axes_pad_is_clipped_below_one_half() {
        let pad = pad_from_axes_fraction(1.0, 0.75);
        assert!(pad.is_finite(), "clipped pad must stay finite");
        assert_close(pad, pad_from_axes_fraction(1.0, MAX_AXES_PAD_FRACTION));
    }

    #[test]
    fn figure_pad_is_scaled_by_occupied_fraction() {
        let pad = outer_pad_data(&metrics(), OuterPad::Relative(0.1), PadUnit::Figure).unwrap();
        assert_close(pad.x, pad_from_axes_fraction(10.0, 0.2));
        assert_close(pad.y, pad_from_axes_fraction(20.0, 0.4));
    }

    #[test]
    fn figure_pad_of_one_half_is_rejected() {
        let err = outer_pad_data(&metrics(), OuterPad::Relative(0.5), PadUnit::Figure).unwrap_err();
        assert_eq!(err, OutsetError::FigurePadTooLarge(0.5));
    }

    #[test]
    fn inch_pad_is_scaled_by_physical_size() {
        let pad = outer_pad_data(&metrics(), OuterPad::Relative(0.4), PadUnit::Inches).unwrap();
        assert_close(pad.x, pad_from_axes_fraction(10.0, 0.1));
        assert_close(pad.y, pad_from_axes_fraction(20.0, 0.2));
    }

    #[test]
    fn absolute_and_negative_pads() {
        let delta = Vec2::new(1.5, -2.0);
        assert_eq!(
            outer_pad_data(&metrics(), OuterPad::Absolute(delta), PadUnit::Inches),
            Ok(delta)
        );
        assert_eq!(
            outer_pad_data(&metrics(), OuterPad::Relative(-0.1), PadUnit::Axes),
            Err(OutsetError::InvalidPad(-0.1))
        );
    }

    #[test]
    fn inner_pad_falls_back_to_view_span_for_flat_extents() {
        let extent = Rect::new(2.0, 5.0, 2.0, 9.0);
        let window = Rect::new(0.0, 0.0, 10.0, 20.0);
        let pad = inner_pad_data(extent, window, InnerPad::Relative(0.1));
        assert_close(pad.x, 1.0);
        assert_close(pad.y, 0.4);
    }

    #[test]
    fn inches_from_measures_from_lower_left() {
        let m = metrics();
        // 1 inch wide view covers 2.5 data units in x, 10 in y.
        let frame = Rect::new(0.0, 0.0, 1.0, 1.0);
        let offset = stretch_offset(frame, &m, Vec2::new(1.0, 0.5), StretchUnit::InchesFrom);
        assert_close(offset.x, 1.5);
        assert_close(offset.y, 4.0);

        let large = Rect::new(0.0, 0.0, 9.0, 19.0);
        let offset = stretch_offset(large, &m, Vec2::new(1.0, 0.5), StretchUnit::InchesFrom);
        assert_eq!(offset, Vec2::ZERO, "large frames need no leader");
    }

    #[test]
    fn outer_pads_are_checked_against_their_unit() {
        assert_eq!(OuterPad::Relative(0.6).validate(PadUnit::Axes), Ok(()));
        assert_eq!(
            OuterPad::Relative(0.6).validate(PadUnit::Figure),
            Err(OutsetError::FigurePadTooLarge(0.6))
        );
        assert_eq!(
            OuterPad::Relative(f64::INFINITY).validate(PadUnit::Inches),
            Err(OutsetError::InvalidPad(f64::INFINITY))
        );
        assert_eq!(
            OuterPad::Absolute(Vec2::new(-1.0, 0.0)).validate(PadUnit::Figure),
            Ok(())
        );
    }

    #[test]
    fn units_parse_from_tags() {
        assert_eq!("figure".parse::<PadUnit>(), Ok(PadUnit::Figure));
        assert_eq!("inchesfrom".parse::<StretchUnit>(), Ok(StretchUnit::InchesFrom));
        assert!(
            "inchesfrom".parse::<PadUnit>().is_err(),
            "inchesfrom is a stretch-only unit"
        );
        let err = "cm".parse::<StretchUnit>().unwrap_err();
        assert_eq!(
            err,
            OutsetError::UnknownUnit("cm".into(), "axes, figure, inches, inchesfrom")
        );
    }
}
