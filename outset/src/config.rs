// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee configuration.
//!
//! [`MarqueeConfig`] holds resolved values. [`MarqueeOverrides`] holds optional replacements and
//! is layered on top with [`MarqueeConfig::merge`]; grids apply library defaults, then grid-wide
//! overrides, then per-role overrides.

use peniko::Color;
use peniko::color::palette::css;

use crate::canvas::{MarkerStyle, ShapeStyle};
use crate::glyph::GlyphChoice;
use crate::tweak::LeaderTweak;
use crate::units::{InnerPad, OuterPad, PadUnit, StretchUnit};
use crate::z_order;

/// Hue palette cycled through when no fixed colour is given.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Whether to restore a view's aspect ratio after marquees resize it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreserveAspect {
    /// Let the view take whatever aspect the marquees need.
    #[default]
    Never,
    /// Restore the aspect the view had before.
    Always,
    /// Restore the previous aspect unless the view was pristine.
    UnlessPristine,
}

/// Frame appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    /// Outline width in points.
    pub edge_width: f64,
    /// Fill opacity applied to the marquee colour.
    pub face_alpha: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            edge_width: 1.0,
            face_alpha: 0.15,
        }
    }
}

/// Leader appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeaderStyle {
    /// Outline width in points.
    pub edge_width: f64,
    /// Fill opacity applied to the marquee colour.
    pub face_alpha: f32,
    /// Dashed outline.
    pub dashed: bool,
}

impl Default for LeaderStyle {
    fn default() -> Self {
        Self {
            edge_width: 1.0,
            face_alpha: 0.3,
            dashed: true,
        }
    }
}

/// Glyph appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    /// Marker size in points.
    pub size: f64,
    /// Z-order offset from the marquee body.
    pub z_lift: f64,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            size: 22.0,
            z_lift: z_order::GLYPH_LIFT,
        }
    }
}

/// Optional replacements for [`FrameStyle`] fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStyleOverrides {
    /// Replaces [`FrameStyle::edge_width`].
    pub edge_width: Option<f64>,
    /// Replaces [`FrameStyle::face_alpha`].
    pub face_alpha: Option<f32>,
}

/// Optional replacements for [`LeaderStyle`] fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeaderStyleOverrides {
    /// Replaces [`LeaderStyle::edge_width`].
    pub edge_width: Option<f64>,
    /// Replaces [`LeaderStyle::face_alpha`].
    pub face_alpha: Option<f32>,
    /// Replaces [`LeaderStyle::dashed`].
    pub dashed: Option<bool>,
}

/// Optional replacements for [`GlyphStyle`] fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphStyleOverrides {
    /// Replaces [`GlyphStyle::size`].
    pub size: Option<f64>,
    /// Replaces [`GlyphStyle::z_lift`].
    pub z_lift: Option<f64>,
}

impl FrameStyle {
    fn merge(&self, o: &FrameStyleOverrides) -> Self {
        Self {
            edge_width: o.edge_width.unwrap_or(self.edge_width),
            face_alpha: o.face_alpha.unwrap_or(self.face_alpha),
        }
    }
}

impl LeaderStyle {
    fn merge(&self, o: &LeaderStyleOverrides) -> Self {
        Self {
            edge_width: o.edge_width.unwrap_or(self.edge_width),
            face_alpha: o.face_alpha.unwrap_or(self.face_alpha),
            dashed: o.dashed.unwrap_or(self.dashed),
        }
    }
}

impl GlyphStyle {
    fn merge(&self, o: &GlyphStyleOverrides) -> Self {
        Self {
            size: o.size.unwrap_or(self.size),
            z_lift: o.z_lift.unwrap_or(self.z_lift),
        }
    }
}

/// Resolved settings for drawing marquees on one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarqueeConfig {
    /// Pad between a group's points and its frame.
    pub inner_pad: InnerPad,
    /// Pad between the union of frames and the view edge.
    pub outer_pad: OuterPad,
    /// Unit of [`Self::outer_pad`] when relative.
    pub outer_pad_unit: PadUnit,
    /// Leader length; zero draws no leader.
    pub leader_stretch: f64,
    /// Unit of [`Self::leader_stretch`].
    pub leader_stretch_unit: StretchUnit,
    /// Adjustment applied to each leader before drawing.
    pub leader_tweak: LeaderTweak,
    /// How far the glyph sits back from the leader tip towards the frame, from 0 to 1.
    pub mark_retract: f64,
    /// Glyph drawn at each leader tip.
    pub glyph: GlyphChoice,
    /// Fit the view to the marquees instead of only growing it.
    pub tight: bool,
    /// Aspect handling after the view has been adjusted.
    pub preserve_aspect: PreserveAspect,
    /// Base z-order of frames and leaders.
    pub z_order: f64,
    /// Frame appearance.
    pub frame: FrameStyle,
    /// Leader appearance.
    pub leader: LeaderStyle,
    /// Glyph appearance.
    pub glyph_style: GlyphStyle,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            inner_pad: InnerPad::default(),
            outer_pad: OuterPad::default(),
            outer_pad_unit: PadUnit::Axes,
            leader_stretch: 0.1,
            leader_stretch_unit: StretchUnit::Inches,
            leader_tweak: LeaderTweak::Identity,
            mark_retract: 0.1,
            glyph: GlyphChoice::default(),
            tight: false,
            preserve_aspect: PreserveAspect::Never,
            z_order: z_order::MARQUEE,
            frame: FrameStyle::default(),
            leader: LeaderStyle::default(),
            glyph_style: GlyphStyle::default(),
        }
    }
}

impl MarqueeConfig {
    /// Returns a copy with every field set in `overrides` replaced.
    pub fn merge(&self, overrides: &MarqueeOverrides) -> Self {
        let o = overrides;
        Self {
            inner_pad: o.inner_pad.unwrap_or(self.inner_pad),
            outer_pad: o.outer_pad.unwrap_or(self.outer_pad),
            outer_pad_unit: o.outer_pad_unit.unwrap_or(self.outer_pad_unit),
            leader_stretch: o.leader_stretch.unwrap_or(self.leader_stretch),
            leader_stretch_unit: o.leader_stretch_unit.unwrap_or(self.leader_stretch_unit),
            leader_tweak: o.leader_tweak.unwrap_or(self.leader_tweak),
            mark_retract: o.mark_retract.unwrap_or(self.mark_retract),
            glyph: o.glyph.unwrap_or(self.glyph),
            tight: o.tight.unwrap_or(self.tight),
            preserve_aspect: o.preserve_aspect.unwrap_or(self.preserve_aspect),
            z_order: o.z_order.unwrap_or(self.z_order),
            frame: self.frame.merge(&o.frame),
            leader: self.leader.merge(&o.leader),
            glyph_style: self.glyph_style.merge(&o.glyph_style),
        }
    }

    /// Sets the inner pad.
    pub fn with_inner_pad(mut self, pad: InnerPad) -> Self {
        self.inner_pad = pad;
        self
    }

    /// Sets the outer pad and its unit.
    pub fn with_outer_pad(mut self, pad: OuterPad, unit: PadUnit) -> Self {
        self.outer_pad = pad;
        self.outer_pad_unit = unit;
        self
    }

    /// Sets the leader stretch and its unit.
    pub fn with_leader_stretch(mut self, stretch: f64, unit: StretchUnit) -> Self {
        self.leader_stretch = stretch;
        self.leader_stretch_unit = unit;
        self
    }

    /// Sets the leader tweak.
    pub fn with_leader_tweak(mut self, tweak: LeaderTweak) -> Self {
        self.leader_tweak = tweak;
        self
    }

    /// Sets the glyph.
    pub fn with_glyph(mut self, glyph: GlyphChoice) -> Self {
        self.glyph = glyph;
        self
    }

    /// Sets whether the view is fitted tightly.
    pub fn with_tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    /// Sets aspect handling.
    pub fn with_preserve_aspect(mut self, preserve: PreserveAspect) -> Self {
        self.preserve_aspect = preserve;
        self
    }

    /// Sets the base z-order.
    pub fn with_z_order(mut self, z_order: f64) -> Self {
        self.z_order = z_order;
        self
    }

    /// Frame paint for a marquee of `color` at depth `z_order`.
    pub fn frame_style(&self, color: Color, z_order: f64) -> ShapeStyle {
        ShapeStyle {
            fill: Some(color.with_alpha(self.frame.face_alpha)),
            stroke: Some(color),
            stroke_width: self.frame.edge_width,
            dashed: false,
            z_order,
        }
    }

    /// Leader paint for a marquee of `color` at depth `z_order`.
    pub fn leader_style(&self, color: Color, z_order: f64) -> ShapeStyle {
        ShapeStyle {
            fill: Some(color.with_alpha(self.leader.face_alpha)),
            stroke: Some(color),
            stroke_width: self.leader.edge_width,
            dashed: self.leader.dashed,
            z_order,
        }
    }

    /// Glyph paint for a marquee of `color` at depth `z_order`.
    pub fn marker_style(&self, color: Color, z_order: f64) -> MarkerStyle {
        let accent = if color == css::WHITE {
            css::BLACK
        } else {
            css::WHITE
        };
        MarkerStyle {
            color,
            accent,
            size: self.glyph_style.size,
            z_order: z_order + self.glyph_style.z_lift,
        }
    }
}

/// Optional replacements for [`MarqueeConfig`] fields.
///
/// Unset fields leave the underlying value alone. Nested styles are merged field by field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarqueeOverrides {
    /// Replaces [`MarqueeConfig::inner_pad`].
    pub inner_pad: Option<InnerPad>,
    /// Replaces [`MarqueeConfig::outer_pad`].
    pub outer_pad: Option<OuterPad>,
    /// Replaces [`MarqueeConfig::outer_pad_unit`].
    pub outer_pad_unit: Option<PadUnit>,
    /// Replaces [`MarqueeConfig::leader_stretch`].
    pub leader_stretch: Option<f64>,
    /// Replaces [`MarqueeConfig::leader_stretch_unit`].
    pub leader_stretch_unit: Option<StretchUnit>,
    /// Replaces [`MarqueeConfig::leader_tweak`].
    pub leader_tweak: Option<LeaderTweak>,
    /// Replaces [`MarqueeConfig::mark_retract`].
    pub mark_retract: Option<f64>,
    /// Replaces [`MarqueeConfig::glyph`].
    pub glyph: Option<GlyphChoice>,
    /// Replaces [`MarqueeConfig::tight`].
    pub tight: Option<bool>,
    /// Replaces [`MarqueeConfig::preserve_aspect`].
    pub preserve_aspect: Option<PreserveAspect>,
    /// Replaces [`MarqueeConfig::z_order`].
    pub z_order: Option<f64>,
    /// Merged into [`MarqueeConfig::frame`].
    pub frame: FrameStyleOverrides,
    /// Merged into [`MarqueeConfig::leader`].
    pub leader: LeaderStyleOverrides,
    /// Merged into [`MarqueeConfig::glyph_style`].
    pub glyph_style: GlyphStyleOverrides,
}

impl MarqueeOverrides {
    /// Overrides the inner pad.
    pub fn with_inner_pad(mut self, pad: InnerPad) -> Self {
        self.inner_pad = Some(pad);
        self
    }

    /// Overrides the outer pad and its unit.
    pub fn with_outer_pad(mut self, pad: OuterPad, unit: PadUnit) -> Self {
        self.outer_pad = Some(pad);
        self.outer_pad_unit = Some(unit);
        self
    }

    /// Overrides the leader stretch and its unit.
    pub fn with_leader_stretch(mut self, stretch: f64, unit: StretchUnit) -> Self {
        self.leader_stretch = Some(stretch);
        self.leader_stretch_unit = Some(unit);
        self
    }

    /// Overrides the glyph.
    pub fn with_glyph(mut self, glyph: GlyphChoice) -> Self {
        self.glyph = Some(glyph);
        self
    }

    /// Overrides the glyph size.
    pub fn with_glyph_size(mut self, size: f64) -> Self {
        self.glyph_style.size = Some(size);
        self
    }

    /// Overrides the base z-order.
    pub fn with_z_order(mut self, z_order: f64) -> Self {
        self.z_order = Some(z_order);
        self
    }
}
