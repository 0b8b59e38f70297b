// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee callouts that tie zoomed-in "outset" plots back to a "source" plot.
//!
//! A marquee is a frame around a subset of data, a leader reaching out from the frame's
//! upper-right corner, and a glyph (badge, magnifying glass, ...) at the leader's tip. This crate
//! owns the geometry and the bookkeeping; drawing is delegated to a [`Canvas`]:
//! - **Geometry**: line intersection, minimal-perimeter vertex ordering, extents and leader
//!   construction.
//! - **Units**: padding and leader stretch in axes-fraction, figure-fraction or inches, resolved
//!   into data-space deltas so the requested proportion holds *after* padding.
//! - **Aspect**: forcing and equalizing view aspect ratios without ever shrinking a view.
//! - **Marquees**: padded frames, the pre-pad pass and ordered draw calls per point group.
//! - **Grid**: a source panel plus one outset panel per facet, with one-shot annotation,
//!   map/broadcast helpers and corner inset placement.
//! - **Stubs**: fitting a view to the inliers of its data and parking the outliers at the edge.
//!
//! [`SceneFigure`] is an in-memory figure that records draw commands; it is what the tests and
//! the demo render against.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod aspect;
mod canvas;
mod config;
mod error;
mod facet_layout;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod glyph;
mod grid;
mod inset;
mod marquee;
mod marqueeplot;
mod scene;
mod stub;
mod table;
mod tweak;
mod units;
mod z_order;

pub use aspect::{compute_aspect, consensus_aspect, equalize_aspect, force_aspect, forced_window};
pub use canvas::{Canvas, Figure, MarkerStyle, ShapeStyle, Strip};
pub use config::{
    DEFAULT_PALETTE, FrameStyle, FrameStyleOverrides, GlyphStyle, GlyphStyleOverrides,
    LeaderStyle, LeaderStyleOverrides, MarqueeConfig, MarqueeOverrides, PreserveAspect,
};
pub use error::OutsetError;
pub use facet_layout::{FacetLayout, FacetLayoutSpec};
pub use geometry::{
    Leader, compose_leader, extent, line_intersection, minimal_perimeter_order, validate_frame,
};
pub use glyph::{
    BadgeSequence, BadgeStyle, Edge, FixedGlyph, Glyph, GlyphChoice, GlyphFactory,
};
pub use grid::{
    Annotation, AspectPolicy, Facet, GridData, GridOptions, OutsetGrid, PanelRole, Split,
};
pub use inset::{
    Corner, CornerInsetSpec, InsetOptions, InsetPlacement, inset_outsets, layout_corner_insets,
    resize_figure_to_panel,
};
pub use marquee::{GroupKey, PointGroup, draw_marquee, padded_frame, prepad_view, render_marquees};
pub use marqueeplot::{MarqueeKeys, calc_outset_frames, group_points, marqueeplot};
pub use scene::{DEFAULT_WINDOW, DrawCommand, SceneFigure, ScenePanel};
pub use stub::{
    IqrBounds, OutlierBounds, edge_stub_style, rescale_clip_outliers, stub_all_clipped_values,
    stub_edge_mark,
};
pub use table::{ColumnValues, Table};
pub use tweak::LeaderTweak;
pub use units::{
    InnerPad, MAX_AXES_PAD_FRACTION, OuterPad, PadUnit, StretchUnit, ViewMetrics, inner_pad_data,
    outer_pad_data, pad_from_axes_fraction, pad_from_figure_fraction, pad_from_length,
    stretch_offset,
};
pub use z_order::*;
