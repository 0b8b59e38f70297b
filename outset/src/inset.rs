// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving outset panels inside the source panel.
//!
//! Corner layouts fill a square grid diagonally outward from a corner of the source panel: the
//! corner cell first, then the two cells touching it, and so on. Rectangles are fractions of
//! the source panel (origin lower-left, y up) and come back in reading order.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;

use kurbo::{Rect, Size, Vec2};
use tracing::debug;

use crate::canvas::{Canvas, Figure, Strip};
use crate::error::OutsetError;
use crate::grid::OutsetGrid;

/// Slack allowed when checking that insets stay on the figure.
const BOUNDS_TOLERANCE: f64 = 0.01;

/// A corner of the source panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Upper right.
    #[default]
    NorthEast,
    /// Upper left.
    NorthWest,
    /// Lower right.
    SouthEast,
    /// Lower left.
    SouthWest,
}

impl Corner {
    fn is_west(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    fn is_south(self) -> bool {
        matches!(self, Self::SouthEast | Self::SouthWest)
    }
}

impl FromStr for Corner {
    type Err = OutsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NE" => Ok(Self::NorthEast),
            "NW" => Ok(Self::NorthWest),
            "SE" => Ok(Self::SouthEast),
            "SW" => Ok(Self::SouthWest),
            other => Err(OutsetError::UnknownCorner(other.to_string())),
        }
    }
}

/// Corner layout sizing, as fractions of the source panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerInsetSpec {
    /// Side of the square grid the insets are laid out on.
    pub grid_size: f64,
    /// Share of each cell left empty between insets.
    pub pad_ratio: f64,
    /// Offset of the grid from the corner, per axis.
    pub margin: Vec2,
}

impl Default for CornerInsetSpec {
    fn default() -> Self {
        Self {
            grid_size: 0.5,
            pad_ratio: 0.1,
            margin: Vec2::ZERO,
        }
    }
}

impl CornerInsetSpec {
    /// Sets the grid size.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Sets the pad ratio.
    pub fn with_pad_ratio(mut self, pad_ratio: f64) -> Self {
        self.pad_ratio = pad_ratio;
        self
    }

    /// Sets the margin.
    pub fn with_margin(mut self, margin: Vec2) -> Self {
        self.margin = margin;
        self
    }
}

/// Lays out `count` square insets in `corner`.
pub fn layout_corner_insets(count: usize, corner: Corner, spec: &CornerInsetSpec) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let mut dimension = 1;
    while dimension * dimension < count {
        dimension += 1;
    }
    let cell = spec.grid_size / dimension as f64;
    let side = cell * (1.0 - spec.pad_ratio);

    let mut cells: Vec<(usize, usize)> = (0..dimension)
        .flat_map(|row| (0..dimension).map(move |col| (row, col)))
        .collect();
    cells.sort_by_key(|&(row, col)| row + col);
    cells.truncate(count);

    let mut rects: Vec<Rect> = cells
        .into_iter()
        .map(|(row, col)| {
            let (row, col) = (row as f64, col as f64);
            let x = if corner.is_west() {
                cell * col + (cell - side) + spec.margin.x
            } else {
                1.0 - cell - col * cell - spec.margin.x
            };
            let y = if corner.is_south() {
                cell * row + (cell - side) + spec.margin.y
            } else {
                1.0 - cell - row * cell - spec.margin.y
            };
            Rect::from_origin_size((x, y), (side, side))
        })
        .collect();
    rects.sort_by(|a, b| b.y0.total_cmp(&a.y0).then(a.x0.total_cmp(&b.x0)));
    rects
}

/// Where to put the outset panels.
#[derive(Clone, Debug, PartialEq)]
pub enum InsetPlacement {
    /// A corner layout with one inset per outset.
    Corner(Corner, CornerInsetSpec),
    /// One rectangle per outset, as fractions of the source panel.
    Explicit(Vec<Rect>),
}

impl InsetPlacement {
    /// A corner layout with default sizing.
    pub fn corner(corner: Corner) -> Self {
        Self::Corner(corner, CornerInsetSpec::default())
    }
}

impl Default for InsetPlacement {
    fn default() -> Self {
        Self::corner(Corner::NorthEast)
    }
}

/// Options for [`inset_outsets`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsetOptions {
    /// Bring outsets to the source's aspect afterwards.
    pub equalize_aspect: bool,
    /// Decorations to remove from each inset.
    pub strip: Strip,
}

impl Default for InsetOptions {
    fn default() -> Self {
        Self {
            equalize_aspect: true,
            strip: Strip::default(),
        }
    }
}

/// Figure size and panel box that just fit panel `index` with its current margins.
fn fitted_to_panel<F: Figure>(figure: &F, index: usize) -> (Size, Rect) {
    let size = figure.size_inches();
    let position = figure.panels()[index].position();
    let inches = Rect::new(
        position.x0 * size.width,
        position.y0 * size.height,
        position.x1 * size.width,
        position.y1 * size.height,
    );
    let resized = Size::new(
        inches.width() + 2.0 * inches.x0,
        inches.height() + 2.0 * inches.y0,
    );
    let fitted = Rect::new(
        inches.x0 / resized.width,
        inches.y0 / resized.height,
        inches.x1 / resized.width,
        inches.y1 / resized.height,
    );
    (resized, fitted)
}

/// Resizes `figure` so that it just fits panel `index` with its current margins, keeping the
/// panel's physical size and offset from the lower-left corner.
///
/// Other panels keep their figure fractions.
pub fn resize_figure_to_panel<F: Figure>(figure: &mut F, index: usize) {
    let (resized, fitted) = fitted_to_panel(figure, index);
    debug!(size = ?figure.size_inches(), ?resized, "resizing figure around panel");
    figure.set_size_inches(resized);
    figure.panels_mut()[index].set_position(fitted);
}

/// Moves every outset panel of `grid` inside its source panel.
///
/// The figure shrinks to the source panel first. Nothing changes if any target rectangle would
/// fall outside the figure.
pub fn inset_outsets<F: Figure>(
    grid: &mut OutsetGrid<F>,
    placement: &InsetPlacement,
    options: &InsetOptions,
) -> Result<(), OutsetError> {
    let source = grid.source_index().ok_or(OutsetError::MissingSource)?;
    let outsets = grid.outset_indices().to_vec();
    let relative = match placement {
        InsetPlacement::Corner(corner, spec) => layout_corner_insets(outsets.len(), *corner, spec),
        InsetPlacement::Explicit(rects) => rects.clone(),
    };
    if relative.len() != outsets.len() {
        return Err(OutsetError::InsetCountMismatch {
            expected: outsets.len(),
            actual: relative.len(),
        });
    }

    let (_, host) = fitted_to_panel(grid.figure(), source);
    let (lo, hi) = (-BOUNDS_TOLERANCE, 1.0 + BOUNDS_TOLERANCE);
    let mut targets = Vec::with_capacity(relative.len());
    for rel in &relative {
        let target = Rect::new(
            host.x0 + rel.x0 * host.width(),
            host.y0 + rel.y0 * host.height(),
            host.x0 + rel.x1 * host.width(),
            host.y0 + rel.y1 * host.height(),
        );
        if [target.x0, target.y0, target.x1, target.y1]
            .iter()
            .any(|v| !(lo..=hi).contains(v))
        {
            return Err(OutsetError::InsetOutOfBounds {
                x0: target.x0,
                y0: target.y0,
                x1: target.x1,
                y1: target.y1,
            });
        }
        targets.push(target);
    }

    let figure = grid.figure_mut();
    resize_figure_to_panel(figure, source);
    let panels = figure.panels_mut();
    for (&index, target) in outsets.iter().zip(targets) {
        let panel = &mut panels[index];
        panel.set_position(target);
        if !options.strip.is_none() {
            panel.strip(options.strip);
        }
    }
    grid.mark_inset();
    if options.equalize_aspect {
        grid.equalize_aspect();
    }
    Ok(())
}
