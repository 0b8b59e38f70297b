// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny arrange step for facet grids.
//!
//! Panels are laid out left to right, wrapping into rows, on equally sized cells. The figure is
//! sized to fit the cells exactly, so a panel's physical size follows from the layout settings
//! alone.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tracing::debug;

/// Facet grid sizing, in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacetLayoutSpec {
    /// Cell height.
    pub height: f64,
    /// Cell width as a multiple of `height`.
    pub aspect: f64,
    /// Maximum panels per row; `None` keeps every panel on one row.
    pub col_wrap: Option<usize>,
    /// Gap between a panel and its cell edge.
    ///
    /// Clamped so every panel keeps some area.
    pub margin: f64,
}

impl Default for FacetLayoutSpec {
    fn default() -> Self {
        Self {
            height: 3.0,
            aspect: 1.0,
            col_wrap: None,
            margin: 0.4,
        }
    }
}

impl FacetLayoutSpec {
    /// Sets the cell height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Sets the cell aspect (width over height).
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Wraps rows after `col_wrap` panels.
    pub fn with_col_wrap(mut self, col_wrap: usize) -> Self {
        self.col_wrap = Some(col_wrap);
        self
    }

    /// Sets the panel margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Result of arranging a facet grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FacetLayout {
    /// Figure size in inches.
    pub figure_size: Size,
    /// Panel boxes in figure fractions (y up), in facet order.
    pub panels: Vec<Rect>,
}

impl FacetLayout {
    /// Arranges `count` panels.
    pub fn arrange(spec: &FacetLayoutSpec, count: usize) -> Self {
        let ncol = spec.col_wrap.unwrap_or(count).min(count).max(1);
        let nrow = count.div_ceil(ncol).max(1);
        let cell = Size::new(spec.height * spec.aspect, spec.height);
        let figure_size = Size::new(cell.width * ncol as f64, cell.height * nrow as f64);
        let margin = spec
            .margin
            .clamp(0.0, 0.45 * cell.width.min(cell.height));
        debug!(count, ncol, nrow, ?figure_size, "arranging facets");

        let panels = (0..count)
            .map(|i| {
                let col = (i % ncol) as f64;
                let row = (i / ncol) as f64;
                let x0 = col * cell.width + margin;
                let y0 = figure_size.height - (row + 1.0) * cell.height + margin;
                let x1 = (col + 1.0) * cell.width - margin;
                let y1 = figure_size.height - row * cell.height - margin;
                Rect::new(
                    x0 / figure_size.width,
                    y0 / figure_size.height,
                    x1 / figure_size.width,
                    y1 / figure_size.height,
                )
            })
            .collect();
        Self {
            figure_size,
            panels,
        }
    }
}
