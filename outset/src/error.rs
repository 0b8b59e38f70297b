// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by every fallible operation in the crate.

use alloc::string::String;

use thiserror::Error;

/// Errors raised by marquee layout, grid construction and inset placement.
///
/// Every variant is an argument-validation failure: it is raised at the call that received the
/// bad input and is never retried. Redundant annotation calls and degenerate geometry are not
/// errors (they produce a warning or a fallback value instead).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutsetError {
    /// Frame limits were not given as `(min, max)`.
    #[error("limits must be provided as (min, max), got ({min}, {max})")]
    NonAscendingBounds {
        /// The offending lower bound.
        min: f64,
        /// The offending upper bound.
        max: f64,
    },
    /// Leader stretch was negative (or NaN).
    #[error("leader stretch must be non-negative, got {0}")]
    NegativeStretch(f64),
    /// A pad value was negative or not finite.
    #[error("pad must be finite and non-negative, got {0}")]
    InvalidPad(f64),
    /// A figure-relative pad would consume at least half of the figure.
    #[error("figure-relative outer pad must be less than 0.5, got {0}")]
    FigurePadTooLarge(f64),
    /// An extent was requested for an empty point set.
    #[error("cannot compute the extent of an empty point set")]
    EmptyPoints,
    /// A unit tag did not name a known unit.
    #[error("unknown unit `{0}`, expected one of {1}")]
    UnknownUnit(String, &'static str),
    /// A corner tag did not name a known corner.
    #[error("unknown corner `{0}`, expected one of NE, NW, SE, SW")]
    UnknownCorner(String),
    /// A required key (such as `x` or `y`) was not supplied.
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),
    /// A referenced column does not exist in the table.
    #[error("column `{0}` not found in data")]
    MissingColumn(String),
    /// A referenced column exists but holds the wrong kind of values.
    #[error("column `{name}` is not {expected}")]
    ColumnType {
        /// Column name.
        name: String,
        /// What the caller needed ("numeric" or "categorical").
        expected: &'static str,
    },
    /// A column's length disagrees with the table's row count.
    #[error("column `{name}` has {len} rows, table has {rows}")]
    ColumnLength {
        /// Column name.
        name: String,
        /// Length of the rejected column.
        len: usize,
        /// Row count of the table.
        rows: usize,
    },
    /// An ordering was given for a key that is not set.
    #[error("`{order}` given without `{key}`")]
    OrderWithoutKey {
        /// The ordering argument.
        order: &'static str,
        /// The key it depends on.
        key: &'static str,
    },
    /// Both a hue key and a fixed colour were requested.
    #[error("cannot specify both hue `{0}` and a fixed color")]
    ConflictingColor(String),
    /// Inset placement was requested on a grid without a source panel.
    #[error("grid has no source panel to inset outset panels over")]
    MissingSource,
    /// The number of inset rectangles does not match the number of outset panels.
    #[error("expected {expected} inset rectangles, got {actual}")]
    InsetCountMismatch {
        /// Number of outset panels.
        expected: usize,
        /// Number of rectangles supplied.
        actual: usize,
    },
    /// An inset rectangle lands outside the figure.
    #[error("inset rectangle ({x0}, {y0}, {x1}, {y1}) falls outside the figure")]
    InsetOutOfBounds {
        /// Left edge in figure fraction.
        x0: f64,
        /// Bottom edge in figure fraction.
        y0: f64,
        /// Right edge in figure fraction.
        x1: f64,
        /// Top edge in figure fraction.
        y1: f64,
    },
}

