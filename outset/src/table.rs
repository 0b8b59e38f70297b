// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned tidy table used as marquee input.

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;

use crate::error::OutsetError;

/// Values of one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    /// Numeric values (`NaN` for missing).
    Numeric(Vec<f64>),
    /// Category labels.
    Categorical(Vec<String>),
}

impl ColumnValues {
    fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    fn select(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(values) => Self::Numeric(rows.iter().map(|&r| values[r]).collect()),
            Self::Categorical(values) => {
                Self::Categorical(rows.iter().map(|&r| values[r].clone()).collect())
            }
        }
    }
}

/// A small columnar table: stable row keys plus named numeric and categorical columns.
///
/// Row keys are assigned `0..n` when the first column is added and survive filtering, so a row
/// can be traced back to its position in the unfiltered data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    row_keys: Vec<u64>,
    names: Vec<String>,
    columns: Vec<ColumnValues>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric column.
    pub fn with_numeric(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<Self, OutsetError> {
        self.with_column(
            name.into(),
            ColumnValues::Numeric(values.into_iter().collect()),
        )
    }

    /// Adds a categorical column.
    pub fn with_categorical<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self, OutsetError> {
        self.with_column(
            name.into(),
            ColumnValues::Categorical(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Adds a column, replacing any existing column of the same name.
    pub fn with_column(mut self, name: String, values: ColumnValues) -> Result<Self, OutsetError> {
        if self.columns.is_empty() && self.row_keys.is_empty() {
            self.row_keys = (0..values.len() as u64).collect();
        }
        if values.len() != self.row_count() {
            return Err(OutsetError::ColumnLength {
                name,
                len: values.len(),
                rows: self.row_count(),
            });
        }
        match self.names.iter().position(|n| *n == name) {
            Some(index) => self.columns[index] = values,
            None => {
                self.names.push(name);
                self.columns.push(values);
            }
        }
        Ok(self)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// Stable keys for each row.
    pub fn row_keys(&self) -> &[u64] {
        &self.row_keys
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns `true` if a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_ok()
    }

    fn column(&self, name: &str) -> Result<&ColumnValues, OutsetError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| &self.columns[index])
            .ok_or_else(|| OutsetError::MissingColumn(name.to_string()))
    }

    /// Values of a numeric column.
    pub fn numeric(&self, name: &str) -> Result<&[f64], OutsetError> {
        match self.column(name)? {
            ColumnValues::Numeric(values) => Ok(values),
            ColumnValues::Categorical(_) => Err(OutsetError::ColumnType {
                name: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    /// Labels of a categorical column.
    pub fn categorical(&self, name: &str) -> Result<&[String], OutsetError> {
        match self.column(name)? {
            ColumnValues::Categorical(values) => Ok(values),
            ColumnValues::Numeric(_) => Err(OutsetError::ColumnType {
                name: name.to_string(),
                expected: "categorical",
            }),
        }
    }

    /// Distinct labels of a categorical column, sorted.
    pub fn unique_sorted(&self, name: &str) -> Result<Vec<String>, OutsetError> {
        let labels: BTreeSet<&String> = self.categorical(name)?.iter().collect();
        Ok(labels.into_iter().cloned().collect())
    }

    /// `(x, y)` points from two numeric columns.
    pub fn points(&self, x: &str, y: &str) -> Result<Vec<Point>, OutsetError> {
        let xs = self.numeric(x)?;
        let ys = self.numeric(y)?;
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Point::new(x, y))
            .collect())
    }

    /// Rows for which `keep` returns `true`, given each row's position in this table.
    pub fn filter_rows(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        let rows: Vec<usize> = (0..self.row_count()).filter(|&row| keep(row)).collect();
        Self {
            row_keys: rows.iter().map(|&r| self.row_keys[r]).collect(),
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(&rows)).collect(),
        }
    }

    /// Rows whose `column` label equals `level`.
    pub fn filter_eq(&self, column: &str, level: &str) -> Result<Self, OutsetError> {
        let labels = self.categorical(column)?;
        Ok(self.filter_rows(|row| labels[row] == level))
    }
}
