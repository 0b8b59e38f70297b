// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A source panel plus one outset panel per facet.
//!
//! [`OutsetGrid`] partitions a table by its column key, gives every facet its own outset panel
//! and keeps a leading source panel with the unfiltered data. Each role is annotated at most
//! once: the source gets a marquee per (facet, hue) group with leaders, every outset gets the
//! marquee for its own facet, and glyphs are numbered identically on both sides.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use tracing::{debug, warn};

use crate::aspect::{compute_aspect, equalize_aspect, force_aspect};
use crate::canvas::{Canvas, Figure};
use crate::config::{MarqueeConfig, MarqueeOverrides, PreserveAspect};
use crate::error::OutsetError;
use crate::facet_layout::{FacetLayout, FacetLayoutSpec};
use crate::glyph::GlyphChoice;
use crate::marqueeplot::{MarqueeKeys, marqueeplot};
use crate::table::Table;
use crate::units::{InnerPad, OuterPad, StretchUnit};
use crate::z_order;

/// Which side of the grid a panel belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelRole {
    /// The overview panel holding all data.
    Source,
    /// A zoomed panel holding one facet.
    Outset,
}

/// A value that differs between the source and outset panels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Split<T> {
    /// Value for the source panel.
    pub source: T,
    /// Value for outset panels.
    pub outset: T,
}

impl<T> Split<T> {
    /// Creates a split from per-role values.
    pub fn new(source: T, outset: T) -> Self {
        Self { source, outset }
    }

    /// Value for `role`.
    pub fn get(&self, role: PanelRole) -> &T {
        match role {
            PanelRole::Source => &self.source,
            PanelRole::Outset => &self.outset,
        }
    }
}

impl<T: Clone> Split<T> {
    /// The same value for both roles.
    pub fn uniform(value: T) -> Self {
        Self {
            source: value.clone(),
            outset: value,
        }
    }
}

/// How a categorical key is chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Facet {
    /// Infer from the data: tables facet by hue, frame lists by frame name.
    #[default]
    Auto,
    /// Use this column.
    Column(String),
    /// Do not split on this key.
    Disabled,
}

impl Facet {
    /// Uses the column `name`.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    fn name(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name.as_str()),
            Self::Auto | Self::Disabled => None,
        }
    }
}

/// Data a grid is built from.
#[derive(Clone, Debug, PartialEq)]
pub enum GridData {
    /// A tidy table with x, y and categorical columns.
    Table(Table),
    /// Frames to outset, named `"1"`, `"2"`, ... in order.
    Frames(Vec<Rect>),
    /// Frames to outset with explicit names, in order.
    NamedFrames(Vec<(String, Rect)>),
}

/// Aspect handling after annotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AspectPolicy {
    /// Bring every panel to a common aspect.
    #[default]
    Equalize,
    /// Restore each panel's aspect from before annotation.
    Preserve,
    /// Leave whatever aspect the marquees produced.
    Leave,
}

/// Outcome of an annotation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Annotation {
    /// Marquees were drawn.
    Drawn,
    /// The role had already been annotated; nothing was drawn.
    AlreadyDrawn,
}

/// Grid construction options.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Numeric x column; defaults to `"x"` for frame data.
    pub x: Option<String>,
    /// Numeric y column; defaults to `"y"` for frame data.
    pub y: Option<String>,
    /// Column splitting data into outset panels.
    pub col: Facet,
    /// Facet levels to show, in order.
    pub col_order: Option<Vec<String>>,
    /// Column splitting marquees by colour.
    pub hue: Facet,
    /// Hue levels to show, in order.
    pub hue_order: Option<Vec<String>>,
    /// Fixed marquee colour; conflicts with a hue column.
    pub color: Option<Color>,
    /// Hue palette; empty means the default palette.
    pub palette: Vec<Color>,
    /// Whether to add the leading source panel.
    pub include_source: bool,
    /// Panel sizing.
    pub layout: FacetLayoutSpec,
    /// Base z-order for every marquee.
    pub z_order: f64,
    /// Overrides for both roles.
    pub marquee: MarqueeOverrides,
    /// Overrides for the source panel, applied after `marquee`.
    pub marquee_source: MarqueeOverrides,
    /// Overrides for outset panels, applied after `marquee`.
    pub marquee_outset: MarqueeOverrides,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            col: Facet::Auto,
            col_order: None,
            hue: Facet::Auto,
            hue_order: None,
            color: None,
            palette: Vec::new(),
            include_source: true,
            layout: FacetLayoutSpec::default(),
            z_order: z_order::MARQUEE,
            marquee: MarqueeOverrides::default(),
            marquee_source: MarqueeOverrides::default(),
            marquee_outset: MarqueeOverrides::default(),
        }
    }
}

impl GridOptions {
    /// Options plotting `x` against `y`.
    pub fn xy(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            ..Self::default()
        }
    }

    /// Sets the facet column.
    pub fn with_col(mut self, col: Facet) -> Self {
        self.col = col;
        self
    }

    /// Sets the facet order.
    pub fn with_col_order(mut self, order: Vec<String>) -> Self {
        self.col_order = Some(order);
        self
    }

    /// Sets the hue column.
    pub fn with_hue(mut self, hue: Facet) -> Self {
        self.hue = hue;
        self
    }

    /// Sets the hue order.
    pub fn with_hue_order(mut self, order: Vec<String>) -> Self {
        self.hue_order = Some(order);
        self
    }

    /// Draws every marquee in `color`.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the hue palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets whether a source panel is created.
    pub fn with_include_source(mut self, include_source: bool) -> Self {
        self.include_source = include_source;
        self
    }

    /// Sets panel sizing.
    pub fn with_layout(mut self, layout: FacetLayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the base z-order.
    pub fn with_z_order(mut self, z_order: f64) -> Self {
        self.z_order = z_order;
        self
    }

    /// Sets overrides for both roles.
    pub fn with_marquee(mut self, overrides: MarqueeOverrides) -> Self {
        self.marquee = overrides;
        self
    }

    /// Sets overrides for the source panel.
    pub fn with_marquee_source(mut self, overrides: MarqueeOverrides) -> Self {
        self.marquee_source = overrides;
        self
    }

    /// Sets overrides for outset panels.
    pub fn with_marquee_outset(mut self, overrides: MarqueeOverrides) -> Self {
        self.marquee_outset = overrides;
        self
    }
}

/// Keys and orders resolved from [`GridData`] and [`GridOptions`].
struct Resolved {
    table: Table,
    x: String,
    y: String,
    col: Option<String>,
    col_order: Option<Vec<String>>,
    hue: Option<String>,
    hue_order: Option<Vec<String>>,
}

const FRAME_COLUMN: &str = "outset";

fn resolve_table(table: Table, options: &GridOptions) -> Result<Resolved, OutsetError> {
    let x = options.x.clone().ok_or(OutsetError::MissingKey("x"))?;
    let y = options.y.clone().ok_or(OutsetError::MissingKey("y"))?;
    let hue = options.hue.name().map(String::from);
    if hue.is_none() && options.hue_order.is_some() {
        return Err(OutsetError::OrderWithoutKey {
            order: "hue_order",
            key: "hue",
        });
    }
    if options.col.name().is_none() && options.col_order.is_some() {
        return Err(OutsetError::OrderWithoutKey {
            order: "col_order",
            key: "col",
        });
    }
    let (col, col_order) = match &options.col {
        Facet::Column(name) => (Some(name.clone()), options.col_order.clone()),
        Facet::Auto => (hue.clone(), options.hue_order.clone()),
        Facet::Disabled => (None, None),
    };
    Ok(Resolved {
        table,
        x,
        y,
        col,
        col_order,
        hue,
        hue_order: options.hue_order.clone(),
    })
}

fn resolve_frames(
    frames: Vec<(String, Rect)>,
    options: &GridOptions,
) -> Result<Resolved, OutsetError> {
    let x = options.x.clone().unwrap_or_else(|| "x".to_string());
    let y = options.y.clone().unwrap_or_else(|| "y".to_string());
    let mut names: Vec<String> = Vec::with_capacity(frames.len());
    for (name, _) in &frames {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    let table = Table::new()
        .with_numeric(&x, frames.iter().flat_map(|(_, f)| [f.x0, f.x1]))?
        .with_numeric(&y, frames.iter().flat_map(|(_, f)| [f.y0, f.y1]))?
        .with_categorical(
            FRAME_COLUMN,
            frames.iter().flat_map(|(name, _)| [name.clone(), name.clone()]),
        )?;

    let col = match &options.col {
        Facet::Auto => Some(FRAME_COLUMN.to_string()),
        Facet::Column(name) => Some(name.clone()),
        Facet::Disabled => None,
    };
    let hue = match &options.hue {
        Facet::Auto if options.color.is_none() => Some(FRAME_COLUMN.to_string()),
        Facet::Auto | Facet::Disabled => None,
        Facet::Column(name) => Some(name.clone()),
    };
    let level_order = |key: &Option<String>, order: &Option<Vec<String>>| match (key, order) {
        (_, Some(order)) => Some(order.clone()),
        (Some(key), None) if key == FRAME_COLUMN => Some(names.clone()),
        _ => None,
    };
    Ok(Resolved {
        col_order: level_order(&col, &options.col_order),
        hue_order: level_order(&hue, &options.hue_order),
        table,
        x,
        y,
        col,
        hue,
    })
}

/// A figure holding a source panel and one outset panel per facet.
#[derive(Debug)]
pub struct OutsetGrid<F: Figure> {
    figure: F,
    table: Table,
    keys: MarqueeKeys,
    facet_column: Option<String>,
    facets: Vec<String>,
    source: Option<usize>,
    outsets: Vec<usize>,
    source_config: MarqueeConfig,
    outset_config: MarqueeConfig,
    source_annotated: bool,
    outset_annotated: bool,
    inset: bool,
}

impl<F: Figure> OutsetGrid<F> {
    /// Builds the grid's panels on `figure`.
    ///
    /// The figure is resized to fit the facet layout. Category orders are resolved here, once,
    /// so colours and glyph numbering agree across panels.
    pub fn new(mut figure: F, data: GridData, options: GridOptions) -> Result<Self, OutsetError> {
        let is_frames = !matches!(data, GridData::Table(_));
        let resolved = match data {
            GridData::Table(table) => resolve_table(table, &options)?,
            GridData::Frames(frames) => resolve_frames(
                frames
                    .into_iter()
                    .enumerate()
                    .map(|(i, frame)| ((i + 1).to_string(), frame))
                    .collect(),
                &options,
            )?,
            GridData::NamedFrames(frames) => resolve_frames(frames, &options)?,
        };
        let Resolved {
            table,
            x,
            y,
            col,
            col_order,
            hue,
            hue_order,
        } = resolved;

        table.numeric(&x)?;
        table.numeric(&y)?;
        if let (Some(hue), Some(_)) = (&hue, &options.color) {
            return Err(OutsetError::ConflictingColor(hue.clone()));
        }
        let facets = match &col {
            Some(col) => match col_order {
                Some(order) => order,
                None => table.unique_sorted(col)?,
            },
            None => alloc::vec![String::new()],
        };
        let hue_order = match &hue {
            Some(hue) => Some(match hue_order {
                Some(order) => order,
                None => table.unique_sorted(hue)?,
            }),
            None => None,
        };

        let keys = MarqueeKeys {
            x,
            y,
            hue,
            hue_order,
            outset: col.clone(),
            outset_order: col.as_ref().map(|_| facets.clone()),
            color: options.color,
            palette: options.palette.clone(),
        };

        let count = facets.len() + usize::from(options.include_source);
        let layout = FacetLayout::arrange(&options.layout, count);
        figure.set_size_inches(layout.figure_size);
        let mut indices = layout
            .panels
            .into_iter()
            .map(|position| figure.add_panel(position));
        let source = if options.include_source {
            indices.next()
        } else {
            None
        };
        let outsets: Vec<usize> = indices.collect();

        let (source_config, outset_config) = role_configs(&options, is_frames, facets.len());
        debug!(
            facets = facets.len(),
            include_source = options.include_source,
            "built outset grid"
        );
        Ok(Self {
            figure,
            table,
            keys,
            facet_column: col,
            facets,
            source,
            outsets,
            source_config,
            outset_config,
            source_annotated: false,
            outset_annotated: false,
            inset: false,
        })
    }

    /// The underlying figure.
    pub fn figure(&self) -> &F {
        &self.figure
    }

    /// The underlying figure, mutably.
    pub fn figure_mut(&mut self) -> &mut F {
        &mut self.figure
    }

    /// Consumes the grid, returning the figure.
    pub fn into_figure(self) -> F {
        self.figure
    }

    /// The full data.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Resolved plotting keys.
    pub fn keys(&self) -> &MarqueeKeys {
        &self.keys
    }

    /// Facet names in panel order.
    ///
    /// A grid without a facet column has a single, unnamed facet.
    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    /// Figure panel index of the source panel.
    pub fn source_index(&self) -> Option<usize> {
        self.source
    }

    /// Figure panel indices of the outset panels, in facet order.
    pub fn outset_indices(&self) -> &[usize] {
        &self.outsets
    }

    /// The source panel.
    pub fn source_panel(&self) -> Option<&F::Panel> {
        self.source.map(|i| &self.figure.panels()[i])
    }

    /// The outset panels, in facet order.
    pub fn outset_panels(&self) -> impl Iterator<Item = &F::Panel> {
        let panels = self.figure.panels();
        self.outsets.iter().map(move |&i| &panels[i])
    }

    /// Marquee settings for a role.
    pub fn config(&self, role: PanelRole) -> &MarqueeConfig {
        match role {
            PanelRole::Source => &self.source_config,
            PanelRole::Outset => &self.outset_config,
        }
    }

    /// Whether a role has been annotated.
    pub fn is_annotated(&self, role: PanelRole) -> bool {
        match role {
            PanelRole::Source => self.source_annotated,
            PanelRole::Outset => self.outset_annotated,
        }
    }

    /// Whether the outsets have been moved inside the source panel.
    pub fn is_inset(&self) -> bool {
        self.inset
    }

    pub(crate) fn mark_inset(&mut self) {
        self.inset = true;
    }

    /// Data shown on the outset panel for `facet`.
    pub fn facet_table(&self, facet: &str) -> Result<Table, OutsetError> {
        match &self.facet_column {
            Some(column) => self.table.filter_eq(column, facet),
            None => Ok(self.table.clone()),
        }
    }

    fn annotation_config(&self, role: PanelRole, policy: AspectPolicy) -> MarqueeConfig {
        let config = *self.config(role);
        match policy {
            AspectPolicy::Preserve => config.with_preserve_aspect(PreserveAspect::Always),
            AspectPolicy::Equalize | AspectPolicy::Leave => config,
        }
    }

    /// Draws a marquee for every group on the source panel.
    ///
    /// Only the first call draws; later calls warn and return [`Annotation::AlreadyDrawn`].
    pub fn annotate_source(&mut self, policy: AspectPolicy) -> Result<Annotation, OutsetError> {
        if self.source_annotated {
            warn!("source panel already annotated; ignoring repeated call");
            return Ok(Annotation::AlreadyDrawn);
        }
        if let Some(index) = self.source {
            let config = self.annotation_config(PanelRole::Source, policy);
            let mut glyphs = config.glyph.factory();
            let panel = &mut self.figure.panels_mut()[index];
            marqueeplot(panel, &self.table, &self.keys, &config, glyphs.as_deref_mut())?;
        }
        self.source_annotated = true;
        if policy == AspectPolicy::Equalize {
            self.equalize_aspect();
        }
        Ok(Annotation::Drawn)
    }

    /// Draws each facet's marquee on its outset panel.
    ///
    /// Only the first call draws; later calls warn and return [`Annotation::AlreadyDrawn`].
    pub fn annotate_outset(&mut self, policy: AspectPolicy) -> Result<Annotation, OutsetError> {
        if self.outset_annotated {
            warn!("outset panels already annotated; ignoring repeated call");
            return Ok(Annotation::AlreadyDrawn);
        }
        let config = self.annotation_config(PanelRole::Outset, policy);
        let mut glyphs = config.glyph.factory();
        for (facet, &index) in self.facets.iter().zip(&self.outsets) {
            let subset = self.facet_table(facet)?;
            let panel = &mut self.figure.panels_mut()[index];
            marqueeplot(panel, &subset, &self.keys, &config, glyphs.as_deref_mut())?;
        }
        self.outset_annotated = true;
        if policy == AspectPolicy::Equalize {
            self.equalize_aspect();
        }
        Ok(Annotation::Drawn)
    }

    /// Annotates the source, then the outsets, then applies `policy` across the grid.
    pub fn annotate_all(
        &mut self,
        policy: AspectPolicy,
    ) -> Result<(Annotation, Annotation), OutsetError> {
        let per_role = match policy {
            AspectPolicy::Preserve => AspectPolicy::Preserve,
            AspectPolicy::Equalize | AspectPolicy::Leave => AspectPolicy::Leave,
        };
        let source = self.annotate_source(per_role)?;
        let outset = self.annotate_outset(per_role)?;
        if policy == AspectPolicy::Equalize {
            self.equalize_aspect();
        }
        Ok((source, outset))
    }

    /// Brings every panel to a common aspect and returns it.
    ///
    /// With a source panel, outsets take the source's aspect. Without one, all outsets take
    /// their consensus aspect.
    pub fn equalize_aspect(&mut self) -> f64 {
        let panels = self.figure.panels_mut();
        match self.source {
            Some(source) => {
                let target = compute_aspect(panels[source].view_window());
                for &index in &self.outsets {
                    force_aspect(&mut panels[index], target);
                }
                target
            }
            None => {
                let outsets = &self.outsets;
                equalize_aspect(
                    panels
                        .iter_mut()
                        .enumerate()
                        .filter(|(i, _)| outsets.contains(i))
                        .map(|(_, panel)| panel),
                )
            }
        }
    }

    /// Calls `f` on each outset panel with that facet's data.
    pub fn map_outset(
        &mut self,
        mut f: impl FnMut(&mut F::Panel, PanelRole, &Table),
    ) -> Result<(), OutsetError> {
        for (facet, &index) in self.facets.iter().zip(&self.outsets) {
            let subset = self.facet_table(facet)?;
            f(
                &mut self.figure.panels_mut()[index],
                PanelRole::Outset,
                &subset,
            );
        }
        Ok(())
    }

    /// Calls `f` on the source panel with the full data.
    pub fn map_source(&mut self, mut f: impl FnMut(&mut F::Panel, PanelRole, &Table)) {
        if let Some(index) = self.source {
            f(
                &mut self.figure.panels_mut()[index],
                PanelRole::Source,
                &self.table,
            );
        }
    }

    /// [`Self::map_outset`] then [`Self::map_source`].
    pub fn map(
        &mut self,
        mut f: impl FnMut(&mut F::Panel, PanelRole, &Table),
    ) -> Result<(), OutsetError> {
        self.map_outset(&mut f)?;
        self.map_source(f);
        Ok(())
    }

    /// Calls `f` on each outset panel, restoring each panel's view afterwards.
    pub fn broadcast_outset(&mut self, mut f: impl FnMut(&mut F::Panel, PanelRole)) {
        let panels = self.figure.panels_mut();
        for &index in &self.outsets {
            let panel = &mut panels[index];
            let window = panel.view_window();
            f(panel, PanelRole::Outset);
            panel.set_view_window(window);
        }
    }

    /// Calls `f` on the source panel; its view may grow.
    pub fn broadcast_source(&mut self, mut f: impl FnMut(&mut F::Panel, PanelRole)) {
        if let Some(index) = self.source {
            f(&mut self.figure.panels_mut()[index], PanelRole::Source);
        }
    }

    /// [`Self::broadcast_outset`] then [`Self::broadcast_source`].
    pub fn broadcast(&mut self, mut f: impl FnMut(&mut F::Panel, PanelRole)) {
        self.broadcast_outset(&mut f);
        self.broadcast_source(f);
    }
}

fn role_configs(
    options: &GridOptions,
    is_frames: bool,
    facet_count: usize,
) -> (MarqueeConfig, MarqueeConfig) {
    let base = MarqueeConfig {
        inner_pad: if is_frames {
            InnerPad::Relative(0.0)
        } else {
            InnerPad::default()
        },
        glyph: if facet_count == 1 {
            GlyphChoice::MagnifyingGlass
        } else {
            GlyphChoice::NumericalBadges
        },
        z_order: options.z_order,
        ..MarqueeConfig::default()
    };
    let source = MarqueeConfig {
        outer_pad: if is_frames {
            OuterPad::Relative(0.0)
        } else {
            OuterPad::default()
        },
        ..base
    }
    .merge(&options.marquee)
    .merge(&options.marquee_source);
    let outset = MarqueeConfig {
        leader_stretch: 0.2,
        leader_stretch_unit: StretchUnit::InchesFrom,
        tight: true,
        ..base
    }
    .merge(&options.marquee)
    .merge(&options.marquee_outset);
    if source.inner_pad != outset.inner_pad {
        warn!(
            source = ?source.inner_pad,
            outset = ?outset.inner_pad,
            "source and outset inner pads differ; frames will not match across panels"
        );
    }
    (source, outset)
}
