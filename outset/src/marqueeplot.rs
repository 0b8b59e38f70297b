// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy-data entry point: group table rows into marquees and draw them.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use peniko::Color;

use crate::aspect::{compute_aspect, force_aspect};
use crate::canvas::Canvas;
use crate::config::{DEFAULT_PALETTE, MarqueeConfig, PreserveAspect};
use crate::error::OutsetError;
use crate::glyph::GlyphFactory;
use crate::marquee::{GroupKey, PointGroup, padded_frame, render_marquees};
use crate::scene::DEFAULT_WINDOW;
use crate::table::Table;
use crate::units::InnerPad;

/// Which table columns drive a marquee plot.
#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeKeys {
    /// Numeric x column.
    pub x: String,
    /// Numeric y column.
    pub y: String,
    /// Categorical column splitting marquees by colour.
    pub hue: Option<String>,
    /// Hue levels to draw, in order; other levels are dropped. Defaults to sorted levels.
    pub hue_order: Option<Vec<String>>,
    /// Categorical column splitting marquees by outset.
    pub outset: Option<String>,
    /// Outset levels to draw, in order; other levels are dropped. Defaults to sorted levels.
    pub outset_order: Option<Vec<String>>,
    /// Fixed colour for every marquee; conflicts with `hue`.
    pub color: Option<Color>,
    /// Colours cycled by hue index. Empty means [`DEFAULT_PALETTE`].
    pub palette: Vec<Color>,
}

impl MarqueeKeys {
    /// Keys for plain `x`/`y` columns with one marquee for everything.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            hue: None,
            hue_order: None,
            outset: None,
            outset_order: None,
            color: None,
            palette: Vec::new(),
        }
    }

    /// Splits marquees by `hue`.
    pub fn with_hue(mut self, hue: impl Into<String>) -> Self {
        self.hue = Some(hue.into());
        self
    }

    /// Fixes the hue levels and their order.
    pub fn with_hue_order(mut self, order: Vec<String>) -> Self {
        self.hue_order = Some(order);
        self
    }

    /// Splits marquees by `outset`.
    pub fn with_outset(mut self, outset: impl Into<String>) -> Self {
        self.outset = Some(outset.into());
        self
    }

    /// Fixes the outset levels and their order.
    pub fn with_outset_order(mut self, order: Vec<String>) -> Self {
        self.outset_order = Some(order);
        self
    }

    /// Draws every marquee in `color`.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Cycles hue colours through `palette`.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    fn validate(&self) -> Result<(), OutsetError> {
        if let (Some(hue), Some(_)) = (&self.hue, &self.color) {
            return Err(OutsetError::ConflictingColor(hue.clone()));
        }
        if self.hue.is_none() && self.hue_order.is_some() {
            return Err(OutsetError::OrderWithoutKey {
                order: "hue_order",
                key: "hue",
            });
        }
        if self.outset.is_none() && self.outset_order.is_some() {
            return Err(OutsetError::OrderWithoutKey {
                order: "outset_order",
                key: "outset",
            });
        }
        Ok(())
    }

    fn color_for(&self, hue: usize) -> Color {
        if let Some(color) = self.color {
            return color;
        }
        let palette: &[Color] = if self.palette.is_empty() {
            &DEFAULT_PALETTE
        } else {
            &self.palette
        };
        palette[hue % palette.len()]
    }
}

/// Level lookup for one categorical key: `None` when the key is unset.
struct Levels<'a> {
    labels: &'a [String],
    index: HashMap<String, usize>,
}

impl<'a> Levels<'a> {
    fn resolve(
        table: &'a Table,
        key: Option<&str>,
        order: Option<&[String]>,
    ) -> Result<Option<Self>, OutsetError> {
        let Some(key) = key else {
            return Ok(None);
        };
        let labels = table.categorical(key)?;
        let order = match order {
            Some(order) => order.to_vec(),
            None => table.unique_sorted(key)?,
        };
        let index = order
            .into_iter()
            .enumerate()
            .map(|(i, level)| (level, i))
            .collect();
        Ok(Some(Self { labels, index }))
    }

    fn of(levels: Option<&Self>, row: usize) -> Option<usize> {
        match levels {
            Some(levels) => levels.index.get(&levels.labels[row]).copied(),
            None => Some(0),
        }
    }
}

/// Partitions table rows into point groups keyed by (outset, hue) order.
///
/// Rows whose level is missing from a given order are dropped. Groups come back sorted by key.
pub fn group_points(table: &Table, keys: &MarqueeKeys) -> Result<Vec<PointGroup>, OutsetError> {
    keys.validate()?;
    let points = table.points(&keys.x, &keys.y)?;
    let hues = Levels::resolve(table, keys.hue.as_deref(), keys.hue_order.as_deref())?;
    let outsets = Levels::resolve(table, keys.outset.as_deref(), keys.outset_order.as_deref())?;

    let mut buckets: HashMap<GroupKey, Vec<Point>> = HashMap::new();
    for (row, point) in points.into_iter().enumerate() {
        let (Some(hue), Some(outset)) = (
            Levels::of(hues.as_ref(), row),
            Levels::of(outsets.as_ref(), row),
        ) else {
            continue;
        };
        buckets
            .entry(GroupKey { outset, hue })
            .or_default()
            .push(point);
    }

    let mut groups = buckets
        .into_iter()
        .map(|(key, points)| PointGroup::new(key, keys.color_for(key.hue), points))
        .collect::<Result<Vec<_>, _>>()?;
    groups.sort_by_key(|group| group.key);
    Ok(groups)
}

/// Groups `table` by `keys` and draws one marquee per group on `canvas`.
///
/// Returns the frames in draw order. The view's aspect is restored afterwards according to
/// [`MarqueeConfig::preserve_aspect`].
pub fn marqueeplot<C: Canvas + ?Sized>(
    canvas: &mut C,
    table: &Table,
    keys: &MarqueeKeys,
    config: &MarqueeConfig,
    glyphs: Option<&mut (dyn GlyphFactory + '_)>,
) -> Result<Vec<Rect>, OutsetError> {
    let initial = canvas.view_window();
    let restore = match config.preserve_aspect {
        PreserveAspect::Never => None,
        PreserveAspect::Always => Some(compute_aspect(initial)),
        PreserveAspect::UnlessPristine => {
            (!canvas.is_pristine()).then(|| compute_aspect(initial))
        }
    };
    let groups = group_points(table, keys)?;
    let frames = render_marquees(canvas, &groups, config, glyphs)?;
    if let Some(aspect) = restore
        && canvas.view_window() != initial
    {
        force_aspect(canvas, aspect);
    }
    Ok(frames)
}

/// Frames the marquees would get, without drawing anything.
///
/// Relative pads on flat groups are measured against the placeholder unit window.
pub fn calc_outset_frames(
    table: &Table,
    keys: &MarqueeKeys,
    inner_pad: InnerPad,
) -> Result<Vec<Rect>, OutsetError> {
    group_points(table, keys)?
        .iter()
        .map(|group| padded_frame(group.points(), DEFAULT_WINDOW, inner_pad))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ScenePanel;
    use alloc::vec;
    use kurbo::Size;
    use peniko::color::palette::css;

    fn table() -> Table {
        Table::new()
            .with_numeric("x", [1.0, 2.0, 3.0, 4.0])
            .and_then(|t| t.with_numeric("y", [1.0, 3.0, 2.0, 1.0]))
            .and_then(|t| t.with_categorical("outset", ["A", "B", "A", "B"]))
            .unwrap()
    }

    #[test]
    fn frames_follow_outset_levels() {
        let keys = MarqueeKeys::new("x", "y").with_outset("outset");
        let frames = calc_outset_frames(&table(), &keys, InnerPad::Relative(0.0)).unwrap();
        assert_eq!(
            frames,
            [Rect::new(1.0, 1.0, 3.0, 2.0), Rect::new(2.0, 1.0, 4.0, 3.0)]
        );
    }

    #[test]
    fn orders_drop_unlisted_levels() {
        let keys = MarqueeKeys::new("x", "y")
            .with_outset("outset")
            .with_outset_order(vec!["B".into()]);
        let groups = group_points(&table(), &keys).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].points(),
            [Point::new(2.0, 3.0), Point::new(4.0, 1.0)]
        );
    }

    #[test]
    fn hue_picks_palette_colours() {
        let keys = MarqueeKeys::new("x", "y")
            .with_hue("outset")
            .with_palette(vec![css::RED, css::BLUE]);
        let groups = group_points(&table(), &keys).unwrap();
        assert_eq!(groups[0].color, css::RED);
        assert_eq!(groups[1].color, css::BLUE);
    }

    #[test]
    fn invalid_key_combinations_are_rejected() {
        let table = table();
        let both = MarqueeKeys::new("x", "y")
            .with_hue("outset")
            .with_color(css::RED);
        assert_eq!(
            group_points(&table, &both),
            Err(OutsetError::ConflictingColor("outset".into()))
        );
        let orphan = MarqueeKeys::new("x", "y").with_hue_order(vec!["A".into()]);
        assert!(
            matches!(
                group_points(&table, &orphan),
                Err(OutsetError::OrderWithoutKey { key: "hue", .. })
            ),
            "hue order without hue"
        );
        let missing = MarqueeKeys::new("x", "w");
        assert_eq!(
            group_points(&table, &missing),
            Err(OutsetError::MissingColumn("w".into()))
        );
    }

    #[test]
    fn preserved_aspect_is_restored() {
        let mut canvas = ScenePanel::new(Rect::new(0.0, 0.0, 1.0, 1.0), Size::new(4.0, 4.0));
        canvas.set_view_window(Rect::new(0.0, 0.0, 2.0, 2.0));
        let keys = MarqueeKeys::new("x", "y").with_outset("outset");
        let config = MarqueeConfig::default().with_preserve_aspect(PreserveAspect::Always);
        marqueeplot(&mut canvas, &table(), &keys, &config, None).unwrap();
        let aspect = compute_aspect(canvas.view_window());
        assert!((aspect - 1.0).abs() < 1e-9, "aspect drifted to {aspect}");
    }
}
