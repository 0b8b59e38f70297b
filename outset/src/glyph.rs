// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphs placed at the tip of each marquee leader.
//!
//! A [`GlyphChoice`] is plain configuration. It resolves once into a [`GlyphFactory`] that hands
//! out one glyph per marquee; badge factories count up as they go and can be reset so that the
//! source and outset panels number their marquees identically.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A marker shape drawn by the canvas.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Plain filled dot, used for data points.
    Dot,
    /// Magnifying glass, the default when a grid has one outset.
    MagnifyingGlass,
    /// Asterisk.
    Asterisk,
    /// Arrow pointing back along the leader.
    Arrow,
    /// Round badge with a short label.
    Badge(String),
    /// Marker parked just outside a view edge for a value beyond it.
    EdgeStub {
        /// Edge the value lies beyond.
        edge: Edge,
        /// Whole view spans between the edge and the value.
        spans: u32,
    },
}

/// A side of the view window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Lower x limit.
    Left,
    /// Upper x limit.
    Right,
    /// Lower y limit.
    Bottom,
    /// Upper y limit.
    Top,
}

/// Hands out one glyph per marquee.
pub trait GlyphFactory: fmt::Debug {
    /// Glyph for the next marquee.
    fn next_glyph(&mut self) -> Glyph;

    /// Restarts numbering, if any.
    fn reset(&mut self) {}
}

/// Always returns the same glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedGlyph(pub Glyph);

impl GlyphFactory for FixedGlyph {
    fn next_glyph(&mut self) -> Glyph {
        self.0.clone()
    }
}

/// Label style for a [`BadgeSequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BadgeStyle {
    /// `1`, `2`, `3`, ...
    Numerical,
    /// `a`, `b`, ..., `z`, `aa`, `ab`, ...
    Alphabetical {
        /// Upper-case letters.
        upper: bool,
    },
    /// Roman numerals; `1..=12` use the single-character Unicode numerals.
    Roman {
        /// Upper-case numerals.
        upper: bool,
    },
}

/// An infinite, restartable sequence of badge labels.
///
/// The `k`-th label encodes `start + k * step`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeSequence {
    style: BadgeStyle,
    start: u32,
    step: u32,
    emitted: u32,
}

impl BadgeSequence {
    /// Numbers `start`, `start + step`, ...
    pub fn numerical(start: u32, step: u32) -> Self {
        Self::new(BadgeStyle::Numerical, start, step)
    }

    /// Letters beginning at `start`, which is expected to be an ASCII letter.
    ///
    /// Non-letters start the sequence at `a`.
    pub fn alphabetical(start: char, step: u32) -> Self {
        let upper = start.is_ascii_uppercase();
        let start = if start.is_ascii_alphabetic() {
            u32::from(start.to_ascii_lowercase()) - u32::from('a') + 1
        } else {
            1
        };
        Self::new(BadgeStyle::Alphabetical { upper }, start, step)
    }

    /// Roman numerals beginning at `start` (at least one).
    pub fn roman(start: u32, step: u32, upper: bool) -> Self {
        Self::new(BadgeStyle::Roman { upper }, start.max(1), step)
    }

    fn new(style: BadgeStyle, start: u32, step: u32) -> Self {
        Self {
            style,
            start,
            step,
            emitted: 0,
        }
    }

    /// Restarts the sequence from its first label.
    pub fn reset(&mut self) {
        self.emitted = 0;
    }

    fn label(&self, value: u32) -> String {
        match self.style {
            BadgeStyle::Numerical => value.to_string(),
            BadgeStyle::Alphabetical { upper } => alphabetical_label(value, upper),
            BadgeStyle::Roman { upper } => roman_label(value, upper),
        }
    }
}

impl Iterator for BadgeSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let value = self
            .start
            .saturating_add(self.emitted.saturating_mul(self.step));
        self.emitted = self.emitted.saturating_add(1);
        Some(self.label(value))
    }
}

impl GlyphFactory for BadgeSequence {
    fn next_glyph(&mut self) -> Glyph {
        Glyph::Badge(self.next().unwrap_or_default())
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

/// Bijective base-26: 1 is `a`, 26 is `z`, 27 is `aa`.
fn alphabetical_label(mut value: u32, upper: bool) -> String {
    let base = u32::from(if upper { 'A' } else { 'a' });
    let mut letters = Vec::new();
    while value > 0 {
        value -= 1;
        letters.extend(char::from_u32(base + value % 26));
        value /= 26;
    }
    letters.iter().rev().collect()
}

fn roman_label(value: u32, upper: bool) -> String {
    if (1..=12).contains(&value) {
        let first = if upper { 0x2160 } else { 0x2170 };
        if let Some(numeral) = char::from_u32(first + value - 1) {
            return numeral.to_string();
        }
    }
    const DIGITS: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut rest = value;
    let mut label = String::new();
    for (amount, digits) in DIGITS {
        while rest >= amount {
            label.push_str(digits);
            rest -= amount;
        }
    }
    if upper {
        label.make_ascii_uppercase();
    }
    label
}

/// Glyph configuration, resolved into a factory when marquees are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphChoice {
    /// Draw no glyphs.
    None,
    /// Magnifying glass on every marquee.
    MagnifyingGlass,
    /// Asterisk on every marquee.
    Asterisk,
    /// Arrow on every marquee.
    Arrow,
    /// Numbered badges.
    #[default]
    NumericalBadges,
    /// Lettered badges starting at `a`.
    AlphabeticalBadges,
    /// Roman numeral badges.
    RomanBadges {
        /// Upper-case numerals.
        upper: bool,
    },
}

impl GlyphChoice {
    /// Builds a fresh factory, or `None` if glyphs are disabled.
    pub fn factory(&self) -> Option<Box<dyn GlyphFactory>> {
        Some(match self {
            Self::None => return None,
            Self::MagnifyingGlass => Box::new(FixedGlyph(Glyph::MagnifyingGlass)),
            Self::Asterisk => Box::new(FixedGlyph(Glyph::Asterisk)),
            Self::Arrow => Box::new(FixedGlyph(Glyph::Arrow)),
            Self::NumericalBadges => Box::new(BadgeSequence::numerical(1, 1)),
            Self::AlphabeticalBadges => Box::new(BadgeSequence::alphabetical('a', 1)),
            Self::RomanBadges { upper } => Box::new(BadgeSequence::roman(1, 1, *upper)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(seq: &mut BadgeSequence, n: usize) -> Vec<String> {
        seq.by_ref().take(n).collect()
    }

    #[test]
    fn numerical_badges_honour_start_and_step() {
        let mut seq = BadgeSequence::numerical(3, 2);
        assert_eq!(take(&mut seq, 3), ["3", "5", "7"]);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut seq = BadgeSequence::numerical(1, 1);
        assert_eq!(take(&mut seq, 2), ["1", "2"]);
        seq.reset();
        assert_eq!(take(&mut seq, 2), ["1", "2"]);
    }

    #[test]
    fn letters_continue_past_z() {
        let mut seq = BadgeSequence::alphabetical('y', 1);
        assert_eq!(take(&mut seq, 4), ["y", "z", "aa", "ab"]);
        let mut upper = BadgeSequence::alphabetical('A', 2);
        assert_eq!(take(&mut upper, 3), ["A", "C", "E"]);
    }

    #[test]
    fn roman_numerals_use_unicode_up_to_twelve() {
        let mut seq = BadgeSequence::roman(11, 1, true);
        assert_eq!(take(&mut seq, 3), ["\u{216a}", "\u{216b}", "XIII"]);
        let mut lower = BadgeSequence::roman(1, 3, false);
        assert_eq!(take(&mut lower, 2), ["\u{2170}", "\u{2173}"]);
    }

    #[test]
    fn choices_resolve_to_factories() {
        assert!(GlyphChoice::None.factory().is_none(), "None draws no glyphs");
        let mut glass = GlyphChoice::MagnifyingGlass.factory().unwrap();
        assert_eq!(glass.next_glyph(), Glyph::MagnifyingGlass);
        assert_eq!(glass.next_glyph(), Glyph::MagnifyingGlass);
        let mut badges = GlyphChoice::NumericalBadges.factory().unwrap();
        assert_eq!(badges.next_glyph(), Glyph::Badge("1".into()));
        assert_eq!(badges.next_glyph(), Glyph::Badge("2".into()));
        badges.reset();
        assert_eq!(badges.next_glyph(), Glyph::Badge("1".into()));
    }
}
