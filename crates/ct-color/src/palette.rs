// SPDX-License-Identifier: MIT
//
// The legacy 16-color palette.
//
// A closed, fixed table: sixteen (RGB, code) records in code order, plus
// linear-scan lookups in both directions and a nearest-entry quantizer.
// Iteration order is part of the contract — when two entries are equally
// close to a color, the one listed first wins.

use std::fmt;

use crate::color::{Color, MARKER};
use crate::names::ColorNames;

// ─── CodedColor ──────────────────────────────────────────────────────────────

/// One palette entry: a fixed RGB value addressed by a single code character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodedColor {
    /// Lower-case snake-case name, e.g. `dark_purple`.
    pub name: &'static str,
    /// Packed `0xRRGGBB`.
    pub rgb: u32,
    /// The code character (`0`–`9`, `a`–`f`).
    pub code: char,
}

impl CodedColor {
    const fn new(name: &'static str, rgb: u32, code: char) -> Self {
        Self { name, rgb, code }
    }

    /// This entry as a [`Color`].
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        Color::new(self.rgb as i64)
    }

    /// Parse any color notation and return the entry with exactly that RGB.
    #[must_use]
    pub fn parse<N: ColorNames + ?Sized>(s: &str, names: &N) -> Option<Self> {
        Color::parse(s, names).and_then(|color| by_rgb(color.value()))
    }
}

/// Renders the canonical token, e.g. `§5`.
impl fmt::Display for CodedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MARKER}{}", self.code)
    }
}

// ─── Table ───────────────────────────────────────────────────────────────────

pub const BLACK: CodedColor = CodedColor::new("black", 0x00_0000, '0');
pub const DARK_BLUE: CodedColor = CodedColor::new("dark_blue", 0x00_00AA, '1');
pub const DARK_GREEN: CodedColor = CodedColor::new("dark_green", 0x00_AA00, '2');
pub const DARK_AQUA: CodedColor = CodedColor::new("dark_aqua", 0x00_AAAA, '3');
pub const DARK_RED: CodedColor = CodedColor::new("dark_red", 0xAA_0000, '4');
pub const DARK_PURPLE: CodedColor = CodedColor::new("dark_purple", 0xAA_00AA, '5');
pub const GOLD: CodedColor = CodedColor::new("gold", 0xFF_AA00, '6');
pub const GRAY: CodedColor = CodedColor::new("gray", 0xAA_AAAA, '7');
pub const DARK_GRAY: CodedColor = CodedColor::new("dark_gray", 0x55_5555, '8');
pub const BLUE: CodedColor = CodedColor::new("blue", 0x55_55FF, '9');
pub const GREEN: CodedColor = CodedColor::new("green", 0x55_FF55, 'a');
pub const AQUA: CodedColor = CodedColor::new("aqua", 0x55_FFFF, 'b');
pub const RED: CodedColor = CodedColor::new("red", 0xFF_5555, 'c');
pub const LIGHT_PURPLE: CodedColor = CodedColor::new("light_purple", 0xFF_55FF, 'd');
pub const YELLOW: CodedColor = CodedColor::new("yellow", 0xFF_FF55, 'e');
pub const WHITE: CodedColor = CodedColor::new("white", 0xFF_FFFF, 'f');

/// All sixteen entries in code order.
pub const PALETTE: [CodedColor; 16] = [
    BLACK,
    DARK_BLUE,
    DARK_GREEN,
    DARK_AQUA,
    DARK_RED,
    DARK_PURPLE,
    GOLD,
    GRAY,
    DARK_GRAY,
    BLUE,
    GREEN,
    AQUA,
    RED,
    LIGHT_PURPLE,
    YELLOW,
    WHITE,
];

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Look up an entry by code character, ignoring ASCII case.
#[must_use]
pub fn by_code(code: char) -> Option<CodedColor> {
    PALETTE
        .iter()
        .copied()
        .find(|entry| entry.code.eq_ignore_ascii_case(&code))
}

/// Look up an entry whose RGB equals `rgb` exactly.
#[must_use]
pub fn by_rgb(rgb: u32) -> Option<CodedColor> {
    PALETTE.iter().copied().find(|entry| entry.rgb == rgb)
}

/// The entry closest to `color` by squared RGB distance.
///
/// Ties go to the entry that appears first in [`PALETTE`].
#[must_use]
pub fn nearest(color: Color) -> CodedColor {
    let mut best = PALETTE[0];
    let mut best_dist = u32::MAX;

    for entry in PALETTE {
        let dist = color.distance(entry.color());
        if dist < best_dist {
            best_dist = dist;
            best = entry;
        }
    }

    best
}

// ─── Tests ───────────────────────────────────────────────────────────────────
