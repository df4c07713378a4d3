// SPDX-License-Identifier: MIT
//
// Format flags — the five style attributes a color code can carry.
//
// The flag index order (k, l, m, n, o) is the canonical emission order:
// whenever several flags are written out together they appear in this
// order, regardless of the order they were written in the input.

use crate::color::MARKER;

/// The code character of the reset token. Reset clears color and every
/// format flag; it is a token, not a flag.
pub const RESET: char = 'r';

bitflags::bitflags! {
    /// A set of active format flags.
    ///
    /// ```
    /// use ct_color::Format;
    ///
    /// let style = Format::BOLD | Format::UNDERLINE;
    /// assert_eq!(style.to_codes(), "§l§n");
    /// assert!(style.is_visible_on_whitespace());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Format: u8 {
        /// `k` — randomly cycling glyphs.
        const OBFUSCATED    = 1 << 0;
        /// `l`
        const BOLD          = 1 << 1;
        /// `m`
        const STRIKETHROUGH = 1 << 2;
        /// `n`
        const UNDERLINE     = 1 << 3;
        /// `o`
        const ITALIC        = 1 << 4;
    }
}

/// Flags paired with their code characters, in emission order.
const CODES: [(Format, char); 5] = [
    (Format::OBFUSCATED, 'k'),
    (Format::BOLD, 'l'),
    (Format::STRIKETHROUGH, 'm'),
    (Format::UNDERLINE, 'n'),
    (Format::ITALIC, 'o'),
];

impl Format {
    /// The flag named by a code character (`k`–`o`, either case).
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'k' => Some(Self::OBFUSCATED),
            'l' => Some(Self::BOLD),
            'm' => Some(Self::STRIKETHROUGH),
            'n' => Some(Self::UNDERLINE),
            'o' => Some(Self::ITALIC),
            _ => None,
        }
    }

    /// Code characters of every set flag, in flag-index order.
    pub fn codes(self) -> impl Iterator<Item = char> {
        CODES
            .into_iter()
            .filter(move |&(flag, _)| self.contains(flag))
            .map(|(_, code)| code)
    }

    /// Canonical tokens for every set flag, e.g. `§k§o`.
    #[must_use]
    pub fn to_codes(self) -> String {
        let mut out = String::with_capacity(self.bits().count_ones() as usize * 3);
        for code in self.codes() {
            out.push(MARKER);
            out.push(code);
        }
        out
    }

    /// Whether these flags draw something even over blank space.
    ///
    /// Underline and strikethrough render as lines through whitespace; the
    /// other flags only change how glyphs look.
    #[must_use]
    pub const fn is_visible_on_whitespace(self) -> bool {
        !self.on_whitespace().is_empty()
    }

    /// The subset of these flags that draws over blank space.
    #[must_use]
    pub const fn on_whitespace(self) -> Self {
        self.intersection(Self::STRIKETHROUGH.union(Self::UNDERLINE))
    }
}
