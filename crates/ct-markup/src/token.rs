// SPDX-License-Identifier: MIT
//
// Canonical tokens, decoded.

use ct_color::{palette, CodedColor, Color, Format, MARKER, RESET};

/// One canonical control token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    /// `§0` … `§f`
    Palette(CodedColor),
    /// `§x§R§R§G§G§B§B`
    TrueColor(Color),
    /// `§k` … `§o`
    Format(Format),
    /// `§r`
    Reset,
}

impl Code {
    /// Decode a token matched by [`crate::pattern::CANONICAL`].
    ///
    /// Returns `None` for anything that isn't a complete token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if chars.next()? != MARKER {
            return None;
        }
        let code = chars.next()?;
        if code.eq_ignore_ascii_case(&'x') {
            return Color::from_true_color(token).map(Self::TrueColor);
        }
        if chars.next().is_some() {
            return None;
        }
        if code.eq_ignore_ascii_case(&RESET) {
            return Some(Self::Reset);
        }
        Format::from_code(code)
            .map(Self::Format)
            .or_else(|| palette::by_code(code).map(Self::Palette))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind() {
        assert_eq!(Code::parse("§5"), Some(Code::Palette(palette::DARK_PURPLE)));
        assert_eq!(Code::parse("§F"), Some(Code::Palette(palette::WHITE)));
        assert_eq!(Code::parse("§l"), Some(Code::Format(Format::BOLD)));
        assert_eq!(Code::parse("§R"), Some(Code::Reset));
        assert_eq!(
            Code::parse("§x§1§2§3§4§5§6"),
            Some(Code::TrueColor(Color::new(0x12_3456)))
        );
    }

    #[test]
    fn rejects_partial_tokens() {
        assert_eq!(Code::parse("§"), None);
        assert_eq!(Code::parse("§x§1"), None);
        assert_eq!(Code::parse("§z"), None);
        assert_eq!(Code::parse("§11"), None);
        assert_eq!(Code::parse("&1"), None);
    }
}
