// SPDX-License-Identifier: MIT
//
// The custom delimiter — the punctuation character that stands in for the
// control marker in the human-typed dialects (`&a`, `&#f80`, `&x&f&8&0`).
//
// Validated once, at construction. Every later use trusts it.

use std::fmt;
use std::str::FromStr;

use ct_color::MARKER;
use log::debug;

use crate::error::{Error, Result};

/// A validated delimiter character: not alphanumeric, not whitespace, and
/// not the control marker itself.
///
/// ```
/// use ct_markup::Delimiter;
///
/// assert_eq!(Delimiter::default().as_char(), '&');
/// assert!(Delimiter::new('$').is_ok());
/// assert!(Delimiter::new('a').is_err());
/// assert!(Delimiter::new(' ').is_err());
/// assert!(Delimiter::new('§').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiter(char);

impl Delimiter {
    /// `&`
    pub const DEFAULT: Self = Self('&');

    /// Validate `c` as a delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] if `c` is alphanumeric, whitespace,
    /// or the control marker.
    pub fn new(c: char) -> Result<Self> {
        if c.is_alphanumeric() || c.is_whitespace() || c == MARKER {
            debug!("rejected delimiter {c:?}");
            return Err(Error::InvalidDelimiter(c));
        }
        Ok(Self(c))
    }

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Whether `c` introduces a code: the delimiter or the control marker.
    #[inline]
    #[must_use]
    pub const fn is_prefix(self, c: char) -> bool {
        c == self.0 || c == MARKER
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Delimiter {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        Self::new(c)
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(Error::DelimiterLength(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_accepted() {
        for c in ['&', '$', '#', '^', '~', '\\', '-', '¤'] {
            assert_eq!(Delimiter::new(c).map(Delimiter::as_char), Ok(c));
        }
    }

    #[test]
    fn letters_digits_whitespace_and_marker_are_rejected() {
        for c in ['a', 'Z', '7', 'é', ' ', '\t', '\n', MARKER] {
            assert_eq!(Delimiter::new(c), Err(Error::InvalidDelimiter(c)));
        }
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("$".parse::<Delimiter>().map(Delimiter::as_char), Ok('$'));
        assert_eq!(
            "".parse::<Delimiter>(),
            Err(Error::DelimiterLength(String::new()))
        );
        assert_eq!(
            "&&".parse::<Delimiter>(),
            Err(Error::DelimiterLength("&&".to_owned()))
        );
        assert_eq!("x".parse::<Delimiter>(), Err(Error::InvalidDelimiter('x')));
    }

    #[test]
    fn prefix_includes_marker() {
        let d = Delimiter::new('$').unwrap();
        assert!(d.is_prefix('$'));
        assert!(d.is_prefix(MARKER));
        assert!(!d.is_prefix('&'));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::InvalidDelimiter('a').to_string(),
            "'a' cannot be used as a custom delimiter character"
        );
    }
}
