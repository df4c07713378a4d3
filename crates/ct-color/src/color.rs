// SPDX-License-Identifier: MIT
//
// Color — a clamped 24-bit RGB value and its textual encodings.
//
// Chat renderers only understand RGB, so there is no color science here:
// distance is squared Euclidean RGB (an ordering metric for palette
// quantization, nothing more) and interpolation is a per-channel linear
// blend rounded to the nearest integer.
//
// Encodings:
//
//   to_hex()          "1A2B3C"            upper case, no prefix
//   to_true_color()   "§x§1§a§2§b§3§c"    control marker + x + 6 marked digits
//   to_delimited('&') "&x&1&a&2&b&3&c"    same shape with a custom delimiter
//   minified()        "§5" or true color  palette code when the RGB is exact

use std::fmt;

use crate::names::ColorNames;
use crate::palette;

/// The canonical control marker that introduces every color or format token.
pub const MARKER: char = '\u{a7}';

const MAX_RGB: u32 = 0x00FF_FFFF;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An immutable RGB color. Equality is by RGB value only.
///
/// Out-of-range input is clamped, never rejected:
///
/// ```
/// use ct_color::Color;
///
/// assert_eq!(Color::new(-5), Color::BLACK);
/// assert_eq!(Color::new(0x1FF_FFFF), Color::WHITE);
/// assert_eq!(Color::rgb(300, -1, 0x80).to_hex(), "FF0080");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    rgb: u32,
}

impl Color {
    pub const BLACK: Self = Self { rgb: 0 };
    pub const WHITE: Self = Self { rgb: MAX_RGB };

    /// Create a color from a packed `0xRRGGBB` value, clamped to 24 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(value: i64) -> Self {
        let rgb = if value < 0 {
            0
        } else if value > MAX_RGB as i64 {
            MAX_RGB
        } else {
            // Safe: 0 <= value <= 0xFFFFFF.
            value as u32
        };
        Self { rgb }
    }

    /// Create a color from three channels, each clamped to `0..=255`.
    #[must_use]
    pub const fn rgb(red: i32, green: i32, blue: i32) -> Self {
        Self::rgb8(clamp_channel(red), clamp_channel(green), clamp_channel(blue))
    }

    /// Create a color from three in-range channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            rgb: (red as u32) << 16 | (green as u32) << 8 | blue as u32,
        }
    }

    /// The packed `0xRRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.rgb
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn red(self) -> u8 {
        (self.rgb >> 16 & 0xFF) as u8
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn green(self) -> u8 {
        (self.rgb >> 8 & 0xFF) as u8
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn blue(self) -> u8 {
        (self.rgb & 0xFF) as u8
    }

    /// Squared Euclidean distance in RGB. No square root: only the ordering
    /// matters to the palette quantizer.
    #[must_use]
    pub const fn distance(self, other: Self) -> u32 {
        let dr = self.red().abs_diff(other.red()) as u32;
        let dg = self.green().abs_diff(other.green()) as u32;
        let db = self.blue().abs_diff(other.blue()) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Blend toward `other` by `factor`, clamped to `[0, 1]`.
    ///
    /// Each channel is interpolated independently and rounded to the nearest
    /// integer. `factor = 0` returns `self`, `factor = 1` returns `other`.
    /// A NaN factor is treated as 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn interpolate(self, other: Self, factor: f64) -> Self {
        let t = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        // Safe: a blend of two values in 0..=255 stays in 0..=255.
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as i32;
        Self::rgb(
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    /// `steps + 1` evenly spaced colors from `self` to `other`, both included.
    ///
    /// With `steps = 0` the list holds only `self`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn interpolate_to_list(self, other: Self, steps: usize) -> Vec<Self> {
        (0..=steps)
            .map(|i| self.interpolate(other, i as f64 / steps as f64))
            .collect()
    }

    /// Six upper-case hex digits, no prefix.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:06X}", self.rgb)
    }

    /// The canonical true-color token: `§x` followed by six `§`-marked
    /// lower-case hex digits.
    #[must_use]
    pub fn to_true_color(self) -> String {
        self.to_delimited(MARKER)
    }

    /// The true-color token spelled with `delimiter` instead of the marker.
    #[must_use]
    pub fn to_delimited(self, delimiter: char) -> String {
        let mut out = String::with_capacity(14 * delimiter.len_utf8());
        out.push(delimiter);
        out.push('x');
        for digit in self.to_hex().chars() {
            out.push(delimiter);
            out.push(digit.to_ascii_lowercase());
        }
        out
    }

    /// The palette code when this RGB exactly equals a palette entry,
    /// otherwise the true-color token.
    #[must_use]
    pub fn minified(self) -> String {
        self.palette_code()
            .map_or_else(|| self.to_true_color(), |entry| entry.to_string())
    }

    /// The palette entry whose RGB equals this color exactly, if any.
    ///
    /// Found through the quantizer, so an exact hit is always the entry
    /// [`palette::nearest`] would pick.
    #[must_use]
    pub fn palette_code(self) -> Option<palette::CodedColor> {
        let nearest = palette::nearest(self);
        (nearest.rgb == self.rgb).then_some(nearest)
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    /// Parse a strict hex color.
    ///
    /// Accepted lengths: 3 (`RGB`), 4 (`#RGB`), 6 (`RRGGBB`), 7 (`#RRGGBB`).
    /// In the 4- and 7-character forms the first character is a prefix and
    /// is skipped. Short digits are doubled (`a0a` → `AA00AA`).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = match s.chars().count() {
            3 | 6 => s,
            4 | 7 => {
                let mut chars = s.chars();
                chars.next();
                chars.as_str()
            }
            _ => return None,
        };
        parse_hex_digits(digits).map(|rgb| Self { rgb })
    }

    /// Decode the first canonical color token in `s`: a palette code
    /// (`§5`) or a true-color block (`§x§1§2§3§4§5§6`).
    ///
    /// Format and reset tokens are not colors and are skipped over.
    #[must_use]
    pub fn from_control(s: &str) -> Option<Self> {
        for (idx, c) in s.char_indices() {
            if c != MARKER {
                continue;
            }
            let rest = &s[idx + c.len_utf8()..];
            if let Some(color) = decode_true_color(rest) {
                return Some(color);
            }
            if let Some(code) = rest.chars().next() {
                if let Some(entry) = palette::by_code(code) {
                    return Some(entry.color());
                }
            }
        }
        None
    }

    /// Decode exactly one true-color token, `§x§R§R§G§G§B§B`, and nothing else.
    #[must_use]
    pub fn from_true_color(s: &str) -> Option<Self> {
        let rest = s.strip_prefix(MARKER)?;
        if rest.chars().count() != 13 {
            return None;
        }
        decode_true_color(rest)
    }

    /// Strict hex first, then the name table.
    #[must_use]
    pub fn from_hex_or_name<N: ColorNames + ?Sized>(s: &str, names: &N) -> Option<Self> {
        Self::from_hex(s).or_else(|| names.lookup(s))
    }

    /// Parse anything that denotes a color: a control token, strict hex,
    /// or a name.
    #[must_use]
    pub fn parse<N: ColorNames + ?Sized>(s: &str, names: &N) -> Option<Self> {
        Self::from_control(s).or_else(|| Self::from_hex_or_name(s, names))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:06X})", self.rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.rgb)
    }
}

impl From<palette::CodedColor> for Color {
    fn from(entry: palette::CodedColor) -> Self {
        entry.color()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn clamp_channel(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

/// Parse 3 or 6 hex digits. Three digits are doubled into six.
fn parse_hex_digits(digits: &str) -> Option<u32> {
    let short = match digits.len() {
        3 => true,
        6 => false,
        _ => return None,
    };
    let mut rgb = 0u32;
    for c in digits.chars() {
        let d = c.to_digit(16)?;
        rgb = rgb << 4 | d;
        if short {
            rgb = rgb << 4 | d;
        }
    }
    Some(rgb)
}

/// Decode `x§R§R§G§G§B§B` (the part after the leading marker).
fn decode_true_color(rest: &str) -> Option<Color> {
    let mut chars = rest.chars();
    if !matches!(chars.next(), Some('x' | 'X')) {
        return None;
    }
    let mut rgb = 0u32;
    for _ in 0..6 {
        if chars.next() != Some(MARKER) {
            return None;
        }
        rgb = rgb << 4 | chars.next()?.to_digit(16)?;
    }
    Some(Color { rgb })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{NamedColors, NoNames};

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn packed_value_is_clamped() {
        assert_eq!(Color::new(-1).value(), 0);
        assert_eq!(Color::new(0x0100_0000).value(), 0xFF_FFFF);
        assert_eq!(Color::new(0x12_3456).value(), 0x12_3456);
    }

    #[test]
    fn channels_are_clamped_independently() {
        let color = Color::rgb(-20, 128, 999);
        assert_eq!((color.red(), color.green(), color.blue()), (0, 128, 255));
    }

    #[test]
    fn channel_accessors() {
        let color = Color::new(0xAB_CDEF);
        assert_eq!(color.red(), 0xAB);
        assert_eq!(color.green(), 0xCD);
        assert_eq!(color.blue(), 0xEF);
    }

    // ── Distance ─────────────────────────────────────────────────────────

    #[test]
    fn distance_is_squared_euclidean() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(13, 16, 30);
        assert_eq!(a.distance(b), 9 + 16);
        assert_eq!(b.distance(a), 25);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn black_white_distance_is_maximal() {
        assert_eq!(Color::BLACK.distance(Color::WHITE), 3 * 255 * 255);
    }

    // ── Interpolation ────────────────────────────────────────────────────

    #[test]
    fn interpolate_endpoints_are_exact() {
        let a = Color::new(0x12_3456);
        let b = Color::new(0xFE_DCBA);
        assert_eq!(a.interpolate(b, 0.0), a);
        assert_eq!(a.interpolate(b, 1.0), b);
    }

    #[test]
    fn interpolate_clamps_factor() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.interpolate(b, -3.0), a);
        assert_eq!(a.interpolate(b, 7.5), b);
        assert_eq!(a.interpolate(b, f64::NAN), a);
    }

    #[test]
    fn interpolate_rounds_to_nearest() {
        // 255 * 0.5 = 127.5 rounds up.
        assert_eq!(Color::BLACK.interpolate(Color::WHITE, 0.5).to_hex(), "808080");
        // 170 / 7 = 24.28 rounds down.
        let purple = Color::new(0xAA_00AA);
        assert_eq!(Color::BLACK.interpolate(purple, 1.0 / 7.0).to_hex(), "180018");
    }

    #[test]
    fn interpolate_to_list_includes_both_ends() {
        let list = Color::BLACK.interpolate_to_list(Color::WHITE, 15);
        assert_eq!(list.len(), 16);
        assert_eq!(list[0], Color::BLACK);
        assert_eq!(list[1].to_hex(), "111111");
        assert_eq!(list[15], Color::WHITE);
    }

    #[test]
    fn interpolate_to_list_zero_steps() {
        assert_eq!(Color::WHITE.interpolate_to_list(Color::BLACK, 0), vec![Color::WHITE]);
    }

    // ── Encodings ────────────────────────────────────────────────────────

    #[test]
    fn hex_is_upper_case() {
        assert_eq!(Color::new(0xAB_CD0F).to_hex(), "ABCD0F");
        assert_eq!(format!("{}", Color::new(0x00_00AA)), "0000AA");
    }

    #[test]
    fn true_color_is_lower_case() {
        assert_eq!(Color::new(0xAB_CD0F).to_true_color(), "§x§a§b§c§d§0§f");
    }

    #[test]
    fn delimited_true_color() {
        assert_eq!(Color::new(0x11_2233).to_delimited('&'), "&x&1&1&2&2&3&3");
    }

    #[test]
    fn minified_prefers_palette_code() {
        assert_eq!(Color::new(0xAA_00AA).minified(), "§5");
        assert_eq!(Color::new(0x00_0000).minified(), "§0");
        assert_eq!(Color::new(0xAA_00AB).minified(), "§x§a§a§0§0§a§b");
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Color::new(0xC8_6432)), "Color(#C86432)");
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn hex_short_forms_double_digits() {
        assert_eq!(Color::from_hex("a0a"), Some(Color::new(0xAA_00AA)));
        assert_eq!(Color::from_hex("#F80"), Some(Color::new(0xFF_8800)));
    }

    #[test]
    fn hex_full_forms() {
        assert_eq!(Color::from_hex("c86432"), Some(Color::new(0xC8_6432)));
        assert_eq!(Color::from_hex("#C86432"), Some(Color::new(0xC8_6432)));
    }

    #[test]
    fn hex_invalid_lengths_and_digits() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("12"), None);
        assert_eq!(Color::from_hex("12345"), None);
        assert_eq!(Color::from_hex("1234567a"), None);
        assert_eq!(Color::from_hex("xyz"), None);
        assert_eq!(Color::from_hex("#12g456"), None);
    }

    #[test]
    fn control_palette_code() {
        assert_eq!(Color::from_control("§5"), Some(Color::new(0xAA_00AA)));
        assert_eq!(Color::from_control("§A"), Some(Color::new(0x55_FF55)));
    }

    #[test]
    fn control_true_color() {
        assert_eq!(
            Color::from_control("§x§1§2§3§4§5§6"),
            Some(Color::new(0x12_3456))
        );
    }

    #[test]
    fn true_color_token_must_be_exact() {
        assert_eq!(
            Color::from_true_color("§X§A§b§C§d§E§f"),
            Some(Color::new(0xAB_CDEF))
        );
        assert_eq!(Color::from_true_color("§x§1"), None);
        assert_eq!(Color::from_true_color("§x§1§2§3§4§5§6§7"), None);
        assert_eq!(Color::from_true_color("x§1§2§3§4§5§6"), None);
    }

    #[test]
    fn control_skips_incomplete_true_color() {
        // `§x§1` is not a full block; the `§1` inside it still is a color.
        assert_eq!(Color::from_control("§x§1"), Some(Color::new(0x00_00AA)));
        assert_eq!(Color::from_control("§l§r"), None);
        assert_eq!(Color::from_control("plain"), None);
    }

    #[test]
    fn parse_falls_back_to_names() {
        assert_eq!(Color::parse("white", &NamedColors), Some(Color::WHITE));
        assert_eq!(Color::parse("WHITE", &NamedColors), Some(Color::WHITE));
        assert_eq!(Color::parse("white", &NoNames), None);
        assert_eq!(Color::parse("#000", &NoNames), Some(Color::BLACK));
    }

    #[test]
    fn hex_wins_over_names() {
        // "bad" is valid hex, so it never reaches the table.
        assert_eq!(
            Color::from_hex_or_name("bad", &NamedColors),
            Some(Color::new(0xBB_AADD))
        );
    }
}
