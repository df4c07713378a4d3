// SPDX-License-Identifier: MIT
//
// Gradient interpolation over a text span.
//
// Every visible character gets its own true-color token, blended linearly
// from the start color (first character, exact) to the end color (last
// character, exact). Format tokens inside the span are not visible: they
// are lifted out, accumulated, and re-emitted after the color token of
// every following character, because a color token clears the format
// state in the target protocol. A reset empties the accumulator.
//
//   "ab&lc"  black → white
//
//   §x§0§0§0§0§0§0 a
//   §x§8§0§8§0§8§0 b
//   §x§f§f§f§f§f§f §l c
//
// Whitespace is colored like any other character.

use ct_color::{Color, Format, MARKER, RESET};
use regex::Regex;

use crate::delimiter::Delimiter;

// ─── Pieces ──────────────────────────────────────────────────────────────────

/// A span split into format tokens and visible characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// A format or reset code character, prefix already consumed.
    Code(char),
    Visible(char),
}

fn is_format_or_reset(code: char) -> bool {
    Format::from_code(code).is_some() || code.eq_ignore_ascii_case(&RESET)
}

fn pieces(text: &str, delimiter: Delimiter) -> impl Iterator<Item = Piece> + '_ {
    let mut chars = text.chars().peekable();
    std::iter::from_fn(move || {
        let c = chars.next()?;
        if delimiter.is_prefix(c) {
            if let Some(&code) = chars.peek() {
                if is_format_or_reset(code) {
                    chars.next();
                    return Some(Piece::Code(code));
                }
            }
        }
        Some(Piece::Visible(c))
    })
}

/// Number of characters in `text` that are not part of a format token.
#[must_use]
pub fn visible_len(text: &str, delimiter: Delimiter) -> usize {
    pieces(text, delimiter)
        .filter(|piece| matches!(piece, Piece::Visible(_)))
        .count()
}

// ─── Gradient ────────────────────────────────────────────────────────────────

/// Color `text` with a gradient from `start` to `end`.
///
/// - Empty text yields just the end color.
/// - Equal endpoints yield the start color followed by the text untouched.
/// - Fewer than two visible characters yield start color, text, end color.
///
/// Format tokens may use the control marker or `delimiter`; they are
/// re-emitted in canonical form.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gradient(text: &str, start: Color, end: Color, delimiter: Delimiter) -> String {
    if text.is_empty() {
        return end.to_true_color();
    }
    if start == end {
        return format!("{}{text}", start.to_true_color());
    }
    let visible = visible_len(text, delimiter);
    if visible < 2 {
        return format!("{}{text}{}", start.to_true_color(), end.to_true_color());
    }

    let step = 1.0 / (visible - 1) as f64;
    let mut out = String::with_capacity(text.len() + visible * 16);
    let mut formats = String::new();
    let mut index = 0usize;

    for piece in pieces(text, delimiter) {
        match piece {
            Piece::Code(code) if code.eq_ignore_ascii_case(&RESET) => formats.clear(),
            Piece::Code(code) => {
                formats.push(MARKER);
                formats.push(code);
            }
            Piece::Visible(c) => {
                let color = start.interpolate(end, index as f64 * step);
                out.push_str(&color.to_true_color());
                out.push_str(&formats);
                out.push(c);
                index += 1;
            }
        }
    }
    out
}

// ─── Splice carry ────────────────────────────────────────────────────────────

/// The format flags still active at the end of `preceding`.
///
/// Scans the format tokens matched by `format_code` backward, collecting
/// flags until a reset, until all five flags are set, or until the start
/// of the text. Used to carry formatting across a gradient splice point.
#[must_use]
pub fn carried_formats(preceding: &str, format_code: &Regex) -> Format {
    let codes: Vec<char> = format_code
        .captures_iter(preceding)
        .filter_map(|caps| caps[1].chars().next())
        .collect();

    let mut carried = Format::empty();
    for code in codes.into_iter().rev() {
        let Some(flag) = Format::from_code(code) else {
            break;
        };
        carried |= flag;
        if carried.is_all() {
            break;
        }
    }
    carried
}
