// SPDX-License-Identifier: MIT
//
// The rewrite pipeline.
//
// A `Converter` owns one delimiter, one name table, and the recognizers
// compiled for that delimiter. Each stage is a pure `&str -> String` find-
// and-replace over the whole input:
//
//   convert_gradients   {#a>}text{#b<}, {#m<>}   → per-character true color
//   convert_named       {#name} {#RGB} {#RRGGBB} → true color
//   convert_hex         &#RGB &#RRGGBB           → true color
//   convert_legacy      &x&R&G&B…, &0–&f, &k–&o, &r → canonical tokens
//
// `convert` runs them in that order: gradients must see their brace tags
// before the named-tag stage eats them, and the legacy stage runs last so
// everything is canonical by the time the minifier sees it.
//
// Every stage leaves unresolvable input byte-identical. Every stage has a
// strip twin that removes exactly the span the converter would rewrite.

use ct_color::{Color, ColorNames, MARKER, NamedColors};
use log::{debug, trace};
use regex::Captures;

use crate::delimiter::Delimiter;
use crate::error::Result;
use crate::gradient;
use crate::minify::minify;
use crate::pattern::{CANONICAL, DelimitedPatterns, GRADIENT, NAMED, SPLICE};

// ─── Converter ───────────────────────────────────────────────────────────────

/// Converts every supported dialect into the canonical stream.
///
/// ```
/// use ct_markup::Converter;
///
/// let converter = Converter::default();
/// assert_eq!(converter.convert("&aHi &#f80there"), "§aHi §x§f§f§8§8§0§0there");
/// assert_eq!(converter.convert_minified("&x&a&0&a{#white}!"), "§f!");
/// assert_eq!(converter.strip("&l{#red}Hi&r"), "Hi");
/// ```
#[derive(Debug, Clone)]
pub struct Converter<N = NamedColors> {
    delimiter: Delimiter,
    names: N,
    patterns: DelimitedPatterns,
}

impl Default for Converter<NamedColors> {
    fn default() -> Self {
        Self::new(Delimiter::DEFAULT, NamedColors)
    }
}

impl Converter<NamedColors> {
    /// A converter with the built-in name table and a custom delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDelimiter`] if `delimiter` is
    /// alphanumeric, whitespace, or the control marker.
    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        Ok(Self::new(Delimiter::new(delimiter)?, NamedColors))
    }
}

impl<N: ColorNames> Converter<N> {
    #[must_use]
    pub fn new(delimiter: Delimiter, names: N) -> Self {
        Self {
            delimiter,
            names,
            patterns: DelimitedPatterns::new(delimiter),
        }
    }

    #[inline]
    #[must_use]
    pub const fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Resolve a brace-tag identifier: strict hex, then the name table.
    fn resolve(&self, id: &str) -> Option<Color> {
        let color = Color::from_hex_or_name(id, &self.names);
        if color.is_none() {
            debug!("unresolved color identifier {id:?}");
        }
        color
    }

    // ── Pipeline ─────────────────────────────────────────────────────────

    /// Run every stage: gradients, named tags, hex tags, legacy codes.
    #[must_use]
    pub fn convert(&self, text: &str) -> String {
        let out = self.convert_gradients(text);
        let out = self.convert_named(&out);
        let out = self.convert_hex(&out);
        self.convert_legacy(&out)
    }

    /// [`convert`](Self::convert), then [`minify`].
    #[must_use]
    pub fn convert_minified(&self, text: &str) -> String {
        minify(&self.convert(text))
    }

    /// Convert every string of a batch.
    pub fn convert_all<I, S>(&self, texts: I, minified: bool) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| {
                if minified {
                    self.convert_minified(text.as_ref())
                } else {
                    self.convert(text.as_ref())
                }
            })
            .collect()
    }

    // ── Gradients ────────────────────────────────────────────────────────

    /// Resolve splice tags, then expand every `{#start>}text{#end<}`.
    ///
    /// A splice `{#mid<>}` becomes `{#MID<}{#MID>}` followed by the format
    /// flags active just before it, so formatting carries over into the
    /// second gradient.
    #[must_use]
    pub fn convert_gradients(&self, text: &str) -> String {
        let spliced = self.expand_splices(text, true);
        let out = GRADIENT.replace_all(&spliced, |caps: &Captures<'_>| {
            match (self.resolve(&caps[1]), self.resolve(&caps[3])) {
                (Some(start), Some(end)) => self.gradient(&caps[2], start, end),
                _ => caps[0].to_owned(),
            }
        });
        trace!("gradients: {} → {} bytes", text.len(), out.len());
        out.into_owned()
    }

    /// Rewrite each resolvable `{#mid<>}` as `{#MID<}{#MID>}`, followed by
    /// the carried format codes when `carry` is set.
    fn expand_splices(&self, text: &str, carry: bool) -> String {
        SPLICE
            .replace_all(text, |caps: &Captures<'_>| {
                let Some(color) = self.resolve(&caps[1]) else {
                    return caps[0].to_owned();
                };
                let hex = color.to_hex();
                let mut out = format!("{{#{hex}<}}{{#{hex}>}}");
                if carry {
                    let at = caps.get(0).map_or(0, |m| m.start());
                    let carried = gradient::carried_formats(&text[..at], &self.patterns.format_code);
                    out.push_str(&carried.to_codes());
                }
                out
            })
            .into_owned()
    }

    /// Color `text` from `start` to `end`, recognizing format tokens written
    /// with this converter's delimiter.
    #[must_use]
    pub fn gradient(&self, text: &str, start: Color, end: Color) -> String {
        gradient::gradient(text, start, end, self.delimiter)
    }

    // ── Single-color stages ──────────────────────────────────────────────

    /// `{#name}`, `{#RGB}`, `{#RRGGBB}` → true color.
    #[must_use]
    pub fn convert_named(&self, text: &str) -> String {
        NAMED
            .replace_all(text, |caps: &Captures<'_>| {
                self.resolve(&caps[1])
                    .map_or_else(|| caps[0].to_owned(), Color::to_true_color)
            })
            .into_owned()
    }

    /// `&#RGB`, `&#RRGGBB` → true color.
    #[must_use]
    pub fn convert_hex(&self, text: &str) -> String {
        self.patterns
            .hex
            .replace_all(text, |caps: &Captures<'_>| {
                Color::from_hex(&caps[1])
                    .map_or_else(|| caps[0].to_owned(), Color::to_true_color)
            })
            .into_owned()
    }

    /// Delimited true color, palette codes, and format codes, in that order.
    #[must_use]
    pub fn convert_legacy(&self, text: &str) -> String {
        let out = self.convert_true_color(text);
        let out = self.convert_color_codes(&out);
        self.convert_format_codes(&out)
    }

    /// `&x&R&G&B` → `§x§R§R§G§G§B§B`; `&x&R&R&G&G&B&B` → `§x§R§R§G§G§B§B`.
    #[must_use]
    pub fn convert_true_color(&self, text: &str) -> String {
        let d = self.delimiter.as_char();
        self.patterns
            .true_color
            .replace_all(text, |caps: &Captures<'_>| {
                let token = &caps[0];
                let mut chars = token.chars().skip(1);
                let x = chars.next().unwrap_or('x');
                let digits: Vec<char> = chars.filter(|&c| c != d).collect();
                let repeat = if digits.len() == 3 { 2 } else { 1 };

                let mut out = String::with_capacity(7 * (MARKER.len_utf8() + 1));
                out.push(MARKER);
                out.push(x);
                for digit in digits {
                    for _ in 0..repeat {
                        out.push(MARKER);
                        out.push(digit);
                    }
                }
                out
            })
            .into_owned()
    }

    /// `&0`–`&f` → `§0`–`§f`.
    #[must_use]
    pub fn convert_color_codes(&self, text: &str) -> String {
        self.patterns
            .color_code
            .replace_all(text, "§${1}")
            .into_owned()
    }

    /// `&k`–`&o`, `&r` → `§k`–`§o`, `§r`.
    #[must_use]
    pub fn convert_format_codes(&self, text: &str) -> String {
        self.patterns
            .format_code
            .replace_all(text, "§${1}")
            .into_owned()
    }

    // ── Stripping ────────────────────────────────────────────────────────

    /// Remove every code of every dialect, leaving only the text.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        let out = self.strip_gradients(text);
        let out = self.strip_named(&out);
        let out = self.strip_hex(&out);
        let out = self.strip_true_color(&out);
        let out = strip_canonical(&out);
        let out = self.strip_color_codes(&out);
        self.strip_format_codes(&out)
    }

    /// Remove delimited true color, palette codes, and format codes only.
    #[must_use]
    pub fn strip_legacy(&self, text: &str) -> String {
        let out = self.strip_true_color(text);
        let out = self.strip_color_codes(&out);
        self.strip_format_codes(&out)
    }

    /// Strip every string of a batch.
    pub fn strip_all<I, S>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|text| self.strip(text.as_ref())).collect()
    }

    /// Remove gradient tags, keeping the text between them.
    ///
    /// Splices are expanded first, exactly as the converter does, so a
    /// splice outside any gradient survives as the same literal tags.
    #[must_use]
    pub fn strip_gradients(&self, text: &str) -> String {
        let spliced = self.expand_splices(text, false);
        GRADIENT
            .replace_all(&spliced, |caps: &Captures<'_>| {
                if self.resolve(&caps[1]).is_some() && self.resolve(&caps[3]).is_some() {
                    caps[2].to_owned()
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned()
    }

    /// Remove resolvable `{#name}` tags; unknown names stay.
    #[must_use]
    pub fn strip_named(&self, text: &str) -> String {
        NAMED
            .replace_all(text, |caps: &Captures<'_>| {
                if self.resolve(&caps[1]).is_some() {
                    String::new()
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned()
    }

    #[must_use]
    pub fn strip_hex(&self, text: &str) -> String {
        self.patterns
            .hex
            .replace_all(text, |caps: &Captures<'_>| {
                if Color::from_hex(&caps[1]).is_some() {
                    String::new()
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned()
    }

    #[must_use]
    pub fn strip_true_color(&self, text: &str) -> String {
        self.patterns.true_color.replace_all(text, "").into_owned()
    }

    #[must_use]
    pub fn strip_color_codes(&self, text: &str) -> String {
        self.patterns.color_code.replace_all(text, "").into_owned()
    }

    #[must_use]
    pub fn strip_format_codes(&self, text: &str) -> String {
        self.patterns.format_code.replace_all(text, "").into_owned()
    }
}

/// Remove every canonical token.
#[must_use]
pub fn strip_canonical(text: &str) -> String {
    CANONICAL.replace_all(text, "").into_owned()
}
