// SPDX-License-Identifier: MIT
//
// Minifier — the shortest canonical stream with the same rendered output.
//
// A canonical stream alternates between runs of adjacent tokens and the
// text segments that follow them:
//
//   prefix  [run] segment  [run] segment  ...  [run] segment
//
// The prefix is copied verbatim. Each run is reduced to what it actually
// does, by scanning it right to left:
//
//   - the first color token found (palette, true color, or reset) is the
//     run's color; everything to its left is overridden and dropped
//   - every format token seen before that point is an active flag
//
// The reduced run is then compared against what has already been emitted:
//
//   - new color            → color token, then every active flag in order
//   - same color / none    → only the flags not already emitted
//
// A run followed by a whitespace-only segment (and another run) is
// deferred when blank space looks the same before and after it: blank
// space shows only underline and strikethrough, drawn in the current
// color. A deferred run's tokens are carried into the next run and reduced
// together with it.
//
// True-color blocks that exactly equal a palette RGB come out as the
// one-character palette code.

use std::fmt;

use ct_color::{CodedColor, Color, Format, MARKER, RESET};
use log::trace;
use regex::Match;

use crate::pattern::CANONICAL;
use crate::token::Code;

// ─── Ink ─────────────────────────────────────────────────────────────────────

/// The color a run settles on, in minified form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ink {
    Coded(CodedColor),
    True(Color),
    Reset,
}

impl Ink {
    fn from_code(code: Code) -> Option<Self> {
        match code {
            Code::Palette(entry) => Some(Self::Coded(entry)),
            Code::TrueColor(color) => Some(color.palette_code().map_or(Self::True(color), Self::Coded)),
            Code::Reset => Some(Self::Reset),
            Code::Format(_) => None,
        }
    }
}

impl fmt::Display for Ink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coded(entry) => write!(f, "{entry}"),
            Self::True(color) => f.write_str(&color.to_true_color()),
            Self::Reset => write!(f, "{MARKER}{RESET}"),
        }
    }
}

// ─── Reduction ───────────────────────────────────────────────────────────────

/// What a run of tokens amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reduced {
    ink: Option<Ink>,
    formats: Format,
}

/// Scan `run` right to left until the first color-setting token.
fn reduce(run: &[Code]) -> Reduced {
    let mut formats = Format::empty();
    let mut idx = run.len();

    while idx > 0 {
        idx -= 1;
        match run[idx] {
            Code::Format(flag) => formats |= flag,
            code => {
                return Reduced {
                    ink: Ink::from_code(code),
                    formats,
                };
            }
        }
    }

    Reduced { ink: None, formats }
}

// ─── Emitter ─────────────────────────────────────────────────────────────────

/// The state of the stream as emitted so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
struct Emitter {
    last_ink: Option<Ink>,
    last_formats: Format,
}

impl Emitter {
    /// Move to `reduced`, returning the tokens that get there.
    fn emit(&mut self, reduced: Reduced) -> String {
        let Reduced { ink, formats } = reduced;

        match ink {
            // A repeated color token is redundant only if it wouldn't clear
            // a flag that is currently on.
            Some(ink) if self.last_ink != Some(ink) || !formats.contains(self.last_formats) => {
                self.last_ink = Some(ink);
                self.last_formats = formats;
                format!("{ink}{}", formats.to_codes())
            }
            _ => {
                let added = formats.difference(self.last_formats);
                self.last_formats |= formats;
                added.to_codes()
            }
        }
    }

    /// What blank space looks like: the line flags and the color they are
    /// drawn in, or `None` when it shows nothing.
    fn on_whitespace(self) -> Option<(Option<Ink>, Format)> {
        let lines = self.last_formats.on_whitespace();
        (!lines.is_empty()).then_some((self.last_ink, lines))
    }
}

fn is_blank(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(char::is_whitespace)
}

// ─── minify ──────────────────────────────────────────────────────────────────

/// Minify a canonical stream.
///
/// ```
/// use ct_markup::minify;
///
/// assert_eq!(minify("§0§1"), "§1");
/// assert_eq!(minify("§x§a§a§0§0§a§ahi"), "§5hi");
/// assert_eq!(minify("§0text§0text"), "§0texttext");
/// ```
#[must_use]
pub fn minify(text: &str) -> String {
    let tokens: Vec<Match<'_>> = CANONICAL.find_iter(text).collect();
    let Some(first) = tokens.first() else {
        return text.to_owned();
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first.start()]);

    let mut emitter = Emitter::default();
    let mut pending: Vec<Code> = Vec::new();
    let mut idx = 0;

    while idx < tokens.len() {
        // Gather one run of adjacent tokens.
        let mut end = tokens[idx].start();
        while idx < tokens.len() && tokens[idx].start() == end {
            pending.extend(Code::parse(tokens[idx].as_str()));
            end = tokens[idx].end();
            idx += 1;
        }

        let is_last = idx == tokens.len();
        let next = tokens.get(idx).map_or(text.len(), Match::start);
        let segment = &text[end..next];
        let reduced = reduce(&pending);

        let mut after = emitter;
        let written = after.emit(reduced);

        if !is_last && is_blank(segment) && after.on_whitespace() == emitter.on_whitespace() {
            trace!("deferring {} token(s) over {} blank char(s)", pending.len(), segment.len());
            out.push_str(segment);
            continue;
        }

        trace!("run of {} token(s) → {reduced:?}", pending.len());
        out.push_str(&written);
        emitter = after;
        pending.clear();
        out.push_str(segment);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Reduction ───────────────────────────────────────────────────────

    fn codes(tokens: &[&str]) -> Vec<Code> {
        tokens.iter().filter_map(|t| Code::parse(t)).collect()
    }

    #[test]
    fn last_color_wins() {
        let reduced = reduce(&codes(&["§0", "§1"]));
        assert_eq!(reduced.ink, Some(Ink::Coded(ct_color::palette::DARK_BLUE)));
        assert_eq!(reduced.formats, Format::empty());
    }

    #[test]
    fn formats_before_the_color_are_dropped() {
        let reduced = reduce(&codes(&["§l", "§0", "§o", "§k"]));
        assert_eq!(reduced.ink, Some(Ink::Coded(ct_color::palette::BLACK)));
        assert_eq!(reduced.formats, Format::ITALIC | Format::OBFUSCATED);
    }

    #[test]
    fn formats_only_run_has_no_ink() {
        let reduced = reduce(&codes(&["§n", "§l"]));
        assert_eq!(reduced.ink, None);
        assert_eq!(reduced.formats, Format::BOLD | Format::UNDERLINE);
    }

    #[test]
    fn true_color_downgrades_to_palette() {
        let reduced = reduce(&codes(&["§x§f§f§a§a§0§0"]));
        assert_eq!(reduced.ink, Some(Ink::Coded(ct_color::palette::GOLD)));
    }

    // ── Emission ────────────────────────────────────────────────────────

    #[test]
    fn no_tokens_is_identity() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("plain & simple"), "plain & simple");
    }

    #[test]
    fn prefix_is_copied() {
        assert_eq!(minify("hi §0§1there"), "hi §1there");
        assert_eq!(minify("§x§1§2§3§4§5"), "§x§5");
    }

    #[test]
    fn flags_are_sorted() {
        assert_eq!(minify("§0§o§k§ltext"), "§0§k§l§otext");
    }

    #[test]
    fn already_active_flags_are_not_repeated() {
        assert_eq!(minify("§0§l§m§n-§l§m§n-"), "§0§l§m§n--");
        assert_eq!(minify("§0§l§n-§l§m§n-"), "§0§l§n-§m-");
    }

    #[test]
    fn repeated_color_that_clears_flags_is_kept() {
        assert_eq!(minify("§0§ltext§0text"), "§0§ltext§0text");
        assert_eq!(minify("§ra§lb§rc"), "§ra§lb§rc");
    }

    #[test]
    fn repeated_color_keeping_flags_is_dropped() {
        assert_eq!(minify("§0§ltext§0§ltext"), "§0§ltexttext");
    }

    #[test]
    fn reset_then_trailing_format() {
        assert_eq!(minify("§a§b§k§rtext §l"), "§rtext §l");
    }

    #[test]
    fn upper_case_tokens_come_out_lower_case() {
        assert_eq!(minify("§A§Lhi"), "§a§lhi");
        assert_eq!(minify("§X§1§2§3§4§5§6hi"), "§x§1§2§3§4§5§6hi");
    }

    // ── Whitespace ──────────────────────────────────────────────────────

    #[test]
    fn deferred_color_is_not_lost() {
        assert_eq!(minify("§1a§2 §lb"), "§1a §2§lb");
    }

    #[test]
    fn deferred_flags_are_not_lost() {
        assert_eq!(minify("§1a§l §ob"), "§1a §l§ob");
    }

    #[test]
    fn trailing_blank_segment_is_emitted() {
        assert_eq!(minify("a§1  "), "a§1  ");
    }

    #[test]
    fn underline_survives_whitespace() {
        assert_eq!(minify("§0§n  §1§n  §0§n  "), "§0§n  §1§n  §0§n  ");
    }

    #[test]
    fn invisible_change_under_a_line_is_deferred() {
        assert_eq!(minify("§0§n  §l§n  §m"), "§0§n    §l§m");
        assert_eq!(minify("§m §m§k   §l§x§a§a§0§0§a§a"), "§m    §5");
    }

    #[test]
    fn clearing_a_line_over_blank_space_is_kept() {
        assert_eq!(minify("§m §1§k§a §m"), "§m §a §m");
        assert_eq!(minify("§0§n a§r  §lb"), "§0§n a§r  §lb");
    }

    #[test]
    fn recoloring_a_line_over_blank_space_is_kept() {
        assert_eq!(minify("§0§m a§1§m  §lb"), "§0§m a§1§m  §lb");
    }

    // ── Idempotence ─────────────────────────────────────────────────────

    #[test]
    fn minified_output_is_a_fixed_point() {
        for input in [
            "§0§l§m§n-§l§m§n-§r",
            "§0   a  §l §0a",
            "§0§k  §1§k  §1§k  §0§k  ",
            "§0§m  §1§m  §1§m  §0§m  ",
            "§x§1§1§2§2§3§3 §x§4§4§5§5§6§6test",
            "§ra§lb§rc",
        ] {
            let once = minify(input);
            assert_eq!(minify(&once), once, "input {input:?}");
        }
    }

    /// Fixed-seed xorshift, so generated cases are the same on every run.
    struct XorShift(u64);

    impl XorShift {
        fn below(&mut self, n: usize) -> usize {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 % n as u64) as usize
        }
    }

    #[test]
    fn generated_streams_are_fixed_points() {
        const PIECES: [&str; 17] = [
            "§0", "§1", "§a", "§f", "§k", "§l", "§m", "§n", "§o", "§r",
            "§x§a§a§0§0§a§a", "§x§1§2§3§4§5§6",
            " ", "  ", "a", "b", "§L",
        ];
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

        for _ in 0..20_000 {
            let len = rng.below(14);
            let input: String = (0..len).map(|_| PIECES[rng.below(PIECES.len())]).collect();
            let once = minify(&input);
            assert_eq!(minify(&once), once, "input {input:?}");
        }
    }
}
