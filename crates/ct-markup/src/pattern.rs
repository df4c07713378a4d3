// SPDX-License-Identifier: MIT
//
// Dialect recognizers — one fixed structural pattern per dialect.
//
// Case-insensitivity is ASCII-only and spelled out in the character classes
// (`[0-9A-Fa-f]`) rather than with `(?i)`, which in Unicode mode would also
// accept look-alikes such as the Kelvin sign for `k`.
//
// Patterns that don't involve the delimiter are compiled once per process.
// The rest are compiled once per delimiter, in `DelimitedPatterns`.
//
//   {#start>}text{#end<}     GRADIENT
//   {#mid<>}                 SPLICE
//   {#name}                  NAMED
//   &#RGB  &#RRGGBB          hex
//   &x&R&G&B  &x&R&R&G&G&B&B true_color
//   &0 … &f                  color_code
//   &k … &o  &r              format_code
//   §x§R§R§G§G§B§B  §C       CANONICAL

use std::sync::LazyLock;

use regex::Regex;

use crate::delimiter::Delimiter;

/// A color identifier inside braces: hex digits or a name, 3+ characters.
const NAME: &str = "[0-9A-Za-z]{3,}?";

/// Any well-formed canonical token.
pub static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("§[Xx](?:§[0-9A-Fa-f]){6}|§[0-9A-Fa-fK-Ok-oRr]")
        .expect("canonical token pattern is valid")
});

/// `{#name}`
pub static NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{#({NAME})\}}")).expect("named tag pattern is valid")
});

/// `{#name<>}` — the point where one gradient ends and the next begins.
pub static SPLICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{#({NAME})<>\}}")).expect("splice tag pattern is valid")
});

/// `{#start>}text{#end<}` — captures start, text, end.
pub static GRADIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{#({NAME})>\}}(.*?)\{{#({NAME})<\}}"))
        .expect("gradient pattern is valid")
});

// ─── DelimitedPatterns ───────────────────────────────────────────────────────

/// The recognizers whose prefix is the configurable delimiter.
#[derive(Debug, Clone)]
pub struct DelimitedPatterns {
    /// `D#RGB` or `D#RRGGBB`; group 1 is the digits.
    pub hex: Regex,
    /// `DxDRDGDB` or `DxDRDRDGDGDBDB`.
    pub true_color: Regex,
    /// `[§D][0-9a-f]`; group 1 is the code.
    pub color_code: Regex,
    /// `[§D][k-or]`; group 1 is the code.
    pub format_code: Regex,
}

impl DelimitedPatterns {
    /// Compile the recognizers for `delimiter`.
    ///
    /// # Panics
    ///
    /// Never in practice: the delimiter is regex-escaped before it is
    /// spliced into the patterns.
    #[must_use]
    pub fn new(delimiter: Delimiter) -> Self {
        let d = regex::escape(&delimiter.to_string());
        let compile = |pattern: String| {
            Regex::new(&pattern).expect("escaped delimiter forms a valid pattern")
        };
        Self {
            hex: compile(format!("{d}#((?:[0-9A-Fa-f]{{3}}){{1,2}})")),
            true_color: compile(format!("{d}[Xx](?:(?:{d}[0-9A-Fa-f]){{3}}){{1,2}}")),
            color_code: compile(format!("[§{d}]([0-9A-Fa-f])")),
            format_code: compile(format!("[§{d}]([K-Ok-oRr])")),
        }
    }
}

impl Default for DelimitedPatterns {
    fn default() -> Self {
        Self::new(Delimiter::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(re: &Regex, text: &str) -> Vec<String> {
        re.find_iter(text).map(|m| m.as_str().to_owned()).collect()
    }

    #[test]
    fn canonical_prefers_true_color_block() {
        assert_eq!(
            matches(&CANONICAL, "§x§1§2§3§4§5§6§l"),
            ["§x§1§2§3§4§5§6", "§l"]
        );
    }

    #[test]
    fn canonical_ignores_incomplete_blocks_and_unknown_codes() {
        assert_eq!(matches(&CANONICAL, "§x§1 §z §R"), ["§1", "§R"]);
    }

    #[test]
    fn named_requires_three_characters() {
        assert_eq!(matches(&NAMED, "{#ab} {#abc} {#white}"), ["{#abc}", "{#white}"]);
        assert!(NAMED.find("{#a_b_c}").is_none());
    }

    #[test]
    fn gradient_captures_are_lazy() {
        let caps = GRADIENT.captures("{#000>}a{#fff<}b{#fff<}").unwrap();
        assert_eq!(&caps[1], "000");
        assert_eq!(&caps[2], "a");
        assert_eq!(&caps[3], "fff");
    }

    #[test]
    fn gradient_does_not_cross_lines() {
        assert!(GRADIENT.find("{#000>}a\nb{#fff<}").is_none());
    }

    #[test]
    fn hex_takes_at_most_six_digits() {
        let p = DelimitedPatterns::default();
        assert_eq!(matches(&p.hex, "&#12345"), ["&#123"]);
        assert_eq!(matches(&p.hex, "&#1234567"), ["&#123456"]);
        assert!(p.hex.find("&#12").is_none());
    }

    #[test]
    fn true_color_takes_whole_triples() {
        let p = DelimitedPatterns::default();
        assert_eq!(matches(&p.true_color, "&x&1&2&3&4"), ["&x&1&2&3"]);
        assert_eq!(matches(&p.true_color, "&X&1&2&3&4&5&6&7"), ["&X&1&2&3&4&5&6"]);
        assert!(p.true_color.find("&x&1&2").is_none());
    }

    #[test]
    fn codes_accept_marker_or_delimiter() {
        let p = DelimitedPatterns::default();
        assert_eq!(matches(&p.color_code, "&0§A&g"), ["&0", "§A"]);
        assert_eq!(matches(&p.format_code, "&k§O&R&p"), ["&k", "§O", "&R"]);
    }

    #[test]
    fn metacharacter_delimiters_are_escaped() {
        let p = DelimitedPatterns::new(Delimiter::new('^').unwrap());
        assert_eq!(matches(&p.color_code, "^a&b"), ["^a"]);
        let p = DelimitedPatterns::new(Delimiter::new('.').unwrap());
        assert_eq!(matches(&p.hex, ".#fff x#fff"), [".#fff"]);
        let p = DelimitedPatterns::new(Delimiter::new(']').unwrap());
        assert_eq!(matches(&p.format_code, "]l&l"), ["]l"]);
    }
}
