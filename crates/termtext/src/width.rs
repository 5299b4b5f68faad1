#![forbid(unsafe_code)]

//! Display-width classification.
//!
//! Every codepoint falls into one [`WidthClass`]. Control codes and the
//! explicit zero-width ranges below come from a sorted range table searched
//! with a binary search, as does the East Asian Ambiguous set; everything
//! else is classified from the width data in `unicode-width`.
//! Ambiguous-width codepoints render as one or two columns depending on the
//! [`AmbiguousWidth`] policy.
//!
//! # Example
//! ```
//! use termtext::{AmbiguousWidth, WidthClass, char_width_regard_ambiguous, classify, str_width};
//!
//! assert_eq!(classify(0x2026), WidthClass::Ambiguous);
//! assert_eq!(str_width("\u{4E2D}\u{6587} English"), 12);
//! assert_eq!(str_width("\u{2026}"), 1);
//! assert_eq!(char_width_regard_ambiguous(0x2026), 2);
//! assert_eq!(AmbiguousWidth::Wide.str_width("\u{2026}"), 2);
//! ```

use std::cmp::Ordering;

use unicode_width::UnicodeWidthChar;

use crate::code_point::{CodeUnits, code_points};

/// Environment variable forcing ambiguous-width glyphs wide (`1/0/true/false`).
pub const ENV_CJK_WIDTH: &str = "TERMTEXT_CJK_WIDTH";
/// Environment variable naming the ambiguous-width policy (`narrow` or `wide`).
pub const ENV_AMBIGUOUS_WIDTH: &str = "TERMTEXT_AMBIGUOUS_WIDTH";
/// Locale variables consulted, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];
/// Languages whose terminals conventionally render ambiguous glyphs wide.
const CJK_LANGUAGES: [&str; 3] = ["ja", "ko", "zh"];

/// Inclusive codepoint ranges that always occupy zero columns.
///
/// Sorted and disjoint.
const ZERO_WIDTH: &[(u32, u32)] = &[
    // C0 controls, including NUL.
    (0x0000, 0x001F),
    // DEL and C1 controls.
    (0x007F, 0x009F),
    // Hangul Jungseong and Jongseong (combine with a leading Choseong).
    (0x1160, 0x11FF),
    // Zero width space, joiners, directional marks.
    (0x200B, 0x200F),
    // Line/paragraph separators and bidi embedding controls.
    (0x2028, 0x202E),
    // Word joiner and invisible operators.
    (0x2060, 0x2064),
    // Zero width no-break space / byte order mark.
    (0xFEFF, 0xFEFF),
];

/// Inclusive East Asian Ambiguous ranges (EastAsianWidth.txt `A`).
///
/// Sorted and disjoint. Consulted only for codepoints `unicode-width` already
/// measures as one column, so ambiguous combining marks stay zero width.
const AMBIGUOUS: &[(u32, u32)] = &[
    // Latin-1 punctuation, symbols and letters.
    (0x00A1, 0x00A1), (0x00A4, 0x00A4), (0x00A7, 0x00A8), (0x00AA, 0x00AA), (0x00AD, 0x00AE),
    (0x00B0, 0x00B4), (0x00B6, 0x00BA), (0x00BC, 0x00BF), (0x00C6, 0x00C6), (0x00D0, 0x00D0),
    (0x00D7, 0x00D8), (0x00DE, 0x00E1), (0x00E6, 0x00E6), (0x00E8, 0x00EA), (0x00EC, 0x00ED),
    (0x00F0, 0x00F0), (0x00F2, 0x00F3), (0x00F7, 0x00FA), (0x00FC, 0x00FC), (0x00FE, 0x00FE),
    // Latin Extended letters.
    (0x0101, 0x0101), (0x0111, 0x0111), (0x0113, 0x0113), (0x011B, 0x011B), (0x0126, 0x0127),
    (0x012B, 0x012B), (0x0131, 0x0133), (0x0138, 0x0138), (0x013F, 0x0142), (0x0144, 0x0144),
    (0x0148, 0x014B), (0x014D, 0x014D), (0x0152, 0x0153), (0x0166, 0x0167), (0x016B, 0x016B),
    (0x01CE, 0x01CE), (0x01D0, 0x01D0), (0x01D2, 0x01D2), (0x01D4, 0x01D4), (0x01D6, 0x01D6),
    (0x01D8, 0x01D8), (0x01DA, 0x01DA), (0x01DC, 0x01DC),
    // IPA and spacing modifiers.
    (0x0251, 0x0251), (0x0261, 0x0261), (0x02C4, 0x02C4), (0x02C7, 0x02C7), (0x02C9, 0x02CB),
    (0x02CD, 0x02CD), (0x02D0, 0x02D0), (0x02D8, 0x02DB), (0x02DD, 0x02DD), (0x02DF, 0x02DF),
    // Combining diacritics.
    (0x0300, 0x036F),
    // Greek.
    (0x0391, 0x03A1), (0x03A3, 0x03A9), (0x03B1, 0x03C1), (0x03C3, 0x03C9),
    // Cyrillic.
    (0x0401, 0x0401), (0x0410, 0x044F), (0x0451, 0x0451),
    // General punctuation, super/subscripts, currency.
    (0x2010, 0x2010), (0x2013, 0x2016), (0x2018, 0x2019), (0x201C, 0x201D), (0x2020, 0x2022),
    (0x2024, 0x2027), (0x2030, 0x2030), (0x2032, 0x2033), (0x2035, 0x2035), (0x203B, 0x203B),
    (0x203E, 0x203E), (0x2074, 0x2074), (0x207F, 0x207F), (0x2081, 0x2084), (0x20AC, 0x20AC),
    // Letterlike symbols, number forms and arrows.
    (0x2103, 0x2103), (0x2105, 0x2105), (0x2109, 0x2109), (0x2113, 0x2113), (0x2116, 0x2116),
    (0x2121, 0x2122), (0x2126, 0x2126), (0x212B, 0x212B), (0x2153, 0x2154), (0x215B, 0x215E),
    (0x2160, 0x216B), (0x2170, 0x2179), (0x2189, 0x2189), (0x2190, 0x2199), (0x21B8, 0x21B9),
    (0x21D2, 0x21D2), (0x21D4, 0x21D4), (0x21E7, 0x21E7),
    // Mathematical operators and technical.
    (0x2200, 0x2200), (0x2202, 0x2203), (0x2207, 0x2208), (0x220B, 0x220B), (0x220F, 0x220F),
    (0x2211, 0x2211), (0x2215, 0x2215), (0x221A, 0x221A), (0x221D, 0x2220), (0x2223, 0x2223),
    (0x2225, 0x2225), (0x2227, 0x222C), (0x222E, 0x222E), (0x2234, 0x2237), (0x223C, 0x223D),
    (0x2248, 0x2248), (0x224C, 0x224C), (0x2252, 0x2252), (0x2260, 0x2261), (0x2264, 0x2267),
    (0x226A, 0x226B), (0x226E, 0x226F), (0x2282, 0x2283), (0x2286, 0x2287), (0x2295, 0x2295),
    (0x2299, 0x2299), (0x22A5, 0x22A5), (0x22BF, 0x22BF), (0x2312, 0x2312),
    // Enclosed alphanumerics, box drawing, blocks and shapes.
    (0x2460, 0x24E9), (0x24EB, 0x254B), (0x2550, 0x2573), (0x2580, 0x258F), (0x2592, 0x2595),
    (0x25A0, 0x25A1), (0x25A3, 0x25A9), (0x25B2, 0x25B3), (0x25B6, 0x25B7), (0x25BC, 0x25BD),
    (0x25C0, 0x25C1), (0x25C6, 0x25C8), (0x25CB, 0x25CB), (0x25CE, 0x25D1), (0x25E2, 0x25E5),
    (0x25EF, 0x25EF),
    // Miscellaneous symbols and dingbats.
    (0x2605, 0x2606), (0x2609, 0x2609), (0x260E, 0x260F), (0x261C, 0x261C), (0x261E, 0x261E),
    (0x2640, 0x2640), (0x2642, 0x2642), (0x2660, 0x2661), (0x2663, 0x2665), (0x2667, 0x266A),
    (0x266C, 0x266D), (0x266F, 0x266F), (0x269E, 0x269F), (0x26BF, 0x26BF), (0x26C6, 0x26CD),
    (0x26CF, 0x26D3), (0x26D5, 0x26E1), (0x26E3, 0x26E3), (0x26E8, 0x26E9), (0x26EB, 0x26F1),
    (0x26F4, 0x26F4), (0x26F6, 0x26F9), (0x26FB, 0x26FC), (0x26FE, 0x26FF), (0x273D, 0x273D),
    (0x2776, 0x277F),
    // Heavy circled symbols and circled numbers on black squares.
    (0x2B56, 0x2B59), (0x3248, 0x324F),
    // Private use, variation selectors, replacement character.
    (0xE000, 0xF8FF), (0xFE00, 0xFE0F), (0xFFFD, 0xFFFD),
    // Enclosed alphanumeric supplement.
    (0x1F100, 0x1F10A), (0x1F110, 0x1F12D), (0x1F130, 0x1F169), (0x1F170, 0x1F18D),
    (0x1F18F, 0x1F190), (0x1F19B, 0x1F1AC),
    // Variation selectors supplement and supplementary private use.
    (0xE0100, 0xE01EF), (0xF0000, 0xFFFFD), (0x100000, 0x10FFFD),
];

/// Width category of a codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthClass {
    /// Control codes and combining/non-spacing marks.
    Zero,
    /// One column.
    Narrow,
    /// East Asian Wide and Fullwidth; two columns.
    Wide,
    /// East Asian Ambiguous; one or two columns depending on policy.
    Ambiguous,
}

impl WidthClass {
    /// Columns occupied under `policy`.
    #[inline]
    #[must_use]
    pub const fn columns(self, policy: AmbiguousWidth) -> usize {
        match self {
            Self::Zero => 0,
            Self::Narrow => 1,
            Self::Wide => 2,
            Self::Ambiguous => match policy {
                AmbiguousWidth::Narrow => 1,
                AmbiguousWidth::Wide => 2,
            },
        }
    }
}

fn in_ranges(ranges: &[(u32, u32)], cp: u32) -> bool {
    ranges
        .binary_search_by(|&(low, high)| {
            if high < cp {
                Ordering::Less
            } else if low > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

/// Classify a codepoint.
///
/// Unpaired surrogates and other values that are not scalar values are
/// [`WidthClass::Narrow`]; they still occupy a cell when rendered.
#[must_use]
pub fn classify(cp: u32) -> WidthClass {
    if (0x20..0x7F).contains(&cp) {
        return WidthClass::Narrow;
    }
    if in_ranges(ZERO_WIDTH, cp) {
        return WidthClass::Zero;
    }
    let Some(ch) = char::from_u32(cp) else {
        return WidthClass::Narrow;
    };
    match ch.width() {
        None | Some(0) => WidthClass::Zero,
        // `width_cjk` keeps Greek and Cyrillic narrow; the table does not.
        Some(1) if in_ranges(AMBIGUOUS, cp) || ch.width_cjk() == Some(2) => {
            WidthClass::Ambiguous
        }
        Some(1) => WidthClass::Narrow,
        // A few signs measure three or more columns; a cell holds at most two.
        Some(_) => WidthClass::Wide,
    }
}

/// Rendering policy for East Asian Ambiguous codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmbiguousWidth {
    /// Ambiguous glyphs occupy one column.
    #[default]
    Narrow,
    /// Ambiguous glyphs occupy two columns, as on legacy CJK terminals.
    Wide,
}

impl AmbiguousWidth {
    /// Parse a configuration value.
    ///
    /// Accepts `narrow`/`1` and `wide`/`2` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "narrow" | "single" | "1" => Some(Self::Narrow),
            "wide" | "double" | "2" => Some(Self::Wide),
            _ => None,
        }
    }

    /// Canonical configuration value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Wide => "wide",
        }
    }

    /// Resolve the policy from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Resolve the policy using a custom environment lookup (for tests).
    ///
    /// Sources, first match wins: [`ENV_CJK_WIDTH`], [`ENV_AMBIGUOUS_WIDTH`],
    /// then a CJK language in `LC_ALL`/`LC_CTYPE`/`LANG`. Unparseable values
    /// are skipped.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(ENV_CJK_WIDTH) {
            match parse_bool(&value) {
                Some(wide) => {
                    let policy = if wide { Self::Wide } else { Self::Narrow };
                    crate::debug!(source = ENV_CJK_WIDTH, policy = policy.as_str());
                    return policy;
                }
                None => {
                    crate::warn!(value = %value, "ignoring unparseable {}", ENV_CJK_WIDTH);
                }
            }
        }

        if let Some(value) = get_env(ENV_AMBIGUOUS_WIDTH) {
            match Self::parse(&value) {
                Some(policy) => {
                    crate::debug!(source = ENV_AMBIGUOUS_WIDTH, policy = policy.as_str());
                    return policy;
                }
                None => {
                    crate::warn!(value = %value, "ignoring unparseable {}", ENV_AMBIGUOUS_WIDTH);
                }
            }
        }

        // POSIX precedence: the first locale variable that is set decides.
        if let Some(locale) = LOCALE_VARS
            .iter()
            .filter_map(|key| get_env(key))
            .find(|value| !value.is_empty())
            && is_cjk_locale(&locale)
        {
            crate::debug!(source = "locale", locale = %locale, policy = "wide");
            return Self::Wide;
        }

        Self::Narrow
    }

    /// Columns occupied by `cp`.
    #[inline]
    #[must_use]
    pub fn char_width(self, cp: u32) -> usize {
        classify(cp).columns(self)
    }

    /// Sum of [`char_width`](Self::char_width) over the codepoints of `text`.
    #[must_use]
    pub fn str_width<T: CodeUnits + ?Sized>(self, text: &T) -> usize {
        code_points(text).map(|cp| self.char_width(cp)).sum()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `ja_JP.UTF-8`, `zh-TW`, `ko` and so on.
fn is_cjk_locale(locale: &str) -> bool {
    let language = locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    CJK_LANGUAGES.contains(&language.as_str())
}

/// Columns occupied by `cp`, with ambiguous glyphs narrow.
#[inline]
#[must_use]
pub fn char_width(cp: u32) -> usize {
    AmbiguousWidth::Narrow.char_width(cp)
}

/// Columns occupied by `cp`, with ambiguous glyphs wide.
#[inline]
#[must_use]
pub fn char_width_regard_ambiguous(cp: u32) -> usize {
    AmbiguousWidth::Wide.char_width(cp)
}

/// Display width of `text` in columns, with ambiguous glyphs narrow.
#[must_use]
pub fn str_width<T: CodeUnits + ?Sized>(text: &T) -> usize {
    AmbiguousWidth::Narrow.str_width(text)
}
