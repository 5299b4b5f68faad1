#![forbid(unsafe_code)]

//! Column-bounded slicing.
//!
//! Text is laid out on a grid starting at column 0; a codepoint at column
//! `c` with width `w` occupies `[c, c + w)`. Slicing selects by columns, not
//! by characters:
//!
//! 1. A `start` that falls strictly inside a codepoint's span snaps back to
//!    that codepoint's first column.
//! 2. A codepoint is kept iff its whole span lies within
//!    `[effective_start, end)`.
//!
//! The kept codepoints are always contiguous, so the result borrows from the
//! input. A wide character straddling either boundary is never split.
//!
//! # Example
//! ```
//! use termtext::{substr, substring};
//!
//! let text = "\u{4E2D}\u{6587}\u{5B57}\u{4E32}";
//! assert_eq!(substr(text, 0, Some(1)), "");
//! assert_eq!(substr(text, 1, None), text);
//! assert_eq!(substring(text, 3, Some(7)), "\u{6587}\u{5B57}");
//! ```

use crate::code_point::{CodeUnits, code_points};
use crate::width::AmbiguousWidth;

impl AmbiguousWidth {
    /// Up to `length` columns of `text` beginning at column `start`.
    ///
    /// With `length` of `None` the slice runs to the end of the text.
    #[must_use]
    pub fn substr<'a, T: CodeUnits + ?Sized>(
        self,
        text: &'a T,
        start: usize,
        length: Option<usize>,
    ) -> &'a T {
        let end = length.map_or(usize::MAX, |length| start.saturating_add(length));
        self.slice_columns(text, start, end)
    }

    /// Columns `[start, end)` of `text`.
    ///
    /// With `end` of `None` the slice runs to the end of the text. Reversed
    /// bounds are swapped.
    #[must_use]
    pub fn substring<'a, T: CodeUnits + ?Sized>(
        self,
        text: &'a T,
        start: usize,
        end: Option<usize>,
    ) -> &'a T {
        let (start, end) = match end {
            Some(end) if end < start => (end, start),
            Some(end) => (start, end),
            None => (start, usize::MAX),
        };
        self.slice_columns(text, start, end)
    }

    /// First column of the codepoint whose span contains `start`.
    ///
    /// `None` when `start` lies at or past the total width, including any
    /// start into text made only of zero-width codepoints.
    fn resolve_start<T: CodeUnits + ?Sized>(self, text: &T, start: usize) -> Option<usize> {
        let mut column = 0;
        for cp in code_points(text) {
            let width = self.char_width(cp);
            if start < column + width {
                return Some(column);
            }
            column += width;
        }
        None
    }

    fn slice_columns<'a, T: CodeUnits + ?Sized>(
        self,
        text: &'a T,
        start: usize,
        end: usize,
    ) -> &'a T {
        let Some(start) = self.resolve_start(text, start) else {
            return text.slice_units(0..0);
        };

        let mut column = 0;
        let mut first = None;
        let mut last = 0;
        let mut iter = code_points(text);
        loop {
            let offset = iter.offset();
            let Some(cp) = iter.next() else {
                break;
            };
            let width = self.char_width(cp);
            if column >= start {
                // Span ends never decrease, so nothing after this fits either.
                if column + width > end {
                    break;
                }
                first.get_or_insert(offset);
                last = iter.offset();
            }
            column += width;
        }

        match first {
            Some(first) => text.slice_units(first..last),
            None => text.slice_units(0..0),
        }
    }
}

/// Up to `length` columns of `text` beginning at column `start`, with
/// ambiguous glyphs narrow.
///
/// A `start` inside a wide character snaps back to that character; a wide
/// character that does not fit before the end bound is dropped.
#[must_use]
pub fn substr<T: CodeUnits + ?Sized>(text: &T, start: usize, length: Option<usize>) -> &T {
    AmbiguousWidth::Narrow.substr(text, start, length)
}

/// Columns `[start, end)` of `text`, with ambiguous glyphs narrow.
#[must_use]
pub fn substring<T: CodeUnits + ?Sized>(text: &T, start: usize, end: Option<usize>) -> &T {
    AmbiguousWidth::Narrow.substring(text, start, end)
}
