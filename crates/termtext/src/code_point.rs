#![forbid(unsafe_code)]

//! Codepoint iteration over native text.
//!
//! Width measurement, slicing and encoding all walk text one Unicode
//! codepoint at a time. [`CodeUnits`] abstracts over the two native
//! representations a terminal host hands us:
//!
//! - `str`: UTF-8 code units; every step yields a scalar value.
//! - `[u16]`: UTF-16 code units. A high surrogate immediately followed by a
//!   low surrogate combines into one codepoint >= U+10000. An unpaired
//!   surrogate is yielded unchanged as its own codepoint; iteration never
//!   rejects input.
//!
//! # Example
//! ```
//! use termtext::code_points;
//!
//! let units: Vec<u16> = "a\u{1D11E}".encode_utf16().collect();
//! let cps: Vec<u32> = code_points(&units[..]).collect();
//! assert_eq!(cps, vec![0x61, 0x1D11E]);
//!
//! let lone = [0xD834_u16, 0x0062];
//! let cps: Vec<u32> = code_points(&lone[..]).collect();
//! assert_eq!(cps, vec![0xD834, 0x62]);
//! ```

use std::iter::FusedIterator;
use std::ops::Range;

const HIGH_SURROGATES: Range<u16> = 0xD800..0xDC00;
const LOW_SURROGATES: Range<u16> = 0xDC00..0xE000;

/// A native text representation that can be walked codepoint by codepoint.
///
/// Offsets and lengths are measured in the representation's own code units
/// (bytes for `str`, 16-bit units for `[u16]`).
pub trait CodeUnits {
    /// Total length in code units.
    fn unit_len(&self) -> usize;

    /// Decode the codepoint starting at `offset`.
    ///
    /// Returns the codepoint and the number of code units it occupies, or
    /// `None` at (or past) the end of the text.
    fn code_point_at(&self, offset: usize) -> Option<(u32, usize)>;

    /// Borrow the code units in `range`.
    ///
    /// `range` must lie on codepoint boundaries previously reported by
    /// [`CodeUnits::code_point_at`]; anything else yields an empty slice.
    fn slice_units(&self, range: Range<usize>) -> &Self;
}

impl CodeUnits for str {
    #[inline]
    fn unit_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn code_point_at(&self, offset: usize) -> Option<(u32, usize)> {
        let ch = self.get(offset..)?.chars().next()?;
        Some((u32::from(ch), ch.len_utf8()))
    }

    #[inline]
    fn slice_units(&self, range: Range<usize>) -> &Self {
        self.get(range).unwrap_or_default()
    }
}

impl CodeUnits for [u16] {
    #[inline]
    fn unit_len(&self) -> usize {
        self.len()
    }

    fn code_point_at(&self, offset: usize) -> Option<(u32, usize)> {
        let first = *self.get(offset)?;
        if HIGH_SURROGATES.contains(&first)
            && let Some(&second) = self.get(offset + 1)
            && LOW_SURROGATES.contains(&second)
        {
            return Some((combine_surrogates(first, second), 2));
        }
        Some((u32::from(first), 1))
    }

    #[inline]
    fn slice_units(&self, range: Range<usize>) -> &Self {
        self.get(range).unwrap_or_default()
    }
}

/// Combine a high/low surrogate pair into the astral codepoint it encodes.
#[inline]
const fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x1_0000 + (((high as u32) & 0x3FF) << 10) + ((low as u32) & 0x3FF)
}

/// Returns true for codepoints in the UTF-16 surrogate range.
#[inline]
#[must_use]
pub const fn is_surrogate(cp: u32) -> bool {
    matches!(cp, 0xD800..=0xDFFF)
}

/// Lazy forward cursor yielding one codepoint per logical character.
///
/// The cursor borrows the text and holds only an offset, so a clone resumes
/// from the same position and [`code_points`] restarts from the beginning.
#[derive(Debug)]
pub struct CodePoints<'a, T: ?Sized> {
    text: &'a T,
    offset: usize,
}

// Manual impls: a derive would require `T: Clone`, which `str` and `[u16]`
// are not.
impl<T: ?Sized> Clone for CodePoints<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for CodePoints<'_, T> {}

impl<'a, T: CodeUnits + ?Sized> CodePoints<'a, T> {
    /// Start iterating at the beginning of `text`.
    #[must_use]
    pub fn new(text: &'a T) -> Self {
        Self { text, offset: 0 }
    }

    /// Code-unit offset of the next codepoint to be yielded.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The text being iterated.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &'a T {
        self.text
    }
}

impl<T: CodeUnits + ?Sized> Iterator for CodePoints<'_, T> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let (cp, len) = self.text.code_point_at(self.offset)?;
        self.offset += len;
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.unit_len().saturating_sub(self.offset);
        // At most four UTF-8 units (or two UTF-16 units) per codepoint.
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl<T: CodeUnits + ?Sized> FusedIterator for CodePoints<'_, T> {}

/// Iterate the codepoints of `text`.
#[inline]
#[must_use]
pub fn code_points<T: CodeUnits + ?Sized>(text: &T) -> CodePoints<'_, T> {
    CodePoints::new(text)
}
