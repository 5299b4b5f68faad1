#![forbid(unsafe_code)]

//! UTF-8 wire codec.
//!
//! Text travels to and from the host as UTF-8 byte strings (`&[u8]`), which
//! the type system keeps apart from native text (`&str`, `&[u16]`). This
//! module provides:
//!
//! - [`encode_utf8`] - native text to bytes. Never fails.
//! - [`decode_utf8`] - bytes to text in one shot. Never fails.
//! - [`Utf8Decoder`] - streaming decode where input may be split at any byte
//!   offset without changing the output.
//!
//! Both decoders run the same byte state machine. Malformed input is
//! recovered locally: every maximal invalid subsequence becomes exactly one
//! U+FFFD, and a byte that interrupts a multi-byte sequence is re-examined as
//! the start of a new one.
//!
//! # Example
//! ```
//! use termtext::{Utf8Decoder, decode_utf8, encode_utf8};
//!
//! let bytes = encode_utf8("ab\u{3B3}\u{1D11E}");
//! assert_eq!(decode_utf8(&bytes), "ab\u{3B3}\u{1D11E}");
//!
//! let mut decoder = Utf8Decoder::new();
//! let mut out = decoder.decode(&bytes[..3]);
//! out.push_str(&decoder.decode(&bytes[3..]));
//! assert_eq!(out, "ab\u{3B3}\u{1D11E}");
//! ```

use crate::code_point::{CodeUnits, code_points};

/// The replacement character substituted for malformed input.
pub const REPLACEMENT_CHARACTER: char = char::REPLACEMENT_CHARACTER;

/// Outcome of feeding one byte to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// A complete codepoint was decoded.
    Emit(char),
    /// The byte was consumed into a sequence that is still in progress.
    Pending,
    /// The byte completed or began an invalid sequence.
    Replace,
    /// The in-progress sequence was abandoned; the byte was not consumed and
    /// must be fed again as the start of a new sequence.
    ReplaceAndRetry,
}

/// Partial multi-byte sequence state.
///
/// `bytes_left == 0` means no sequence is in progress; the other fields are
/// then meaningless and kept zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DecoderState {
    /// Bits accumulated so far.
    code_point: u32,
    /// Continuation bytes still expected.
    bytes_left: u8,
    /// Smallest value this sequence length may encode without being overlong.
    lower_bound: u32,
}

impl DecoderState {
    #[inline]
    fn is_pending(&self) -> bool {
        self.bytes_left > 0
    }

    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the state machine by one byte.
    fn advance(&mut self, byte: u8) -> Step {
        if !self.is_pending() {
            return self.start(byte);
        }

        if !matches!(byte, 0x80..=0xBF) {
            self.reset();
            return Step::ReplaceAndRetry;
        }

        self.code_point = (self.code_point << 6) | u32::from(byte & 0x3F);
        self.bytes_left -= 1;
        if self.is_pending() {
            return Step::Pending;
        }

        let code_point = self.code_point;
        let lower_bound = self.lower_bound;
        self.reset();
        if code_point < lower_bound {
            // Overlong form.
            return Step::Replace;
        }
        // Rejects surrogates and values beyond U+10FFFF.
        char::from_u32(code_point).map_or(Step::Replace, Step::Emit)
    }

    fn start(&mut self, byte: u8) -> Step {
        let (bits, bytes_left, lower_bound) = match byte {
            0x00..=0x7F => return Step::Emit(char::from(byte)),
            // Bare continuation.
            0x80..=0xBF => return Step::Replace,
            // 0xC0 and 0xC1 always produce an overlong value; the whole
            // attempted sequence is rejected once it completes.
            0xC0..=0xDF => (byte & 0x1F, 1, 0x80),
            0xE0..=0xEF => (byte & 0x0F, 2, 0x800),
            0xF0..=0xF4 => (byte & 0x07, 3, 0x1_0000),
            // Could only begin a value beyond U+10FFFF.
            0xF5..=0xFF => return Step::Replace,
        };
        *self = Self {
            code_point: u32::from(bits),
            bytes_left,
            lower_bound,
        };
        Step::Pending
    }

    /// Run `bytes` through the state machine, appending decoded text to `out`.
    fn run(&mut self, bytes: &[u8], out: &mut String) {
        for &byte in bytes {
            loop {
                match self.advance(byte) {
                    Step::Emit(ch) => out.push(ch),
                    Step::Pending => {}
                    Step::Replace => {
                        crate::trace!(byte, "invalid UTF-8 sequence replaced");
                        out.push(REPLACEMENT_CHARACTER);
                    }
                    Step::ReplaceAndRetry => {
                        crate::trace!(byte, "truncated UTF-8 sequence replaced");
                        out.push(REPLACEMENT_CHARACTER);
                        continue;
                    }
                }
                break;
            }
        }
    }
}

/// Streaming UTF-8 decoder.
///
/// Holds a partial multi-byte sequence across [`decode`](Self::decode) calls
/// so that input may be split at arbitrary byte offsets. A sequence that is
/// still incomplete when a chunk ends contributes nothing until a later byte
/// resolves it. Call [`finish`](Self::finish) at end of input to resolve a
/// sequence that will never complete.
///
/// Each decoder owns its state exclusively; decode concurrent streams with
/// separate instances.
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    state: DecoderState,
}

impl Utf8Decoder {
    /// Create a decoder with no sequence in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning the text it completes.
    #[must_use]
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut out = String::with_capacity(chunk.len());
        self.decode_into(chunk, &mut out);
        out
    }

    /// Decode a chunk, appending the text it completes to `out`.
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        self.state.run(chunk, out);
    }

    /// Whether a partial multi-byte sequence is being held.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Signal end of input.
    ///
    /// A pending partial sequence is truncated and resolves to one U+FFFD.
    /// The decoder is left empty and may be reused for a new stream.
    #[must_use]
    pub fn finish(&mut self) -> String {
        if !self.state.is_pending() {
            return String::new();
        }
        crate::debug!(
            bytes_left = self.state.bytes_left,
            "flushing truncated UTF-8 sequence at end of input"
        );
        self.state.reset();
        REPLACEMENT_CHARACTER.to_string()
    }

    /// Drop any pending partial sequence without emitting anything.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

/// Encode native text as a UTF-8 byte string.
///
/// Unpaired UTF-16 surrogates have no UTF-8 form and encode as U+FFFD.
#[must_use]
pub fn encode_utf8<T: CodeUnits + ?Sized>(text: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.unit_len());
    encode_utf8_into(text, &mut out);
    out
}

/// Encode native text as UTF-8, appending to `out`.
pub fn encode_utf8_into<T: CodeUnits + ?Sized>(text: &T, out: &mut Vec<u8>) {
    let mut buf = [0_u8; 4];
    for cp in code_points(text) {
        let ch = char::from_u32(cp).unwrap_or(REPLACEMENT_CHARACTER);
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
}

/// Decode a complete UTF-8 byte string.
///
/// Equivalent to feeding `bytes` to a fresh [`Utf8Decoder`] and then calling
/// [`Utf8Decoder::finish`], so a sequence truncated by the end of input
/// decodes to U+FFFD.
#[must_use]
pub fn decode_utf8(bytes: &[u8]) -> String {
    let mut decoder = Utf8Decoder::new();
    let mut out = String::with_capacity(bytes.len());
    decoder.decode_into(bytes, &mut out);
    out.push_str(&decoder.finish());
    out
}

/// One-shot UTF-8 codec.
///
/// A stateless handle for hosts that prefer an object to free functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Codec;

impl Utf8Codec {
    /// See [`encode_utf8`].
    #[must_use]
    pub fn encode<T: CodeUnits + ?Sized>(self, text: &T) -> Vec<u8> {
        encode_utf8(text)
    }

    /// See [`decode_utf8`].
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        decode_utf8(bytes)
    }
}
