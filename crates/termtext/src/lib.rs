#![forbid(unsafe_code)]

//! Unicode text toolkit for terminal emulators.
//!
//! This crate covers the two text concerns a terminal has before anything
//! reaches the grid:
//! - [`utf8`] - the UTF-8 wire codec: [`encode_utf8`], [`decode_utf8`] and
//!   the streaming [`Utf8Decoder`], with U+FFFD recovery for malformed input
//! - [`width`] - per-codepoint display width ([`classify`], [`char_width`],
//!   [`str_width`]) under an [`AmbiguousWidth`] policy
//! - [`slice`] - column-bounded [`substr`] and [`substring`] that never split
//!   a wide character
//! - [`code_point`] - the codepoint iterator shared by all of the above,
//!   over `str` or UTF-16 `[u16]` text
//!
//! Every operation is total: malformed bytes decode to U+FFFD and
//! out-of-range columns produce empty slices.
//!
//! # Example
//! ```
//! use termtext::{Utf8Decoder, str_width, substring};
//!
//! let wire = "\u{4E2D}\u{6587} English".as_bytes();
//! let mut decoder = Utf8Decoder::new();
//! let mut text = decoder.decode(&wire[..4]);
//! text.push_str(&decoder.decode(&wire[4..]));
//! text.push_str(&decoder.finish());
//!
//! assert_eq!(str_width(text.as_str()), 12);
//! assert_eq!(substring(text.as_str(), 1, Some(5)), "\u{4E2D}\u{6587} ");
//! ```

pub mod code_point;
pub mod logging;
pub mod slice;
pub mod utf8;
pub mod width;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use code_point::{CodePoints, CodeUnits, code_points, is_surrogate};
pub use slice::{substr, substring};
pub use utf8::{
    REPLACEMENT_CHARACTER, Utf8Codec, Utf8Decoder, decode_utf8, encode_utf8, encode_utf8_into,
};
pub use width::{
    AmbiguousWidth, ENV_AMBIGUOUS_WIDTH, ENV_CJK_WIDTH, WidthClass, char_width,
    char_width_regard_ambiguous, classify, str_width,
};
