//! Tracing event tests.
//!
//! Run with:
//!   cargo test -p termtext --features tracing --test tracing_events

#![cfg(feature = "tracing")]

use termtext::{AmbiguousWidth, ENV_CJK_WIDTH, Utf8Decoder, decode_utf8};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn replacement_emits_trace_event() {
    assert_eq!(decode_utf8(b"a\x80b"), "a\u{FFFD}b");
    assert!(logs_contain("invalid UTF-8 sequence replaced"));
}

#[traced_test]
#[test]
fn interrupted_sequence_emits_trace_event() {
    assert_eq!(decode_utf8(b"\xE2x"), "\u{FFFD}x");
    assert!(logs_contain("truncated UTF-8 sequence replaced"));
}

#[traced_test]
#[test]
fn finish_with_pending_sequence_emits_debug_event() {
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(b"\xF0\x9F"), "");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert!(logs_contain("flushing truncated UTF-8 sequence"));
}

#[traced_test]
#[test]
fn clean_input_emits_nothing() {
    assert_eq!(decode_utf8("\u{4E2D}\u{6587}".as_bytes()), "\u{4E2D}\u{6587}");
    assert!(!logs_contain("UTF-8 sequence"));
}

#[traced_test]
#[test]
fn invalid_env_value_is_warned() {
    let policy = AmbiguousWidth::from_env_with(|key| {
        (key == ENV_CJK_WIDTH).then(|| "sometimes".to_string())
    });
    assert_eq!(policy, AmbiguousWidth::Narrow);
    assert!(logs_contain("ignoring unparseable"));
}
