//! UTF-8 codec conformance tests.
//!
//! Covers:
//! - ASCII and multi-byte round trips (str and UTF-16 input)
//! - chunked decoding split at every byte offset
//! - the malformed-sequence matrix (each bad run becomes exactly one U+FFFD)
//! - block round trips across the BMP and the astral planes

use termtext::{Utf8Decoder, decode_utf8, encode_utf8};

// =============================================================================
// Helpers
// =============================================================================

fn codepoint_label(cp: u32) -> String {
    format!("U+{cp:04X}")
}

/// All scalar values in `[start, start + size)`, skipping surrogates.
fn block_string(start: u32, size: u32) -> String {
    (start..start + size).filter_map(char::from_u32).collect()
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn round_trip_ascii() {
    for text in ["", "a", "abc"] {
        let enc = encode_utf8(text);
        assert_eq!(enc, text.as_bytes(), "ASCII encodes to itself");
        assert_eq!(decode_utf8(&enc), text, "ASCII decodes to itself");
    }
}

#[test]
fn round_trip_multibyte() {
    for text in ["\u{E1}\u{5D1}\u{E7}", "\u{4E00}\u{4E01}\u{4E02}", "\u{1D11E}\u{1D122}"] {
        let enc = encode_utf8(text);
        assert!(enc.len() > text.chars().count(), "multibyte encodes longer");
        assert_eq!(decode_utf8(&enc), text, "multibyte round trips to self");
    }
}

#[test]
fn round_trip_utf16_input() {
    let text = "ab\u{3B3}\u{3B4}\u{2200}\u{2203}\u{1D11E}\u{1D122}";
    let units: Vec<u16> = text.encode_utf16().collect();
    let enc = encode_utf8(&units[..]);
    assert_eq!(enc, text.as_bytes());
    let dec = decode_utf8(&enc);
    assert_eq!(dec.encode_utf16().collect::<Vec<_>>(), units);
}

// =============================================================================
// Streaming
// =============================================================================

#[test]
fn chunked_decoding_at_every_split() {
    let text = "ab\u{3B3}\u{3B4}\u{2200}\u{2203}\u{1D11E}\u{1D122}";
    let enc = encode_utf8(text);

    for split in 0..=enc.len() {
        let mut decoder = Utf8Decoder::new();
        let mut dec = decoder.decode(&enc[..split]);
        dec.push_str(&decoder.decode(&enc[split..]));
        assert_eq!(dec, text, "round trips when split at {split}");
        assert!(!decoder.is_pending());
    }
}

#[test]
fn byte_at_a_time_decoding() {
    let text = "\u{4E2D}\u{6587} English \u{1F600}";
    let mut decoder = Utf8Decoder::new();
    let dec: String = text.as_bytes().iter().map(|b| decoder.decode(&[*b])).collect();
    assert_eq!(dec, text);
}

#[test]
fn chunked_decoding_of_malformed_input_matches_one_shot() {
    let enc = b"x\xE2\x80y\xF0\x80\x80z\xC0\x80\xED\xA0\x80\xF4\x90\x80\x80!";
    let expected = decode_utf8(enc);

    for split in 0..=enc.len() {
        let mut decoder = Utf8Decoder::new();
        let mut dec = decoder.decode(&enc[..split]);
        dec.push_str(&decoder.decode(&enc[split..]));
        dec.push_str(&decoder.finish());
        assert_eq!(dec, expected, "split at {split}");
    }
}

#[test]
fn pending_sequence_resolved_by_finish() {
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(b"abc\xE2\x82"), "abc");
    assert_eq!(decoder.finish(), "\u{FFFD}");
}

// =============================================================================
// Malformed input
// =============================================================================

const BAD_SEQUENCES: &[(&[u8], &str)] = &[
    (b"\x80", "bare continuation"),
    (b"\xC2", "two byte starter"),
    (b"\xE2", "three byte starter"),
    (b"\xE2\x80", "two of three byte sequence"),
    (b"\xF0", "four byte starter"),
    (b"\xF0\x80", "two of four byte sequence"),
    (b"\xF0\x80\x80", "three of four byte sequence"),
    (b"\xC0", "illegal starter"),
    (b"\xC0\x80", "illegal two byte"),
    (b"\xE0\x80\x80", "illegal three byte"),
];

#[test]
fn decoding_bad_sequences() {
    let prefix = encode_utf8("abc");
    let suffix = encode_utf8("def");

    for (bad, description) in BAD_SEQUENCES {
        let mut enc = prefix.clone();
        enc.extend_from_slice(bad);
        enc.extend_from_slice(&suffix);
        assert_eq!(decode_utf8(&enc), "abc\u{FFFD}def", "decoding with {description}");
    }
}

#[test]
fn bad_sequences_at_end_of_input() {
    for (bad, description) in BAD_SEQUENCES {
        let mut enc = b"abc".to_vec();
        enc.extend_from_slice(bad);
        assert_eq!(decode_utf8(&enc), "abc\u{FFFD}", "trailing {description}");
    }
}

#[test]
fn replacement_count_per_maximal_subpart() {
    // Two truncated sequences back to back: one replacement each.
    assert_eq!(decode_utf8(b"\xE2\x80\xE2\x80a"), "\u{FFFD}\u{FFFD}a");
    // A full overlong sequence followed by a bare continuation.
    assert_eq!(decode_utf8(b"\xC0\x80\x80"), "\u{FFFD}\u{FFFD}");
}

// =============================================================================
// Block round trips
// =============================================================================

fn block_round_trip(start: u32, size: u32) {
    let text = block_string(start, size);
    let enc = encode_utf8(text.as_str());
    assert_eq!(
        decode_utf8(&enc),
        text,
        "block {} ~ {}",
        codepoint_label(start),
        codepoint_label(start + size - 1)
    );
}

fn block_range_round_trip(low: u32, high: u32, size: u32) {
    for start in (low..=high).step_by(size as usize) {
        let end = start + size - 1;
        if end < 0xD800 || 0xDFFF < start {
            block_round_trip(start, size);
        }
    }
}

#[test]
fn round_trip_bmp_blocks() {
    block_range_round_trip(0x0000, 0xFFFF, 64);
}

#[test]
fn round_trip_astral_blocks() {
    block_range_round_trip(0x1_0000, 0x10_FFFF, 4096);
}

#[test]
fn round_trip_blocks_as_utf16() {
    for start in (0x1_0000..=0x10_FFFF).step_by(0x1_0000) {
        let text = block_string(start, 256);
        let units: Vec<u16> = text.encode_utf16().collect();
        let dec = decode_utf8(&encode_utf8(&units[..]));
        assert_eq!(dec, text, "plane starting {}", codepoint_label(start));
    }
}
