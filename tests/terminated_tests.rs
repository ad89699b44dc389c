// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Terminated string and line tests.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use charwise::encoding::lookup;
use charwise::io::{ByteSource, ReaderSource, SliceSource};
use charwise::string::{
    line, linux_line, terminated, terminated_from_encoding, windows_line, TerminatedOptions,
};
use charwise::{CharwiseError, Context, Param};

fn lf_line(require: bool) -> charwise::CharString {
    terminated_from_encoding("ascii", TerminatedOptions::new().require(require))
        .expect("ascii registered")
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_hello_with_terminator() {
    assert_eq!(lf_line(false).parse_bytes(b"hello\n").unwrap(), "hello");
}

#[test]
fn test_hello_without_terminator() {
    assert_eq!(lf_line(false).parse_bytes(b"hello").unwrap(), "hello");
}

#[test]
fn test_required_terminator_missing() {
    let err = lf_line(true).parse_bytes(b"hello").unwrap_err();
    assert_eq!(err, CharwiseError::underrun(1, 0, 5));
}

#[test]
fn test_decoding_error_is_never_a_stop() {
    let err = lf_line(false).parse_bytes(b"ab\xFFcd\n").unwrap_err();
    assert!(matches!(err, CharwiseError::Decoding { .. }));
}

#[test]
fn test_require_from_context() {
    let field = terminated_from_encoding(
        "ascii",
        TerminatedOptions::new().require(Param::field("strict")),
    )
    .unwrap();
    let strict = Context::new().with("strict", true);
    let lenient = Context::new().with("strict", false);

    assert!(field
        .parse(&mut SliceSource::new(b"tail"), &strict, "t")
        .unwrap_err()
        .is_underrun());
    assert_eq!(
        field
            .parse(&mut SliceSource::new(b"tail"), &lenient, "t")
            .unwrap(),
        "tail"
    );
}

#[test]
fn test_options_resolved_before_reading() {
    let field = terminated_from_encoding(
        "ascii",
        TerminatedOptions::new().require(Param::field("strict")),
    )
    .unwrap();
    let mut src = SliceSource::new(b"a\n");
    let err = field.parse(&mut src, &Context::new(), "t").unwrap_err();
    assert_eq!(err, CharwiseError::context_missing("strict"));
    assert_eq!(src.rest(), b"a\n");
}

#[test]
fn test_consume_from_context() {
    let field = terminated_from_encoding(
        "ascii",
        TerminatedOptions::new().consume(Param::field("strip")),
    )
    .unwrap();
    let keep = Context::new().with("strip", false);
    assert_eq!(
        field.parse(&mut SliceSource::new(b"x\n"), &keep, "t").unwrap(),
        "x\n"
    );
}

#[test]
fn test_reads_a_stream_of_lines() {
    let field = linux_line(lookup("utf-8").unwrap(), true, false);
    let mut src = SliceSource::new("α\nβγ\n\nδ".as_bytes());
    let ctx = Context::new();
    let mut lines = Vec::new();
    loop {
        match field.parse(&mut src, &ctx, "line") {
            Ok(l) => lines.push(l),
            Err(CharwiseError::EmptyMatch { .. }) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(lines, vec!["α", "βγ", "", "δ"]);
}

#[test]
fn test_windows_line_keeps_lone_lf() {
    let field = windows_line(lookup("ascii").unwrap(), true, false);
    assert_eq!(field.parse_bytes(b"a\nb\r\nc").unwrap(), "a\nb");
}

#[test]
fn test_utf32_terminator() {
    let field = terminated(
        lookup("utf-32-be").unwrap(),
        TerminatedOptions::new().term("\0"),
    );
    let data = [0, 0, 0, b'o', 0, 0, 0, b'k', 0, 0, 0, 0, 0, 0, 0, b'z'];
    let mut src = SliceSource::new(&data);
    assert_eq!(field.parse(&mut src, &Context::new(), "t").unwrap(), "ok");
    assert_eq!(src.rest(), &[0, 0, 0, b'z']);
}

// ============================================================================
// Line Alternation
// ============================================================================

#[test]
fn test_line_first_success_not_longest() {
    // with require=false the CR LF form always succeeds, even without CR LF
    let field = line(lookup("ascii").unwrap(), true, false);
    assert_eq!(field.parse_bytes(b"a\nb").unwrap(), "a\nb");
}

#[test]
fn test_line_strict_falls_back_to_lf() {
    let field = line(lookup("ascii").unwrap(), true, true);
    let mut src = SliceSource::new(b"a\nb\n");
    let ctx = Context::new();
    assert_eq!(field.parse(&mut src, &ctx, "t").unwrap(), "a");
    assert_eq!(field.parse(&mut src, &ctx, "t").unwrap(), "b");
    assert!(src.is_at_end());
}

#[test]
fn test_line_strict_with_neither_terminator() {
    let field = line(lookup("ascii").unwrap(), true, true);
    assert!(field.parse_bytes(b"abc").unwrap_err().is_underrun());
}

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_build_reappends_terminator_regardless_of_consume() {
    for consume in [true, false] {
        let field = terminated_from_encoding(
            "ascii",
            TerminatedOptions::line("\r\n").consume(consume),
        )
        .unwrap();
        let parsed = field.parse_bytes(b"abc\r\n").unwrap();
        let rebuilt = field.build_bytes(&parsed).unwrap();
        if consume {
            assert_eq!(rebuilt, b"abc\r\n");
        } else {
            assert_eq!(rebuilt, b"abc\r\n\r\n");
        }
    }
}

#[test]
fn test_build_rejects_unencodable() {
    let field = lf_line(true);
    let mut out = Vec::new();
    let err = field
        .build("naïve", &mut out, &Context::new(), "t")
        .unwrap_err();
    assert!(matches!(err, CharwiseError::Encoding { ch: 'ï', .. }));
    assert!(out.is_empty());
}

#[test]
fn test_line_over_reader_keeps_unparsed_bytes() {
    let field = line(lookup("utf-8").unwrap(), true, true);
    let mut src = ReaderSource::new(&b"x\n\xE2\x82"[..]);
    assert_eq!(field.parse(&mut src, &Context::new(), "t").unwrap(), "x");
    assert_eq!(src.position(), 2);
    assert_eq!(src.read_bytes(2).unwrap(), b"\xE2\x82");
}

#[test]
fn test_line_agrees_across_source_kinds() {
    let field = line(lookup("ascii").unwrap(), true, true);
    let data = b"one\r\ntwo\n";
    let ctx = Context::new();
    let mut slice = SliceSource::new(data);
    let mut reader = ReaderSource::new(&data[..]);
    for expected in ["one", "two"] {
        assert_eq!(field.parse(&mut slice, &ctx, "t").unwrap(), expected);
        assert_eq!(field.parse(&mut reader, &ctx, "t").unwrap(), expected);
        assert_eq!(reader.position(), slice.position());
    }
}

// ============================================================================
// Shared Specifications
// ============================================================================

#[test]
fn test_shared_spec_is_deterministic_across_threads() {
    let field = Arc::new(linux_line(lookup("utf-8").unwrap(), true, false));
    let data: Arc<Vec<u8>> = Arc::new("ligne une\nligne deux\nfin".as_bytes().to_vec());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let field = Arc::clone(&field);
            let data = Arc::clone(&data);
            thread::spawn(move || {
                let mut src = SliceSource::new(&data);
                let ctx = Context::new();
                (0..3)
                    .map(|_| field.parse(&mut src, &ctx, "t").unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            vec!["ligne une", "ligne deux", "fin"]
        );
    }
}

#[test]
fn test_reparse_after_failure_is_clean() {
    let field = lf_line(true);
    assert!(field.parse_bytes(b"unterminated").is_err());
    assert_eq!(field.parse_bytes(b"ok\n").unwrap(), "ok");
}

proptest! {
    #[test]
    fn prop_build_then_parse_round_trips(text in "[^\n]{0,40}") {
        let field = linux_line(lookup("utf-8").unwrap(), true, true);
        let bytes = field.build_bytes(&text).unwrap();
        prop_assert!(bytes.ends_with(b"\n"));
        prop_assert_eq!(field.parse_bytes(&bytes).unwrap(), text);
    }

    #[test]
    fn prop_parse_twice_is_identical(data in proptest::collection::vec(0u8..0x80, 1..64)) {
        let field = lf_line(false);
        let first = field.parse_bytes(&data);
        let second = field.parse_bytes(&data);
        prop_assert_eq!(first, second);
    }
}
