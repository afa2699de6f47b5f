use super::*;
use pretty_assertions::assert_eq;
use std::io;

/// Reader that hands out one byte per call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Reader that serves its data once, then fails.
struct FailAfter<'a> {
    data: &'a [u8],
    served: bool,
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::other("connection reset"));
        }
        self.served = true;
        self.data.read(buf)
    }
}

fn cursor(bytes: &[u8]) -> RuneCursor<&[u8]> {
    RuneCursor::new(bytes, BufferConfig::default())
}

/// Decode everything, returning each scalar with its position.
fn runes<R: Read>(cursor: &mut RuneCursor<R>) -> Vec<(char, Position)> {
    let mut out = Vec::new();
    while let Some(ch) = cursor.current() {
        out.push((ch, cursor.position()));
        cursor.advance();
    }
    out
}

fn at(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

// === Positions ===

#[test]
fn ascii_positions() {
    let mut c = cursor(b"ab\ncd");
    assert_eq!(
        runes(&mut c),
        vec![
            ('a', at(0, 0)),
            ('b', at(0, 1)),
            ('\n', at(0, 2)),
            ('c', at(1, 0)),
            ('d', at(1, 1)),
        ]
    );
    assert!(c.is_eof());
    assert_eq!(c.position(), at(1, 2));
    assert!(!c.has_issues());
}

#[test]
fn columns_count_bytes() {
    let mut c = cursor("λx\u{1F600}y".as_bytes());
    assert_eq!(
        runes(&mut c),
        vec![
            ('λ', at(0, 0)),
            ('x', at(0, 2)),
            ('\u{1F600}', at(0, 3)),
            ('y', at(0, 7)),
        ]
    );
}

#[test]
fn position_display_is_one_based() {
    assert_eq!(at(0, 0).to_string(), "1:1");
    assert_eq!(at(4, 9).to_string(), "5:10");
}

#[test]
fn empty_source_is_eof() {
    let c = cursor(b"");
    assert!(c.is_eof());
    assert_eq!(c.current(), None);
    assert_eq!(c.width(), 0);
    assert_eq!(c.position(), at(0, 0));
}

#[test]
fn advance_at_eof_is_idempotent() {
    let mut c = cursor(b"x");
    c.advance();
    assert!(c.is_eof());
    let position = c.position();
    for _ in 0..5 {
        c.advance();
    }
    assert!(c.is_eof());
    assert_eq!(c.position(), position);
    assert!(c.take_issues().is_empty());
}

// === Streaming ===

#[test]
fn one_byte_reads_decode_multibyte_sequences() {
    let text = "(λ (x) \"\u{1F600}\")\n#\\é";
    let mut whole = cursor(text.as_bytes());
    let mut trickled = RuneCursor::new(Trickle(text.as_bytes()), BufferConfig::default());
    assert_eq!(runes(&mut trickled), runes(&mut whole));
    assert!(!trickled.has_issues());
}

#[test]
fn tiny_buffer_decodes_long_input() {
    let text = "déjà vu ".repeat(200);
    let config = BufferConfig {
        min_exponent: 3,
        max_exponent: 4,
        max_read_attempts: 10,
    };
    let mut c = RuneCursor::new(text.as_bytes(), config);
    let decoded: String = runes(&mut c).into_iter().map(|(ch, _)| ch).collect();
    assert_eq!(decoded, text);
    assert!(!c.has_issues());
}

// === Recovery ===

#[test]
fn nul_byte_is_reported_and_skipped() {
    let mut c = cursor(b"a\0b");
    assert_eq!(runes(&mut c), vec![('a', at(0, 0)), ('b', at(0, 2))]);
    let issues = c.take_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].position, at(0, 1));
    assert!(matches!(issues[0].kind, DecodeIssueKind::NulByte));
}

#[test]
fn invalid_byte_is_reported_and_skipped() {
    let mut c = cursor(&[b'a', 0xFF, b'b']);
    assert_eq!(runes(&mut c), vec![('a', at(0, 0)), ('b', at(0, 2))]);
    let issues = c.take_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].position, at(0, 1));
    assert!(matches!(
        issues[0].kind,
        DecodeIssueKind::InvalidUtf8 { byte: 0xFF }
    ));
}

#[test]
fn truncated_sequence_at_eof_is_reported() {
    let mut c = cursor(&[b'a', 0xE2, 0x82]);
    assert_eq!(runes(&mut c), vec![('a', at(0, 0))]);
    let issues = c.take_issues();
    assert_eq!(issues.len(), 2);
    assert!(matches!(
        issues[0].kind,
        DecodeIssueKind::InvalidUtf8 { byte: 0xE2 }
    ));
    assert!(matches!(
        issues[1].kind,
        DecodeIssueKind::InvalidUtf8 { byte: 0x82 }
    ));
    assert_eq!(c.position(), at(0, 3));
}

#[test]
fn leading_bom_is_skipped_silently() {
    let mut c = cursor("\u{FEFF}ab".as_bytes());
    assert_eq!(runes(&mut c), vec![('a', at(0, 3)), ('b', at(0, 4))]);
    assert!(!c.has_issues());
}

#[test]
fn misplaced_bom_is_reported() {
    let mut c = cursor("a\u{FEFF}b".as_bytes());
    assert_eq!(runes(&mut c), vec![('a', at(0, 0)), ('b', at(0, 4))]);
    let issues = c.take_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].position, at(0, 1));
    assert!(matches!(issues[0].kind, DecodeIssueKind::MisplacedBom));
}

#[test]
fn source_failure_is_reported_once_at_eof() {
    let reader = FailAfter {
        data: b"ab",
        served: false,
    };
    let mut c = RuneCursor::new(reader, BufferConfig::default());
    assert_eq!(runes(&mut c), vec![('a', at(0, 0)), ('b', at(0, 1))]);
    c.advance();
    let issues = c.take_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].position, at(0, 2));
    assert!(matches!(
        issues[0].kind,
        DecodeIssueKind::Source(SourceError::Io(_))
    ));
}

// === Segments ===

#[test]
fn segment_spans_up_to_current_rune() {
    let mut c = cursor(b"hello world");
    c.begin_segment();
    for _ in 0..5 {
        c.advance();
    }
    assert_eq!(c.segment(), b"hello");
    assert_eq!(c.current(), Some(' '));
    c.end_segment();
    assert!(c.segment().is_empty());
}

#[test]
fn segment_survives_refill_and_growth() {
    let text = "abcdefghijklmnopqrstuvwxyz";
    let config = BufferConfig {
        min_exponent: 3,
        max_exponent: 8,
        max_read_attempts: 10,
    };
    let mut c = RuneCursor::new(Trickle(text.as_bytes()), config);
    c.begin_segment();
    while !c.is_eof() {
        c.advance();
    }
    assert_eq!(c.segment(), text.as_bytes());
    assert!(c.buffer().capacity() >= 32);
}

#[test]
fn segment_at_eof_includes_trailing_multibyte() {
    let mut c = cursor("xλ".as_bytes());
    c.begin_segment();
    c.advance();
    c.advance();
    assert!(c.is_eof());
    assert_eq!(c.segment(), "xλ".as_bytes());
}

mod proptest_positions {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn chunking_does_not_change_decoding(chars in proptest::collection::vec(any::<char>(), 0..64)) {
            let text: String = chars.into_iter().collect();
            let mut whole = cursor(text.as_bytes());
            let mut trickled = RuneCursor::new(Trickle(text.as_bytes()), BufferConfig::default());
            prop_assert_eq!(runes(&mut trickled), runes(&mut whole));
        }

        #[test]
        fn positions_are_monotonic(text in "[a-zλ \n\t]{0,80}") {
            let mut c = cursor(text.as_bytes());
            let decoded = runes(&mut c);
            for pair in decoded.windows(2) {
                let (prev, prev_pos) = pair[0];
                let (_, pos) = pair[1];
                prop_assert!(pos.line >= prev_pos.line);
                if prev == '\n' {
                    prop_assert_eq!(pos, Position::new(prev_pos.line + 1, 0));
                } else {
                    prop_assert_eq!(pos.line, prev_pos.line);
                    prop_assert!(pos.column > prev_pos.column);
                }
            }
        }
    }
}
