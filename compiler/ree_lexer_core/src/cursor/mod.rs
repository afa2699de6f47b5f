//! UTF-8 rune cursor over a [`StreamBuffer`].
//!
//! The cursor always holds one decoded scalar value (`current`). Advancing
//! moves the column past the previous scalar's encoded width (or to the
//! start of the next line after a `\n`), then decodes the next one.
//!
//! ASCII bytes take a one-byte fast path. Anything else (including the
//! [`SENTINEL`](crate::SENTINEL) at `fill`) goes through the slow path, which
//! refills the buffer until a full sequence is available and decodes it.
//!
//! # Recovery
//!
//! Bad input never stops the cursor. Each problem is recorded as a
//! [`DecodeIssue`] and the offending bytes are skipped:
//!
//! - a NUL byte
//! - an invalid or truncated UTF-8 sequence (skipped one byte at a time)
//! - a byte-order mark anywhere but the very start of input (a leading BOM is
//!   skipped silently)
//! - a source failure, reported once when the buffered data runs out

use std::fmt;
use std::io::Read;

use crate::stream_buffer::{BufferConfig, SourceError, StreamBuffer, UTF8_MAX};

/// Byte-order mark as a scalar value.
const BOM: char = '\u{FEFF}';

/// 0-based source position. `column` counts bytes from the start of the line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Renders 1-based `line:column`, the way editors count.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Encoding or source problem found while decoding.
#[derive(Debug)]
pub struct DecodeIssue {
    /// Where the offending bytes start.
    pub position: Position,
    pub kind: DecodeIssueKind,
}

/// What went wrong while decoding.
#[derive(Debug)]
pub enum DecodeIssueKind {
    /// U+0000 in the input.
    NulByte,
    /// A byte that does not start a valid UTF-8 sequence here.
    InvalidUtf8 { byte: u8 },
    /// U+FEFF after the start of input.
    MisplacedBom,
    /// The byte source failed before end-of-stream.
    Source(SourceError),
}

/// Scalar-value cursor with line/column tracking.
pub struct RuneCursor<R> {
    buffer: StreamBuffer<R>,
    /// Decoded scalar at the read point; `None` at end-of-input.
    current: Option<char>,
    /// Encoded width of `current` (0 at end-of-input).
    width: usize,
    line: u32,
    column: u32,
    issues: Vec<DecodeIssue>,
}

impl<R: Read> RuneCursor<R> {
    /// Bind `source` and decode the first scalar value.
    pub fn new(source: R, config: BufferConfig) -> Self {
        let mut cursor = RuneCursor {
            buffer: StreamBuffer::new(source, config),
            current: None,
            width: 0,
            line: 0,
            column: 0,
            issues: Vec::new(),
        };
        cursor.decode_next();
        cursor
    }

    /// Move to the next scalar value. A no-op at end-of-input.
    pub fn advance(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.decode_next();
    }

    fn decode_next(&mut self) {
        loop {
            self.column += self.width_u32();
            if self.current == Some('\n') {
                self.line += 1;
                self.column = 0;
            }

            let read = self.buffer.read_pos();
            let lead = self.buffer.byte_at(read);
            if lead.is_ascii() {
                self.buffer.consume(1);
                self.width = 1;
                self.current = Some(char::from(lead));
                if lead == 0 {
                    self.record(DecodeIssueKind::NulByte);
                    continue;
                }
                return;
            }

            while !self.has_full_rune() && self.buffer.is_readable() {
                self.buffer.refill();
            }

            let pending = self.buffer.pending();
            let Some(&lead) = pending.first() else {
                self.finish();
                return;
            };

            let needed = sequence_len(lead);
            let decoded = pending
                .get(..needed)
                .and_then(|bytes| std::str::from_utf8(bytes).ok())
                .and_then(|s| s.chars().next());

            match decoded {
                Some(ch) => {
                    self.buffer.consume(needed);
                    self.width = needed;
                    self.current = Some(ch);
                    if ch == BOM {
                        if self.line > 0 || self.column > 0 {
                            self.record(DecodeIssueKind::MisplacedBom);
                        }
                        continue;
                    }
                    return;
                }
                None => {
                    self.buffer.consume(1);
                    self.width = 1;
                    self.current = Some(char::REPLACEMENT_CHARACTER);
                    self.record(DecodeIssueKind::InvalidUtf8 { byte: lead });
                }
            }
        }
    }

    /// Whether the pending bytes hold a complete sequence for their lead byte.
    fn has_full_rune(&self) -> bool {
        let pending = self.buffer.pending();
        match pending.first() {
            Some(&lead) => pending.len() >= UTF8_MAX || pending.len() >= sequence_len(lead),
            None => false,
        }
    }
}

impl<R> RuneCursor<R> {
    /// Enter end-of-input, surfacing any latched source failure first.
    fn finish(&mut self) {
        if let Some(error) = self.buffer.take_failure() {
            self.record(DecodeIssueKind::Source(error));
        }
        self.current = None;
        self.width = 0;
    }

    fn record(&mut self, kind: DecodeIssueKind) {
        self.issues.push(DecodeIssue {
            position: self.position(),
            kind,
        });
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "width is at most 4 bytes"
    )]
    fn width_u32(&self) -> u32 {
        self.width as u32
    }

    /// Scalar value at the read point, `None` at end-of-input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Whether end-of-input has been reached.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current.is_none()
    }

    /// Position of the current scalar value.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Encoded width of the current scalar value (0 at end-of-input).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer index where the current scalar value starts.
    fn rune_start(&self) -> usize {
        self.buffer.read_pos() - self.width
    }

    /// Open a lexeme segment at the current scalar value.
    pub fn begin_segment(&mut self) {
        let at = self.rune_start();
        self.buffer.begin_segment(at);
    }

    /// Close the open lexeme segment.
    pub fn end_segment(&mut self) {
        self.buffer.end_segment();
    }

    /// Raw bytes from the segment start up to (not including) the current
    /// scalar value. Empty when no segment is open.
    pub fn segment(&self) -> &[u8] {
        self.buffer.segment(self.rune_start())
    }

    /// Drain the issues recorded since the last call, oldest first.
    pub fn take_issues(&mut self) -> Vec<DecodeIssue> {
        std::mem::take(&mut self.issues)
    }

    /// Whether any issues are waiting to be taken.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// The underlying buffer, for inspection.
    pub fn buffer(&self) -> &StreamBuffer<R> {
        &self.buffer
    }
}

/// Expected UTF-8 sequence length for a lead byte.
///
/// Continuation bytes and bytes that can never lead a sequence map to 1 so
/// they decode as a single invalid byte.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests;
