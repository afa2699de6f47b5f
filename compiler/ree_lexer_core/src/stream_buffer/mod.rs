//! Growable, sentinel-terminated byte window over a streaming source.
//!
//! The buffer holds a sliding window of the input. Three indices describe it:
//!
//! ```text
//! [ ...discardable... | retained segment | undecoded bytes | SENTINEL | free tail ]
//!                     ^                  ^                 ^
//!                     begin              read              fill
//! ```
//!
//! `begin` is only set while a lexeme segment is open. On refill, everything
//! before `begin` (or before `read` when no segment is open) is discarded and
//! the live content is shifted to the front. If the live content already takes
//! more than half of the capacity, the capacity doubles instead, bounded by
//! [`BufferConfig::max_exponent`].
//!
//! The byte at `fill` is always [`SENTINEL`]. It is a UTF-8 continuation byte,
//! so a decoder that takes an ASCII fast path on `byte < 0x80` falls into its
//! slow path exactly when it runs out of buffered data.

use std::io::{self, Read};

/// Byte written immediately after the valid data.
///
/// `0x80` can never start a UTF-8 sequence and is never ASCII.
pub const SENTINEL: u8 = 0x80;

/// Maximum encoded width of a Unicode scalar value in UTF-8.
pub(crate) const UTF8_MAX: usize = 4;

/// Smallest exponent that still leaves room for one full scalar plus sentinel.
const MIN_EXPONENT_FLOOR: u32 = 3;

/// Largest exponent accepted from configuration (1 GiB).
const MAX_EXPONENT_CEILING: u32 = 30;

/// Sizing and retry policy for a [`StreamBuffer`].
///
/// Capacities are powers of two: the buffer starts at `1 << min_exponent`
/// bytes and never grows past `1 << max_exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    /// Initial capacity exponent.
    pub min_exponent: u32,
    /// Capacity exponent cap.
    pub max_exponent: u32,
    /// Read attempts per refill before giving up with [`SourceError::NoProgress`].
    pub max_read_attempts: u32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            min_exponent: 12,
            max_exponent: 20,
            max_read_attempts: 10,
        }
    }
}

impl BufferConfig {
    /// Clamp the configuration into a usable range.
    ///
    /// `min_exponent` is raised to fit one scalar value plus the sentinel,
    /// `max_exponent` is never below `min_exponent`, and at least one read
    /// attempt is made per refill.
    #[must_use]
    pub fn normalized(self) -> Self {
        let min_exponent = self
            .min_exponent
            .clamp(MIN_EXPONENT_FLOOR, MAX_EXPONENT_CEILING);
        let max_exponent = self.max_exponent.clamp(min_exponent, MAX_EXPONENT_CEILING);
        BufferConfig {
            min_exponent,
            max_exponent,
            max_read_attempts: self.max_read_attempts.max(1),
        }
    }
}

/// Failure latched by the buffer when the source can no longer be read.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Every read attempt of a refill was interrupted without delivering data.
    #[error("no progress after {attempts} read attempts")]
    NoProgress { attempts: u32 },
    /// An open lexeme filled the buffer at its maximum capacity.
    #[error("lexeme exceeds the maximum buffer capacity of {capacity} bytes")]
    LexemeTooLong { capacity: usize },
}

/// Whether the buffer can still pull bytes from its source.
#[derive(Debug)]
pub enum SourceState {
    /// More bytes may arrive.
    Readable,
    /// The source reported end-of-stream (or a failure was already handed out).
    Exhausted,
    /// The source failed; the error has not been taken yet.
    Failed(SourceError),
}

/// Sentinel-terminated, growable window over a byte source.
pub struct StreamBuffer<R> {
    source: R,
    /// `buf[fill]` is always [`SENTINEL`]; `buf.len() == 1 << exponent`.
    buf: Vec<u8>,
    exponent: u32,
    config: BufferConfig,
    /// Start of the open lexeme segment, if any.
    begin: Option<usize>,
    /// Next byte to decode.
    read: usize,
    /// End of valid data.
    fill: usize,
    state: SourceState,
}

impl<R: Read> StreamBuffer<R> {
    /// Create an empty buffer over `source`. No bytes are read until the first
    /// [`refill`](Self::refill).
    pub fn new(source: R, config: BufferConfig) -> Self {
        let config = config.normalized();
        let mut buf = vec![0u8; 1 << config.min_exponent];
        buf[0] = SENTINEL;
        StreamBuffer {
            source,
            buf,
            exponent: config.min_exponent,
            config,
            begin: None,
            read: 0,
            fill: 0,
            state: SourceState::Readable,
        }
    }

    /// Pull more bytes from the source into the free tail.
    ///
    /// Compacts (or grows) the buffer first so that the retained segment and
    /// the undecoded bytes start at index 0. Does nothing once the source is
    /// exhausted or failed.
    pub fn refill(&mut self) {
        if !self.is_readable() {
            return;
        }

        let keep_from = self.begin.unwrap_or(self.read);
        let live = self.fill - keep_from;
        if live * 2 > self.buf.len() && self.exponent < self.config.max_exponent {
            self.exponent += 1;
            let mut grown = vec![0u8; 1 << self.exponent];
            grown[..live].copy_from_slice(&self.buf[keep_from..self.fill]);
            self.buf = grown;
            tracing::debug!(capacity = self.buf.len(), live, "grew lexer buffer");
        } else if keep_from > 0 {
            self.buf.copy_within(keep_from..self.fill, 0);
        }
        self.read -= keep_from;
        self.fill -= keep_from;
        if self.begin.is_some() {
            self.begin = Some(0);
        }

        // The last byte is reserved for the sentinel.
        let tail_end = self.buf.len() - 1;
        if self.fill >= tail_end {
            self.buf[self.fill] = SENTINEL;
            self.fail(SourceError::LexemeTooLong {
                capacity: self.buf.len(),
            });
            return;
        }

        for _ in 0..self.config.max_read_attempts {
            match self.source.read(&mut self.buf[self.fill..tail_end]) {
                Ok(0) => {
                    self.buf[self.fill] = SENTINEL;
                    self.state = SourceState::Exhausted;
                    return;
                }
                Ok(n) => {
                    self.fill += n;
                    self.buf[self.fill] = SENTINEL;
                    return;
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                    ) => {}
                Err(e) => {
                    self.buf[self.fill] = SENTINEL;
                    self.fail(SourceError::Io(e));
                    return;
                }
            }
        }

        self.buf[self.fill] = SENTINEL;
        self.fail(SourceError::NoProgress {
            attempts: self.config.max_read_attempts,
        });
    }
}

impl<R> StreamBuffer<R> {
    fn fail(&mut self, error: SourceError) {
        tracing::warn!(%error, "lexer source failed");
        self.state = SourceState::Failed(error);
    }

    /// Byte at `index`. Reading `fill` yields the sentinel.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.buf[index]
    }

    /// Undecoded bytes: `buf[read..fill]`.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.read..self.fill]
    }

    /// Mark `count` pending bytes as decoded.
    #[inline]
    pub fn consume(&mut self, count: usize) {
        debug_assert!(self.read + count <= self.fill, "consumed past fill");
        self.read += count;
    }

    /// Index of the next byte to decode.
    pub fn read_pos(&self) -> usize {
        self.read
    }

    /// Index one past the last valid byte (where the sentinel sits).
    pub fn fill_pos(&self) -> usize {
        self.fill
    }

    /// Start of the open segment, if any.
    pub fn begin_pos(&self) -> Option<usize> {
        self.begin
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Current capacity exponent.
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Full buffer contents, including sentinel and free tail.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Open a lexeme segment starting at `at`.
    ///
    /// Only one segment may be open at a time; `at` must not be past `read`.
    pub fn begin_segment(&mut self, at: usize) {
        debug_assert!(self.begin.is_none(), "lexeme segment already open");
        debug_assert!(at <= self.read, "segment cannot start past the read point");
        self.begin = Some(at);
    }

    /// Close the open segment (no-op when none is open).
    pub fn end_segment(&mut self) {
        self.begin = None;
    }

    /// Bytes of the open segment up to `end`, or an empty slice when no
    /// segment is open.
    pub fn segment(&self, end: usize) -> &[u8] {
        match self.begin {
            Some(begin) => &self.buf[begin..end],
            None => &[],
        }
    }

    /// Whether another refill may deliver bytes.
    pub fn is_readable(&self) -> bool {
        matches!(self.state, SourceState::Readable)
    }

    /// Current source state.
    pub fn state(&self) -> &SourceState {
        &self.state
    }

    /// Hand out a latched failure exactly once, leaving the buffer exhausted.
    pub fn take_failure(&mut self) -> Option<SourceError> {
        match std::mem::replace(&mut self.state, SourceState::Exhausted) {
            SourceState::Failed(error) => Some(error),
            SourceState::Readable => {
                self.state = SourceState::Readable;
                None
            }
            SourceState::Exhausted => None,
        }
    }
}
