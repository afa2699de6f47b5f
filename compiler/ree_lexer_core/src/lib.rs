//! Low-level input layer for the Ree lexer.
//!
//! Two pieces live here:
//!
//! - [`StreamBuffer`]: a growable, sentinel-terminated byte window fed by any
//!   [`std::io::Read`]. It refills on demand, compacts retained lexeme bytes to
//!   the front, and doubles its capacity (up to a cap) when a lexeme needs room.
//! - [`RuneCursor`]: decodes the buffer into Unicode scalar values one at a
//!   time, tracking 0-based line/column and recording encoding problems
//!   ([`DecodeIssue`]) instead of failing.
//!
//! Neither type knows anything about tokens. The `ree_lexer` crate drives the
//! cursor and turns its issues into lexical diagnostics.

mod cursor;
mod stream_buffer;

pub use cursor::{DecodeIssue, DecodeIssueKind, Position, RuneCursor};
pub use stream_buffer::{BufferConfig, SourceError, SourceState, StreamBuffer, SENTINEL};
