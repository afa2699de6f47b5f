//! Lexical diagnostics.
//!
//! The lexer never aborts. Each problem becomes a [`LexError`] collected in
//! source order; the driver decides what to do with them. Rendering (codes,
//! labels, colors) happens outside this crate.

use ree_lexer_core::{DecodeIssue, DecodeIssueKind, Position};

use crate::escape::EscapeError;
use crate::mode_stack::LexMode;
use crate::number::{IntError, Radix};

/// A lexical error at a source position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    /// Where the problem starts (0-based).
    pub position: Position,
    pub kind: LexErrorKind,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Encoding ===
    #[error("NUL byte in source")]
    NulByte,
    #[error("invalid UTF-8 byte 0x{byte:02X}")]
    InvalidUtf8 { byte: u8 },
    #[error("byte-order mark is only allowed at the start of input")]
    MisplacedBom,
    /// The byte source failed (I/O error, no progress, or a lexeme larger
    /// than the buffer cap).
    #[error("{message}")]
    Source { message: String },

    // === Literals ===
    #[error("invalid {radix} integer literal `{text}`: {cause}")]
    InvalidInteger {
        text: String,
        radix: Radix,
        cause: IntError,
    },
    #[error(transparent)]
    InvalidEscape(#[from] EscapeError),
    #[error("string not terminated")]
    UnterminatedString,
    #[error("character literal not terminated")]
    UnterminatedChar,
    #[error("invalid character literal")]
    InvalidCharLiteral,

    // === Structure ===
    #[error("unknown value after `#`: `{text}`")]
    UnknownHashMarker { text: String },
    #[error("unterminated {mode} form at end of input")]
    UnterminatedQuote { mode: LexMode },
    /// Raised on behalf of the parser.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },
    /// Free-form message from [`Lexer::report`](crate::Lexer::report).
    #[error("{message}")]
    Reported { message: String },
}

impl LexError {
    #[cold]
    pub fn new(position: Position, kind: LexErrorKind) -> Self {
        LexError { position, kind }
    }

    #[cold]
    pub fn unterminated_string(position: Position) -> Self {
        Self::new(position, LexErrorKind::UnterminatedString)
    }

    #[cold]
    pub fn unknown_hash_marker(position: Position, text: impl Into<String>) -> Self {
        Self::new(position, LexErrorKind::UnknownHashMarker { text: text.into() })
    }

    #[cold]
    pub fn invalid_integer(position: Position, text: String, radix: Radix, cause: IntError) -> Self {
        Self::new(position, LexErrorKind::InvalidInteger { text, radix, cause })
    }

    /// Whether this error comes from the byte stream rather than the token
    /// grammar.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self.kind,
            LexErrorKind::NulByte
                | LexErrorKind::InvalidUtf8 { .. }
                | LexErrorKind::MisplacedBom
                | LexErrorKind::Source { .. }
        )
    }
}

impl From<DecodeIssue> for LexError {
    fn from(issue: DecodeIssue) -> Self {
        let kind = match issue.kind {
            DecodeIssueKind::NulByte => LexErrorKind::NulByte,
            DecodeIssueKind::InvalidUtf8 { byte } => LexErrorKind::InvalidUtf8 { byte },
            DecodeIssueKind::MisplacedBom => LexErrorKind::MisplacedBom,
            DecodeIssueKind::Source(error) => LexErrorKind::Source {
                message: error.to_string(),
            },
        };
        LexError::new(issue.position, kind)
    }
}
