use std::fmt;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E9xxx: Internal or free-form errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source (NUL, bad UTF-8, stray BOM)
    E0002,
    /// Invalid integer literal
    E0003,
    /// Unterminated character literal
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unknown `#` marker
    E0006,
    /// Invalid character literal
    E0007,
    /// Unterminated quote or quasiquote form
    E0008,
    /// Source could not be read
    E0009,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,

    // Internal Errors (E9xxx)
    /// Free-form report from a later phase
    E9001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E1001,
        ErrorCode::E9001,
    ];

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            // Parser
            ErrorCode::E1001 => "E1001",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "invalid integer literal",
            ErrorCode::E0004 => "unterminated character literal",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E0006 => "unknown `#` marker",
            ErrorCode::E0007 => "invalid character literal",
            ErrorCode::E0008 => "unterminated quoted form",
            ErrorCode::E0009 => "source could not be read",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E9001 => "reported error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
