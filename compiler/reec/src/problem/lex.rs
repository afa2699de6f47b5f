//! Lex-time problem rendering.

use ree_diagnostic::{Diagnostic, ErrorCode};
use ree_lexer::escape::EscapeError;
use ree_lexer::number::{IntError, Radix};
use ree_lexer::{LexError, LexErrorKind};

/// Render a `LexError` into a `Diagnostic` with the matching error code,
/// message, label and hints.
#[cold]
pub fn render_lex_error(err: &LexError) -> Diagnostic {
    let position = err.position;
    let message = err.kind.to_string();
    match &err.kind {
        LexErrorKind::NulByte => Diagnostic::error(ErrorCode::E0002)
            .with_message("null byte in source")
            .with_label(position, "unexpected null byte"),

        LexErrorKind::InvalidUtf8 { .. } => Diagnostic::error(ErrorCode::E0002)
            .with_message(message)
            .with_label(position, "not valid UTF-8")
            .with_note("Ree source files must be UTF-8 encoded"),

        LexErrorKind::MisplacedBom => Diagnostic::error(ErrorCode::E0002)
            .with_message(message)
            .with_label(position, "byte order mark not allowed here"),

        LexErrorKind::Source { message } => Diagnostic::error(ErrorCode::E0009)
            .with_message(format!("cannot read source: {message}"))
            .with_label(position, "input stops here"),

        LexErrorKind::InvalidInteger { radix, cause, .. } => {
            let diag = Diagnostic::error(ErrorCode::E0003).with_message(message);
            match cause {
                IntError::NoDigits => diag.with_label(position, "add digits after the prefix"),
                IntError::InvalidDigit(digit) => {
                    let diag =
                        diag.with_label(position, format!("`{digit}` is not a valid {radix} digit"));
                    if *radix == Radix::Octal {
                        diag.with_suggestion(
                            "integers with a leading `0` are octal; drop the zero for a decimal literal",
                        )
                    } else {
                        diag
                    }
                }
                IntError::Overflow { fallback } => diag
                    .with_label(position, "value does not fit in 64 bits")
                    .with_note(format!("the literal evaluates to {fallback}")),
            }
        }

        LexErrorKind::InvalidEscape(escape) => {
            let diag = Diagnostic::error(ErrorCode::E0005)
                .with_message(message)
                .with_label(position, "invalid escape");
            match escape {
                EscapeError::Unknown(_) => diag.with_note(
                    "recognized escapes are \\\" \\a \\b \\f \\n \\r \\t \\v \\\\, \
                     \\ooo, \\xhh, \\uhhhh and \\Uhhhhhhhh",
                ),
                EscapeError::TrailingBackslash => {
                    diag.with_suggestion("write `\\\\` for a literal backslash")
                }
                _ => diag,
            }
        }

        LexErrorKind::UnterminatedString => Diagnostic::error(ErrorCode::E0001)
            .with_message("unterminated string literal")
            .with_label(position, "string starts here")
            .with_suggestion("add a closing `\"`"),

        LexErrorKind::UnterminatedChar => Diagnostic::error(ErrorCode::E0004)
            .with_message("unterminated character literal")
            .with_label(position, "`#\\` needs a character after it"),

        LexErrorKind::InvalidCharLiteral => Diagnostic::error(ErrorCode::E0007)
            .with_message(message)
            .with_label(position, "expected a character or escape after `#\\`"),

        LexErrorKind::UnknownHashMarker { .. } => Diagnostic::error(ErrorCode::E0006)
            .with_message(message)
            .with_label(position, "not a recognized `#` form")
            .with_note("`#` may be followed by `t`, `f`, `\\`, `;` or `!`"),

        LexErrorKind::UnterminatedQuote { mode } => Diagnostic::error(ErrorCode::E0008)
            .with_message(message)
            .with_label(position, "input ends here")
            .with_note(format!("a {mode} must be followed by a complete datum")),

        LexErrorKind::UnexpectedToken { expected, .. } => Diagnostic::error(ErrorCode::E1001)
            .with_message(message)
            .with_label(position, format!("expected {expected}")),

        LexErrorKind::Reported { message } => Diagnostic::error(ErrorCode::E9001)
            .with_message(message.as_str())
            .with_label(position, "reported here"),
    }
}

#[cfg(test)]
mod tests;
