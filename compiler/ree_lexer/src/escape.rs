//! Backslash escape decoding for string and character literals.
//!
//! Recognized escapes (the text after the backslash):
//!
//! - single characters: `"` `a` `b` `f` `n` `r` `t` `v` `\`
//! - `ooo`: exactly three octal digits, value at most 255
//! - `xhh`: exactly two hex digits
//! - `uhhhh` and `Uhhhhhhhh`: a Unicode scalar value (surrogates rejected)
//!
//! Octal and `\x` escapes name a code point in U+0000..=U+00FF. Invalid
//! escapes never abort a literal: the string decoder records an
//! [`EscapeIssue`] and substitutes U+FFFD.

use crate::number::Radix;

/// Problem with a single escape sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EscapeError {
    #[error("unknown escape sequence `\\{0}`")]
    Unknown(char),
    #[error("invalid character {found:?} in {radix} escape")]
    InvalidDigit { found: char, radix: Radix },
    #[error("{radix} escape needs exactly {expected} digits")]
    TooShort { radix: Radix, expected: u8 },
    #[error("octal escape value {0} > 255")]
    OctalOutOfRange(u32),
    #[error("escape is invalid Unicode code point U+{0:04X}")]
    InvalidCodePoint(u32),
    #[error("backslash at end of literal")]
    TrailingBackslash,
    #[error("unexpected `{0}` after escape sequence")]
    Trailing(String),
}

/// An escape problem located inside a literal's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapeIssue {
    /// Byte offset of the backslash within the content.
    pub offset: usize,
    pub error: EscapeError,
}

/// Decode one escape sequence. `after` starts right after the backslash.
///
/// Returns the decoded scalar (or the error) together with the number of
/// bytes of `after` that belong to the sequence. On error the length covers
/// whatever was accepted before the problem, so callers can resume there.
pub fn decode_escape(after: &str) -> (Result<char, EscapeError>, usize) {
    let Some(first) = after.chars().next() else {
        return (Err(EscapeError::TrailingBackslash), 0);
    };

    let simple = match first {
        '"' => Some('"'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        _ => None,
    };
    if let Some(ch) = simple {
        return (Ok(ch), 1);
    }

    // Octal digits are part of the value; the other forms skip a marker.
    let (radix, expected, skip) = match first {
        '0'..='7' => (Radix::Octal, 3u8, 0),
        'x' => (Radix::Hexadecimal, 2, 1),
        'u' => (Radix::Hexadecimal, 4, 1),
        'U' => (Radix::Hexadecimal, 8, 1),
        other => return (Err(EscapeError::Unknown(other)), other.len_utf8()),
    };

    let mut value: u32 = 0;
    let mut len = skip;
    let mut digits = after[skip..].chars();
    for _ in 0..expected {
        let Some(ch) = digits.next() else {
            return (Err(EscapeError::TooShort { radix, expected }), len);
        };
        let Some(digit) = ch.to_digit(radix.base()) else {
            return (Err(EscapeError::InvalidDigit { found: ch, radix }), len);
        };
        value = value * radix.base() + digit;
        len += 1;
    }

    if radix == Radix::Octal && value > 255 {
        return (Err(EscapeError::OctalOutOfRange(value)), len);
    }
    match char::from_u32(value) {
        Some(ch) => (Ok(ch), len),
        None => (Err(EscapeError::InvalidCodePoint(value)), len),
    }
}

/// Unescape the content of a string literal (between the quotes).
///
/// Returns `None` when the content has no backslash and can be used as is.
pub fn unescape_string(content: &str, issues: &mut Vec<EscapeIssue>) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(content.len());
    let mut rest = content;
    let mut offset = 0;
    while let Some(backslash) = rest.find('\\') {
        result.push_str(&rest[..backslash]);
        let (decoded, len) = decode_escape(&rest[backslash + 1..]);
        match decoded {
            Ok(ch) => result.push(ch),
            Err(error) => {
                issues.push(EscapeIssue {
                    offset: offset + backslash,
                    error,
                });
                result.push(char::REPLACEMENT_CHARACTER);
            }
        }
        let consumed = backslash + 1 + len;
        offset += consumed;
        rest = &rest[consumed..];
    }
    result.push_str(rest);
    Some(result)
}

/// Decode the text of a character literal after `#\` as an escape
/// sequence. The whole run must form exactly one escape.
pub fn unescape_char(run: &str) -> Result<char, EscapeError> {
    let (decoded, len) = decode_escape(run);
    let ch = decoded?;
    match run.get(len..) {
        Some("") | None => Ok(ch),
        Some(rest) => Err(EscapeError::Trailing(rest.to_owned())),
    }
}
