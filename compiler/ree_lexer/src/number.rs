//! Integer literal conversion.
//!
//! The lexer decides the radix while scanning and hands the whole lexeme
//! (sign and prefix included) to [`parse_literal`]:
//!
//! | lexeme        | radix                     |
//! |---------------|---------------------------|
//! | `0x1F`, `0X1f`| [`Radix::Hexadecimal`]    |
//! | `0011`        | [`Radix::Binary`]         |
//! | `017`         | [`Radix::Octal`]          |
//! | `42`          | [`Radix::Decimal`]        |
//!
//! Binary literals ignore any sign prefix: `-0011` is `3`.

use std::fmt;

/// Base of an integer literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an integer lexeme could not be converted exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IntError {
    /// Prefix without digits, e.g. `0x`.
    #[error("missing digits")]
    NoDigits,
    /// A digit outside the radix, e.g. `9` in `019`.
    #[error("invalid digit `{0}`")]
    InvalidDigit(char),
    /// The value does not fit in 64 bits.
    #[error("value does not fit in 64 bits")]
    Overflow {
        /// Value used in place of the literal: saturated for signed radixes,
        /// wrapped for binary.
        fallback: i64,
    },
}

impl IntError {
    /// Best-effort value to continue with.
    pub fn fallback(self) -> i64 {
        match self {
            IntError::Overflow { fallback } => fallback,
            IntError::NoDigits | IntError::InvalidDigit(_) => 0,
        }
    }
}

/// Convert an integer lexeme scanned with the given radix.
pub fn parse_literal(text: &str, radix: Radix) -> Result<i64, IntError> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    match radix {
        Radix::Binary => parse_binary(unsigned.strip_prefix("00").unwrap_or(unsigned)),
        Radix::Hexadecimal => {
            let digits = unsigned
                .strip_prefix("0x")
                .or_else(|| unsigned.strip_prefix("0X"))
                .unwrap_or(unsigned);
            parse_signed(digits, negative, radix)
        }
        Radix::Octal | Radix::Decimal => parse_signed(unsigned, negative, radix),
    }
}

/// Digit-by-digit accumulation with two's-complement wrap-around. An empty
/// run is zero (the `00` marker itself).
fn parse_binary(digits: &str) -> Result<i64, IntError> {
    let mut value: i64 = 0;
    let mut overflowed = false;
    for ch in digits.chars() {
        let digit = match ch {
            '0' => 0,
            '1' => 1,
            other => return Err(IntError::InvalidDigit(other)),
        };
        match value.checked_mul(2).and_then(|v| v.checked_add(digit)) {
            Some(next) => value = next,
            None => {
                overflowed = true;
                value = value.wrapping_mul(2).wrapping_add(digit);
            }
        }
    }
    if overflowed {
        Err(IntError::Overflow { fallback: value })
    } else {
        Ok(value)
    }
}

fn parse_signed(digits: &str, negative: bool, radix: Radix) -> Result<i64, IntError> {
    if digits.is_empty() {
        return Err(IntError::NoDigits);
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    let mut magnitude: Option<u64> = Some(0);
    for ch in digits.chars() {
        let digit = ch
            .to_digit(radix.base())
            .ok_or(IntError::InvalidDigit(ch))?;
        magnitude = magnitude
            .and_then(|m| m.checked_mul(u64::from(radix.base())))
            .and_then(|m| m.checked_add(u64::from(digit)));
    }

    let value = magnitude.and_then(|m| {
        if negative {
            0i64.checked_sub_unsigned(m)
        } else {
            i64::try_from(m).ok()
        }
    });
    value.ok_or(IntError::Overflow {
        fallback: saturated,
    })
}

#[cfg(test)]
mod tests;
