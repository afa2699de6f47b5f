use super::*;
use pretty_assertions::assert_eq;

// === Radixes ===

#[test]
fn decimal_literals() {
    assert_eq!(parse_literal("0", Radix::Octal), Ok(0));
    assert_eq!(parse_literal("42", Radix::Decimal), Ok(42));
    assert_eq!(parse_literal("-5", Radix::Decimal), Ok(-5));
    assert_eq!(parse_literal("+7", Radix::Decimal), Ok(7));
}

#[test]
fn hexadecimal_literals() {
    assert_eq!(parse_literal("0x1F", Radix::Hexadecimal), Ok(31));
    assert_eq!(parse_literal("0Xff", Radix::Hexadecimal), Ok(255));
    assert_eq!(parse_literal("-0x10", Radix::Hexadecimal), Ok(-16));
}

#[test]
fn octal_literals() {
    assert_eq!(parse_literal("017", Radix::Octal), Ok(15));
    assert_eq!(parse_literal("-017", Radix::Octal), Ok(-15));
}

#[test]
fn binary_literals_ignore_sign() {
    assert_eq!(parse_literal("0011", Radix::Binary), Ok(3));
    assert_eq!(parse_literal("-0011", Radix::Binary), Ok(3));
    assert_eq!(parse_literal("+00101", Radix::Binary), Ok(5));
    assert_eq!(parse_literal("00", Radix::Binary), Ok(0));
}

// === Failures ===

#[test]
fn hex_prefix_without_digits() {
    assert_eq!(
        parse_literal("0x", Radix::Hexadecimal),
        Err(IntError::NoDigits)
    );
    assert_eq!(IntError::NoDigits.fallback(), 0);
}

#[test]
fn octal_rejects_decimal_digits() {
    let err = parse_literal("089", Radix::Octal);
    assert_eq!(err, Err(IntError::InvalidDigit('8')));
}

#[test]
fn decimal_overflow_saturates() {
    let err = parse_literal("99999999999999999999", Radix::Decimal);
    assert_eq!(
        err,
        Err(IntError::Overflow {
            fallback: i64::MAX
        })
    );

    let err = parse_literal("-99999999999999999999", Radix::Decimal);
    assert_eq!(err.map_err(IntError::fallback), Err(i64::MIN));
}

#[test]
fn extremes_fit() {
    assert_eq!(
        parse_literal("9223372036854775807", Radix::Decimal),
        Ok(i64::MAX)
    );
    assert_eq!(
        parse_literal("-9223372036854775808", Radix::Decimal),
        Ok(i64::MIN)
    );
    assert!(parse_literal("9223372036854775808", Radix::Decimal).is_err());
}

#[test]
fn binary_overflow_wraps() {
    // 65 ones: the value wraps past 64 bits.
    let text = format!("00{}", "1".repeat(65));
    let err = parse_literal(&text, Radix::Binary);
    assert_eq!(err, Err(IntError::Overflow { fallback: -1 }));
}

#[test]
fn radix_display() {
    assert_eq!(Radix::Hexadecimal.to_string(), "hexadecimal");
    assert_eq!(Radix::Binary.base(), 2);
}

mod proptest_numbers {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn decimal_matches_std(value in any::<i64>()) {
            prop_assert_eq!(parse_literal(&value.to_string(), Radix::Decimal), Ok(value));
        }

        #[test]
        fn hex_matches_std(value in 0..=i64::MAX) {
            let text = format!("0x{value:x}");
            prop_assert_eq!(parse_literal(&text, Radix::Hexadecimal), Ok(value));
        }
    }
}
