use super::*;
use pretty_assertions::assert_eq;
use ree_lexer::{lex, Lexer, Position, Token, TokenKind};

/// Render the diagnostics for every error in `source`.
fn diagnostics(source: &str) -> Vec<Diagnostic> {
    lex(source).errors.iter().map(render_lex_error).collect()
}

fn only(source: &str) -> Diagnostic {
    let mut all = diagnostics(source);
    assert_eq!(all.len(), 1, "expected one diagnostic for {source:?}");
    all.remove(0)
}

// === Error codes ===

#[test]
fn codes_follow_error_kind() {
    let cases = [
        ("\"abc", ErrorCode::E0001),
        ("a\0b", ErrorCode::E0002),
        ("089", ErrorCode::E0003),
        ("#\\", ErrorCode::E0004),
        ("\"a\\qb\"", ErrorCode::E0005),
        ("#z", ErrorCode::E0006),
        ("#\\ x", ErrorCode::E0007),
        ("'", ErrorCode::E0008),
    ];
    for (source, code) in cases {
        assert_eq!(only(source).code, code, "{source:?}");
    }
}

#[test]
fn every_lex_diagnostic_is_located() {
    for diag in diagnostics("\"a\\q\" 089 #z '") {
        assert!(diag.primary_position().is_some());
        assert!(diag.code.is_lexer_error());
    }
}

// === Labels and hints ===

#[test]
fn unterminated_string_points_at_opening_quote() {
    let diag = only("(x \"abc");
    assert_eq!(diag.message, "unterminated string literal");
    assert_eq!(diag.primary_position(), Some(Position::new(0, 3)));
    assert_eq!(diag.suggestions, vec!["add a closing `\"`".to_owned()]);
}

#[test]
fn octal_digit_suggests_decimal() {
    let diag = only("089");
    assert_eq!(diag.message, "invalid octal integer literal `089`: invalid digit `8`");
    assert_eq!(diag.labels[0].message, "`8` is not a valid octal digit");
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn overflow_reports_fallback_value() {
    let diag = only("99999999999999999999");
    assert_eq!(diag.code, ErrorCode::E0003);
    assert_eq!(
        diag.notes,
        vec![format!("the literal evaluates to {}", i64::MAX)]
    );
}

#[test]
fn unknown_escape_lists_known_ones() {
    let diag = only("\"a\\qb\"");
    assert_eq!(diag.message, "unknown escape sequence `\\q`");
    assert_eq!(diag.primary_position(), Some(Position::new(0, 2)));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn unterminated_quote_names_the_mode() {
    let diag = only("`(a ,b");
    assert_eq!(diag.code, ErrorCode::E0008);
    assert_eq!(
        diag.message,
        "unterminated quasiquote form at end of input"
    );
    assert_eq!(
        diag.notes,
        vec!["a quasiquote must be followed by a complete datum".to_owned()]
    );
}

#[test]
fn source_failure_is_e0009() {
    let err = LexError::new(
        Position::new(4, 2),
        LexErrorKind::Source {
            message: "connection reset".to_owned(),
        },
    );
    let diag = render_lex_error(&err);
    assert_eq!(diag.code, ErrorCode::E0009);
    assert_eq!(diag.message, "cannot read source: connection reset");
    assert_eq!(diag.primary_position(), Some(Position::new(4, 2)));
}

// === Parser-side reports ===

#[test]
fn unexpected_token_is_e1001() {
    let mut lexer = Lexer::new(")".as_bytes());
    let token = lexer.next_token();
    lexer.report_unexpected(&token, "an expression");
    let diag = render_lex_error(&lexer.errors()[0]);
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "unexpected `)`, expected an expression");
    assert_eq!(diag.labels[0].message, "expected an expression");
}

#[test]
fn free_form_report_is_e9001() {
    let mut lexer = Lexer::new("(define)".as_bytes());
    lexer.next_token();
    lexer.report("define needs a name");
    let diag = render_lex_error(&lexer.errors()[0]);
    assert_eq!(diag.code, ErrorCode::E9001);
    assert_eq!(diag.message, "define needs a name");
    assert_eq!(diag.primary_position(), Some(Position::new(0, 1)));
}

#[test]
fn unexpected_token_display() {
    let token = Token::new(TokenKind::RParen, Position::new(2, 9));
    let err = LexError::new(
        token.position,
        LexErrorKind::UnexpectedToken {
            found: token.kind.display_name().to_owned(),
            expected: "a datum".to_owned(),
        },
    );
    assert_eq!(
        render_lex_error(&err).to_string(),
        "error [E1001]: unexpected `)`, expected a datum\n  --> 3:10: expected a datum"
    );
}
