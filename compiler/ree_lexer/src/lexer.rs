//! The tokenizer.
//!
//! [`Lexer`] pulls scalar values from a [`RuneCursor`] and produces one
//! [`Token`] per [`next_token`](Lexer::next_token) call. Each call dispatches
//! on the active [`LexMode`]: [`scan_normal`](Lexer::scan_normal) for code,
//! [`scan_quoted`](Lexer::scan_quoted) and
//! [`scan_quasiquoted`](Lexer::scan_quasiquoted) for data. Scanners report
//! how the token affects nesting ([`FormEvent`]) and the [`ModeStack`] is
//! updated once the token is complete, so a mode change always takes effect
//! on the next call.
//!
//! Errors are collected, never raised. A token is always produced.

use std::borrow::Cow;
use std::io::Read;

use ree_lexer_core::{BufferConfig, Position, RuneCursor};

use crate::escape;
use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind};
use crate::mode_stack::{FormEvent, LexMode, ModeStack};
use crate::number::{self, Radix};
use crate::token::{Operator, Token, TokenKind};

/// Outcome of one scanner pass.
enum Scanned {
    /// A token that takes part in nesting.
    Form(Token, FormEvent),
    /// A token returned as is, skipping the mode stack (end-of-input,
    /// shebang lines, unterminated literals).
    Immediate(Token),
    /// Nothing usable was scanned; scan again.
    Retry,
}

impl Scanned {
    fn into_quoted(self) -> Self {
        match self {
            Scanned::Form(token, event) => Scanned::Form(token.into_quoted(), event),
            Scanned::Immediate(token) => Scanned::Immediate(token.into_quoted()),
            Scanned::Retry => Scanned::Retry,
        }
    }
}

/// Streaming tokenizer over any byte source.
pub struct Lexer<R> {
    cursor: RuneCursor<R>,
    modes: ModeStack,
    errors: Vec<LexError>,
    /// Set once the unterminated-quote check has run at end-of-input.
    eof_checked: bool,
}

impl<R: Read> Lexer<R> {
    /// Bind `source` with the default buffer configuration.
    pub fn new(source: R) -> Self {
        Self::with_config(source, BufferConfig::default())
    }

    pub fn with_config(source: R, config: BufferConfig) -> Self {
        let mut lexer = Lexer {
            cursor: RuneCursor::new(source, config),
            modes: ModeStack::new(),
            errors: Vec::new(),
            eof_checked: false,
        };
        // Priming the cursor may already have hit bad input.
        lexer.drain_issues();
        lexer
    }

    /// Produce the next token. At end-of-input this keeps returning
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        loop {
            let scanned = match self.modes.mode() {
                LexMode::Normal => self.scan_normal(),
                LexMode::Quote => self.scan_quoted(),
                LexMode::Quasiquote => self.scan_quasiquoted(),
            };
            self.cursor.end_segment();
            self.drain_issues();

            match scanned {
                Scanned::Form(token, event) => {
                    self.modes.apply(event);
                    return token;
                }
                Scanned::Immediate(token) => return token,
                Scanned::Retry => {}
            }
        }
    }

    // === Mode scanners ===

    fn scan_normal(&mut self) -> Scanned {
        let Some(ch) = self.start_token() else {
            return self.end_of_input();
        };
        let start = self.cursor.position();

        match ch {
            '(' | '[' | ')' | ']' => self.delimiter(ch, start, TokenKind::Empty),
            '+' | '-' => {
                self.bump();
                if self.cursor.current().is_some_and(|c| c.is_ascii_digit()) {
                    atom(self.number(start))
                } else if ch == '+' {
                    operator(Operator::Add, start)
                } else {
                    operator(Operator::Sub, start)
                }
            }
            '*' => self.single_operator(Operator::Mul, start),
            '/' => self.single_operator(Operator::Div, start),
            '=' => self.single_operator(Operator::Eq, start),
            '~' => self.single_operator(Operator::Neq, start),
            '>' => self.comparison(Operator::Gt, Operator::GtEq, start),
            '<' => self.comparison(Operator::Lt, Operator::LtEq, start),
            '"' => self.string(start),
            '\'' => self.trigger(Operator::Quote, LexMode::Quote, start),
            '`' => self.trigger(Operator::Quasiquote, LexMode::Quasiquote, start),
            '?' => {
                self.bump();
                if self.cursor.current().is_some_and(is_whitespace) {
                    operator(Operator::Question, start)
                } else {
                    atom(self.identifier(start))
                }
            }
            ',' => {
                self.bump();
                if self.cursor.current() == Some('@') {
                    self.bump();
                    operator(Operator::UnquoteSplice, start)
                } else {
                    operator(Operator::Unquote, start)
                }
            }
            '#' => self.hash(start, LexMode::Normal),
            c if c.is_ascii_digit() => atom(self.number(start)),
            _ => atom(self.identifier(start)),
        }
    }

    fn scan_quoted(&mut self) -> Scanned {
        self.scan_datum(LexMode::Quote)
    }

    fn scan_quasiquoted(&mut self) -> Scanned {
        self.scan_datum(LexMode::Quasiquote)
    }

    /// Shared body of the quote and quasiquote scanners. Literals come out
    /// as their self-quoting kinds.
    fn scan_datum(&mut self, mode: LexMode) -> Scanned {
        let Some(ch) = self.start_token() else {
            return self.end_of_input();
        };
        let start = self.cursor.position();

        match ch {
            '(' | '[' | ')' | ']' => self.delimiter(ch, start, TokenKind::SymEmpty),
            '.' => {
                self.bump();
                atom(Token::new(TokenKind::Period, start))
            }
            '"' => self.string(start).into_quoted(),
            '\'' => self.trigger(Operator::Quote, LexMode::Quote, start),
            '`' => self.trigger(Operator::Quasiquote, LexMode::Quasiquote, start),
            ',' if mode == LexMode::Quasiquote => {
                self.bump();
                let op = if self.cursor.current() == Some('@') {
                    self.bump();
                    Operator::UnquoteSplice
                } else {
                    Operator::Unquote
                };
                Scanned::Form(
                    Token::new(TokenKind::Operator(op), start),
                    FormEvent::Enter(LexMode::Normal),
                )
            }
            '#' => self.hash(start, mode),
            c if c.is_ascii_digit() => atom(self.number(start).into_quoted()),
            _ => atom(self.identifier(start).into_quoted()),
        }
    }

    // === Shared pieces ===

    /// Skip whitespace and open a segment at the first rune of the token.
    /// `None` at end-of-input.
    fn start_token(&mut self) -> Option<char> {
        self.eat_while(is_whitespace);
        let ch = self.cursor.current()?;
        self.cursor.begin_segment();
        Some(ch)
    }

    fn end_of_input(&mut self) -> Scanned {
        if !self.eof_checked {
            self.eof_checked = true;
            if let Some(mode) = self.modes.open_quote() {
                let position = self.cursor.position();
                self.report_at(position, LexErrorKind::UnterminatedQuote { mode });
            }
        }
        Scanned::Immediate(Token::new(TokenKind::Eof, self.cursor.position()))
    }

    fn delimiter(&mut self, ch: char, start: Position, empty: TokenKind) -> Scanned {
        self.bump();
        match ch {
            '(' if self.cursor.current() == Some(')') => {
                self.bump();
                atom(Token::new(empty, start))
            }
            '(' | '[' => Scanned::Form(Token::new(TokenKind::LParen, start), FormEvent::Open),
            _ => Scanned::Form(Token::new(TokenKind::RParen, start), FormEvent::Close),
        }
    }

    fn trigger(&mut self, op: Operator, mode: LexMode, start: Position) -> Scanned {
        self.bump();
        Scanned::Form(
            Token::new(TokenKind::Operator(op), start),
            FormEvent::Enter(mode),
        )
    }

    fn single_operator(&mut self, op: Operator, start: Position) -> Scanned {
        self.bump();
        operator(op, start)
    }

    /// `>`/`>=` and `<`/`<=`.
    fn comparison(&mut self, bare: Operator, with_eq: Operator, start: Position) -> Scanned {
        self.bump();
        if self.cursor.current() == Some('=') {
            self.bump();
            operator(with_eq, start)
        } else {
            operator(bare, start)
        }
    }

    /// Everything after `#`. Suppress markers and shebang lines only exist in
    /// normal mode. Anything unrecognized is reported and skipped up to the
    /// end of the lexeme; a delimiter right after the marker is left alone.
    fn hash(&mut self, start: Position, mode: LexMode) -> Scanned {
        let quoted = mode != LexMode::Normal;
        self.bump();
        let kind = match self.cursor.current() {
            Some('t') => TokenKind::True,
            Some('f') => TokenKind::False,
            Some(';') if !quoted => TokenKind::Suppress,
            Some('\\') => {
                let scanned = self.char_literal(start);
                return if quoted { scanned.into_quoted() } else { scanned };
            }
            Some('!') if !quoted => return self.shebang(start),
            _ => {
                self.eat_while(|c| !ends_lexeme(c));
                let text = self.segment_text().into_owned();
                self.push_error(LexError::unknown_hash_marker(start, text));
                return Scanned::Retry;
            }
        };
        self.bump();
        let token = Token::new(kind, start);
        atom(if quoted { token.into_quoted() } else { token })
    }

    /// `#!...` up to (not including) the newline.
    fn shebang(&mut self, start: Position) -> Scanned {
        self.eat_while(|c| c != '\n');
        let text = self.segment_text().into_owned();
        Scanned::Immediate(Token::with_text(TokenKind::Shebang, start, text))
    }

    /// Character literal. The cursor is on the backslash of `#\`.
    fn char_literal(&mut self, start: Position) -> Scanned {
        self.bump();
        if self.cursor.is_eof() {
            self.push_error(LexError::new(start, LexErrorKind::UnterminatedChar));
            return Scanned::Immediate(Token::with_char(
                TokenKind::Char,
                start,
                char::REPLACEMENT_CHARACTER,
            ));
        }

        self.eat_while(|c| !ends_lexeme(c));
        let segment = self.segment_text();
        let run = segment.get(2..).unwrap_or_default().to_owned();

        let mut chars = run.chars();
        let value = match (chars.next(), chars.next()) {
            (None, _) => Err(LexErrorKind::InvalidCharLiteral),
            (Some(ch), None) if ch != 'u' => Ok(ch),
            _ => escape::unescape_char(&run).map_err(LexErrorKind::from),
        };
        let value = value.unwrap_or_else(|kind| {
            self.push_error(LexError::new(start, kind));
            char::REPLACEMENT_CHARACTER
        });
        atom(Token::with_char(TokenKind::Char, start, value))
    }

    /// Integer literal. The segment is open at `start`; an optional sign has
    /// already been consumed and the cursor is on the first digit.
    fn number(&mut self, start: Position) -> Token {
        let radix = if self.cursor.current() == Some('0') {
            self.bump();
            match self.cursor.current() {
                Some('x' | 'X') => {
                    self.bump();
                    self.eat_while(|c| c.is_ascii_hexdigit());
                    Radix::Hexadecimal
                }
                Some('0') => {
                    self.bump();
                    self.eat_while(|c| c == '0' || c == '1');
                    Radix::Binary
                }
                _ => {
                    self.eat_while(|c| c.is_ascii_digit());
                    Radix::Octal
                }
            }
        } else {
            self.eat_while(|c| c.is_ascii_digit());
            Radix::Decimal
        };

        let text = self.segment_text().into_owned();
        let value = match number::parse_literal(&text, radix) {
            Ok(value) => value,
            Err(cause) => {
                let fallback = cause.fallback();
                self.push_error(LexError::invalid_integer(start, text, radix, cause));
                fallback
            }
        };
        Token::with_int(TokenKind::Int, start, value)
    }

    /// String literal. The cursor is on the opening quote.
    ///
    /// The closing quote is found first (a backslash always hides the next
    /// character), then the content is unescaped in one pass. Unterminated
    /// strings keep their partial content and skip the mode stack.
    fn string(&mut self, start: Position) -> Scanned {
        self.bump();
        let terminated = loop {
            match self.cursor.current() {
                None => break false,
                Some('"') => {
                    self.bump();
                    break true;
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(_) => self.bump(),
            }
        };

        let raw = self.segment_text().into_owned();
        let end = if terminated { raw.len() - 1 } else { raw.len() };
        let content = raw.get(1..end).unwrap_or_default();

        let mut issues = Vec::new();
        let value = escape::unescape_string(content, &mut issues)
            .unwrap_or_else(|| content.to_owned());
        if !issues.is_empty() {
            // Offsets index the lossy text; columns count source bytes.
            let bytes = self.cursor.segment();
            let located: Vec<_> = issues
                .into_iter()
                .map(|issue| {
                    let offset = raw_offset(bytes, 1 + issue.offset);
                    (position_after(start, bytes.get(..offset).unwrap_or(bytes)), issue.error)
                })
                .collect();
            for (position, error) in located {
                self.push_error(LexError::new(position, error.into()));
            }
        }

        let token = Token::with_text(TokenKind::Str, start, value);
        if terminated {
            atom(token)
        } else {
            self.push_error(LexError::unterminated_string(start));
            Scanned::Immediate(token)
        }
    }

    /// Identifier, or keyword when the text is in the keyword table.
    fn identifier(&mut self, start: Position) -> Token {
        self.eat_while(|c| !ends_lexeme(c));
        let text = self.segment_text().into_owned();
        match keywords::lookup(&text) {
            Some(keyword) => Token::with_text(TokenKind::Keyword(keyword), start, text),
            None => Token::with_text(TokenKind::Ident, start, text),
        }
    }

    // === Cursor helpers ===

    #[inline]
    fn bump(&mut self) {
        self.cursor.advance();
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.cursor.current().is_some_and(&pred) {
            self.cursor.advance();
        }
    }

    /// Text of the open segment. Undecodable bytes (already reported by the
    /// cursor) come out as U+FFFD.
    fn segment_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.cursor.segment())
    }
}

impl<R> Lexer<R> {
    /// 0-based line of the read point.
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// 0-based byte column of the read point.
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Active lexical mode.
    pub fn mode(&self) -> LexMode {
        self.modes.mode()
    }

    pub fn modes(&self) -> &ModeStack {
        &self.modes
    }

    /// Record a free-form diagnostic at the read point. Scanning continues.
    pub fn report(&mut self, message: impl Into<String>) {
        let position = self.cursor.position();
        self.report_at(
            position,
            LexErrorKind::Reported {
                message: message.into(),
            },
        );
    }

    /// Record that the parser found `found` where it expected something
    /// else.
    pub fn report_unexpected(&mut self, found: &Token, expected: impl Into<String>) {
        self.report_at(
            found.position,
            LexErrorKind::UnexpectedToken {
                found: found.kind.display_name().to_owned(),
                expected: expected.into(),
            },
        );
    }

    /// Errors collected so far, in the order they were found.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        self.drain_issues();
        std::mem::take(&mut self.errors)
    }

    fn report_at(&mut self, position: Position, kind: LexErrorKind) {
        self.push_error(LexError::new(position, kind));
    }

    fn push_error(&mut self, error: LexError) {
        // Decode issues found while scanning up to here come first.
        self.drain_issues();
        tracing::debug!(position = %error.position, %error, "lexical error");
        self.errors.push(error);
    }

    fn drain_issues(&mut self) {
        if !self.cursor.has_issues() {
            return;
        }
        for issue in self.cursor.take_issues() {
            let error = LexError::from(issue);
            tracing::debug!(position = %error.position, %error, "encoding error");
            self.errors.push(error);
        }
    }
}

/// Yields tokens up to, not including, end-of-input.
impl<R: Read> Iterator for Lexer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

fn atom(token: Token) -> Scanned {
    Scanned::Form(token, FormEvent::Atom)
}

fn operator(op: Operator, start: Position) -> Scanned {
    atom(Token::new(TokenKind::Operator(op), start))
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Characters that end an identifier, symbol or character literal.
fn ends_lexeme(ch: char) -> bool {
    is_whitespace(ch) || matches!(ch, '[' | ']' | '(' | ')' | '#' | '`' | '\'' | '"')
}

/// Position reached after the source bytes `raw`, starting at `start`.
fn position_after(start: Position, raw: &[u8]) -> Position {
    raw.iter().fold(start, |pos, &byte| {
        if byte == b'\n' {
            Position::new(pos.line + 1, 0)
        } else {
            Position::new(pos.line, pos.column + 1)
        }
    })
}

/// Map a byte offset into `String::from_utf8_lossy(raw)` back to `raw`.
/// Each invalid sequence stands for one U+FFFD in the lossy text.
fn raw_offset(raw: &[u8], lossy_offset: usize) -> usize {
    const REPLACEMENT_LEN: usize = char::REPLACEMENT_CHARACTER.len_utf8();

    let (mut raw_pos, mut lossy_pos) = (0, 0);
    for chunk in raw.utf8_chunks() {
        let valid = chunk.valid().len();
        if lossy_offset < lossy_pos + valid {
            return raw_pos + (lossy_offset - lossy_pos);
        }
        raw_pos += valid;
        lossy_pos += valid;

        let invalid = chunk.invalid().len();
        if invalid > 0 {
            if lossy_offset < lossy_pos + REPLACEMENT_LEN {
                return raw_pos;
            }
            raw_pos += invalid;
            lossy_pos += REPLACEMENT_LEN;
        }
    }
    raw_pos + lossy_offset.saturating_sub(lossy_pos)
}
