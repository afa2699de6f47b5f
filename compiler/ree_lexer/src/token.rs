//! Token model handed to the parser.

use std::fmt;

use ree_lexer_core::Position;

/// Reserved words. Only recognized in normal mode; inside quoted forms they
/// are plain symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Type,
    Let,
    /// `let*`
    LetRec,
    If,
    Cond,
    Else,
    Define,
    /// `lambda` or `λ`
    Lambda,
    Match,
}

impl Keyword {
    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Type => "type",
            Keyword::Let => "let",
            Keyword::LetRec => "let*",
            Keyword::If => "if",
            Keyword::Cond => "cond",
            Keyword::Else => "else",
            Keyword::Define => "define",
            Keyword::Lambda => "lambda",
            Keyword::Match => "match",
        }
    }
}

/// Operator tokens, including the quote family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Eq,
    /// `~`
    Neq,
    /// `'`
    Quote,
    /// `` ` ``
    Quasiquote,
    /// `,`
    Unquote,
    /// `,@`
    UnquoteSplice,
    /// `?` followed by whitespace
    Question,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Eq => "=",
            Operator::Neq => "~",
            Operator::Quote => "'",
            Operator::Quasiquote => "`",
            Operator::Unquote => ",",
            Operator::UnquoteSplice => ",@",
            Operator::Question => "?",
        }
    }
}

/// Token kinds.
///
/// The `Sym*` variants and [`Symbol`](TokenKind::Symbol) only appear inside
/// quote and quasiquote forms, where literals are data rather than code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    /// `#!` line, top level only.
    Shebang,
    /// `(` or `[`
    LParen,
    /// `)` or `]`
    RParen,
    /// `()`
    Empty,
    Int,
    Str,
    Ident,
    Keyword(Keyword),
    Operator(Operator),
    True,
    False,
    Char,
    /// `#;`
    Suppress,
    SymChar,
    SymInt,
    SymStr,
    SymTrue,
    SymFalse,
    SymEmpty,
    Symbol,
    /// `.` in a quoted form.
    Period,
    /// Kind of a token that was never produced.
    #[default]
    Undefined,
}

impl TokenKind {
    /// The self-quoting variant of a literal kind. Identifiers and keywords
    /// become [`Symbol`](TokenKind::Symbol); other kinds are unchanged.
    #[must_use]
    pub fn quoted(self) -> Self {
        match self {
            TokenKind::Int => TokenKind::SymInt,
            TokenKind::Str => TokenKind::SymStr,
            TokenKind::Char => TokenKind::SymChar,
            TokenKind::True => TokenKind::SymTrue,
            TokenKind::False => TokenKind::SymFalse,
            TokenKind::Empty => TokenKind::SymEmpty,
            TokenKind::Ident | TokenKind::Keyword(_) => TokenKind::Symbol,
            other => other,
        }
    }

    /// Whether this is one of the self-quoting kinds.
    pub fn is_self_quoting(self) -> bool {
        matches!(
            self,
            TokenKind::SymChar
                | TokenKind::SymInt
                | TokenKind::SymStr
                | TokenKind::SymTrue
                | TokenKind::SymFalse
                | TokenKind::SymEmpty
                | TokenKind::Symbol
        )
    }

    /// Human-readable name for diagnostics and dumps.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Shebang => "shebang",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Empty => "empty list",
            TokenKind::Int => "integer",
            TokenKind::Str => "string",
            TokenKind::Ident => "identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Operator(_) => "operator",
            TokenKind::True => "#t",
            TokenKind::False => "#f",
            TokenKind::Char => "character",
            TokenKind::Suppress => "`#;`",
            TokenKind::SymChar => "symbol character",
            TokenKind::SymInt => "symbol integer",
            TokenKind::SymStr => "symbol string",
            TokenKind::SymTrue => "symbol #t",
            TokenKind::SymFalse => "symbol #f",
            TokenKind::SymEmpty => "symbol empty list",
            TokenKind::Symbol => "symbol",
            TokenKind::Period => "`.`",
            TokenKind::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Token payload. Which variant is present is determined by the kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenValue {
    #[default]
    None,
    Text(String),
    Int(i64),
    Char(char),
}

/// A token and the position of its first character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    pub value: TokenValue,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token {
            kind,
            position,
            value: TokenValue::None,
        }
    }

    pub fn with_text(kind: TokenKind, position: Position, text: impl Into<String>) -> Self {
        Token {
            kind,
            position,
            value: TokenValue::Text(text.into()),
        }
    }

    pub fn with_int(kind: TokenKind, position: Position, value: i64) -> Self {
        Token {
            kind,
            position,
            value: TokenValue::Int(value),
        }
    }

    pub fn with_char(kind: TokenKind, position: Position, value: char) -> Self {
        Token {
            kind,
            position,
            value: TokenValue::Char(value),
        }
    }

    /// Retag as the self-quoting variant (see [`TokenKind::quoted`]).
    #[must_use]
    pub fn into_quoted(mut self) -> Self {
        self.kind = self.kind.quoted();
        self
    }

    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn int(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn char(&self) -> Option<char> {
        match self.value {
            TokenValue::Char(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Dump format: `[line:col] kind value`, 1-based.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:4}:{:4}] {:>18}",
            self.position.line + 1,
            self.position.column + 1,
            self.kind.display_name()
        )?;
        match (&self.value, self.kind) {
            (TokenValue::Text(text), _) => write!(f, " {text}"),
            (TokenValue::Int(value), _) => write!(f, " {value}"),
            (TokenValue::Char(value), _) => write!(f, " {value}"),
            (TokenValue::None, TokenKind::Operator(op)) => write!(f, " {}", op.as_str()),
            (TokenValue::None, _) => Ok(()),
        }
    }
}
