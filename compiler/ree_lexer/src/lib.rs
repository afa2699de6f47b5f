//! Streaming tokenizer for Ree.
//!
//! Ree is a Lisp with `quote`/`quasiquote`/`unquote` syntax. The lexer turns
//! a byte stream into [`Token`]s on demand: the parser calls
//! [`Lexer::next_token`] and gets exactly one token back, ending with a
//! repeatable [`TokenKind::Eof`].
//!
//! # Layers
//!
//! - `ree_lexer_core` owns the byte buffer and UTF-8 decoding.
//! - [`mode_stack`]: the quote/quasiquote automaton.
//! - [`number`] and [`escape`]: pure literal conversions.
//! - [`Lexer`]: per-mode dispatch tying it all together.
//!
//! # Errors
//!
//! Nothing here aborts. Problems are collected as [`LexError`]s next to the
//! token stream; see [`LexOutput`] for the batch entry points.
//!
//! ```
//! use ree_lexer::{lex, TokenKind};
//!
//! let output = lex("'(1 2) 3");
//! assert!(output.errors.is_empty());
//! assert_eq!(output.tokens[2].kind, TokenKind::SymInt);
//! assert_eq!(output.tokens[5].kind, TokenKind::Int);
//! ```

pub mod escape;
mod keywords;
mod lex_error;
mod lexer;
pub mod mode_stack;
pub mod number;
mod token;

use std::io::Read;

pub use keywords::lookup as lookup_keyword;
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use mode_stack::{LexMode, ModeStack};
pub use ree_lexer_core::{BufferConfig, Position};
pub use token::{Keyword, Operator, Token, TokenKind, TokenValue};

/// Every token of a source (ending with exactly one [`TokenKind::Eof`]) and
/// the errors found along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokenize an in-memory source.
pub fn lex(source: &str) -> LexOutput {
    lex_reader(source.as_bytes())
}

/// Tokenize everything a reader yields.
pub fn lex_reader<R: Read>(reader: R) -> LexOutput {
    lex_with(Lexer::new(reader))
}

/// Tokenize a reader with an explicit buffer configuration.
pub fn lex_reader_with_config<R: Read>(reader: R, config: BufferConfig) -> LexOutput {
    lex_with(Lexer::with_config(reader, config))
}

fn lex_with<R: Read>(mut lexer: Lexer<R>) -> LexOutput {
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }
    LexOutput {
        tokens,
        errors: lexer.take_errors(),
    }
}
