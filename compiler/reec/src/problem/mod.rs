//! Problem rendering.
//!
//! The lexer describes what went wrong as plain values ([`LexError`]); this
//! module turns them into user-facing [`Diagnostic`]s with error codes,
//! labels, notes and suggestions.
//!
//! [`LexError`]: ree_lexer::LexError
//! [`Diagnostic`]: ree_diagnostic::Diagnostic

pub mod lex;

pub use lex::render_lex_error;
