//! Keyword table.
//!
//! Built once per process and shared read-only by every lexer.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::token::Keyword;

/// Every accepted spelling. `λ` is an alias for `lambda`.
const SPELLINGS: &[(&str, Keyword)] = &[
    ("type", Keyword::Type),
    ("let", Keyword::Let),
    ("let*", Keyword::LetRec),
    ("if", Keyword::If),
    ("cond", Keyword::Cond),
    ("else", Keyword::Else),
    ("define", Keyword::Define),
    ("lambda", Keyword::Lambda),
    ("λ", Keyword::Lambda),
    ("match", Keyword::Match),
];

static KEYWORDS: OnceLock<FxHashMap<&'static str, Keyword>> = OnceLock::new();

fn table() -> &'static FxHashMap<&'static str, Keyword> {
    KEYWORDS.get_or_init(|| SPELLINGS.iter().copied().collect())
}

/// Look up a keyword by its exact spelling.
#[inline]
pub fn lookup(text: &str) -> Option<Keyword> {
    table().get(text).copied()
}
