//! The `lex` command: dump the token stream of a source.

use std::io::{self, Read, Write};

use ree_lexer::{LexError, Lexer};

use super::{open_source, source_name};

/// Write one line per token (the final end-of-input included) and return
/// the lexical errors found.
pub fn dump_tokens<R: Read, W: Write>(reader: R, out: &mut W) -> io::Result<Vec<LexError>> {
    let mut lexer = Lexer::new(reader);
    loop {
        let token = lexer.next_token();
        writeln!(out, "{token}")?;
        if token.is_eof() {
            break;
        }
    }
    out.flush()?;
    Ok(lexer.take_errors())
}

/// Lex a file and print its tokens, then its errors on stderr.
pub fn lex_file(path: &str) {
    let source = open_source(path);
    let stdout = io::stdout();
    let errors = match dump_tokens(source, &mut stdout.lock()) {
        Ok(errors) => errors,
        Err(e) => {
            eprintln!("error writing tokens: {e}");
            std::process::exit(1);
        }
    };

    let name = source_name(path);
    for error in &errors {
        eprintln!("{name}:{}: {error}", error.position);
    }
    if !errors.is_empty() {
        std::process::exit(1);
    }
}
