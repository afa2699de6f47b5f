//! Command handlers for the `reec` CLI.
//!
//! Each submodule implements one command. Sources are streamed into the
//! lexer straight from the file (or stdin), never read up front.

use std::fs::File;
use std::io::{self, Read};

mod check;
mod lex;

pub use check::{check_file, check_source, CheckSummary};
pub use lex::{dump_tokens, lex_file};

/// Path argument that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Open `path` for streaming (`-` is stdin).
///
/// Prints a readable message and exits on failure.
pub(crate) fn open_source(path: &str) -> Box<dyn Read> {
    if path == STDIN_PATH {
        return Box::new(io::stdin());
    }
    match File::open(path) {
        Ok(file) => Box::new(file),
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Name used for `path` in diagnostics.
pub(crate) fn source_name(path: &str) -> &str {
    if path == STDIN_PATH {
        "<stdin>"
    } else {
        path
    }
}
