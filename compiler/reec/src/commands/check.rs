//! The `check` command: lex a source and report every problem.

use std::io::{self, IsTerminal, Read};

use ree_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use ree_diagnostic::Diagnostic;
use ree_lexer::lex_reader;

use crate::problem::render_lex_error;

use super::{open_source, source_name};

/// Counts from one `check` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Tokens produced, end-of-input included.
    pub tokens: usize,
    pub errors: usize,
}

impl CheckSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Lex everything `reader` yields and emit a diagnostic per problem,
/// followed by the summary line.
pub fn check_source<R: Read, E: DiagnosticEmitter>(reader: R, emitter: &mut E) -> CheckSummary {
    let output = lex_reader(reader);
    let diagnostics: Vec<Diagnostic> = output.errors.iter().map(render_lex_error).collect();

    let summary = CheckSummary {
        tokens: output.tokens.len(),
        errors: diagnostics.len(),
    };
    tracing::debug!(?summary, "check finished");

    emitter.emit_all(&diagnostics);
    emitter.emit_summary(summary.errors);
    emitter.flush();
    summary
}

/// Check a file, exiting with status 1 when it has errors.
pub fn check_file(path: &str, color: ColorMode) {
    let source = open_source(path);
    let name = source_name(path);

    let is_tty = io::stderr().is_terminal();
    let mut emitter =
        TerminalEmitter::with_color_mode(io::stderr(), color, is_tty).with_source_name(name);

    let summary = check_source(source, &mut emitter);
    if summary.has_errors() {
        std::process::exit(1);
    }
    println!("{name}: {} tokens, no errors", summary.tokens);
}
