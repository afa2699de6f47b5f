//! Ree toolchain driver.
//!
//! ```text
//! bytes ──► ree_lexer::Lexer ──► Token stream     (reec lex)
//!                  │
//!                  └──► LexError ──► problem ──► Diagnostic ──► TerminalEmitter
//!                                                               (reec check)
//! ```

pub mod commands;
pub mod problem;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the `tracing` subscriber.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call counts.
/// Use `RUST_LOG=ree_lexer=trace` to watch the mode stack.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
