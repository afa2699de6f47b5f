//! Diagnostic system for rich error reporting.
//!
//! A [`Diagnostic`] carries:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - labels saying where (source [`Position`]s)
//! - notes and suggestions saying why and how to fix it
//!
//! Producers build diagnostics; an [`emitter::DiagnosticEmitter`] renders
//! them.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use ree_lexer_core::Position;
