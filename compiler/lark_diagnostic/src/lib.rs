//! Diagnostic system for rich error reporting.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Context labels (why it's wrong)
//! - Fix-its (how to fix)
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that an error was reported. The
//! only way to get one is through `DiagnosticSink::emit_error`, so parser
//! functions returning `Result<T, ErrorGuaranteed>` cannot fail silently.

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod queue;
mod sink;

pub use diagnostic::{
    expected_expression, expected_identifier, expected_separator, unclosed_delimiter,
    unexpected_separator, unexpected_token, Diagnostic, Label, Substitution, Suggestion,
};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use sink::DiagnosticSink;
