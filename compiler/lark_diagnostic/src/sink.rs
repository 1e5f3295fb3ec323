//! Where diagnostics go.

use crate::{Diagnostic, ErrorGuaranteed};

/// Receiver for diagnostics.
///
/// The lexer and parser only ever talk to this trait; whether diagnostics
/// are queued, printed or counted is up to the implementor.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report an error and get proof that it was reported.
    fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        self.report(diagnostic);
        ErrorGuaranteed::new()
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
