//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of errors reported twice at the same place
//! - `ErrorGuaranteed` proof that errors were emitted

use std::collections::HashSet;

use lark_ir::Span;

use crate::{Diagnostic, DiagnosticSink, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error whose code and primary span match an earlier one.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// parse(&mut queue, ...);
/// for diag in queue.flush() { emitter.emit(&diag) }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    /// Set once the limit diagnostic has been queued.
    limit_reported: bool,
    seen: HashSet<(ErrorCode, Span)>,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic. Returns `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            if !self.limit_reported {
                self.limit_reported = true;
                let span = diag.primary_span().unwrap_or(Span::DUMMY);
                self.diagnostics
                    .push(too_many_errors(self.config.error_limit, span));
            }
            return false;
        }

        if self.config.deduplicate {
            if let Some(span) = diag.primary_span() {
                if !self.seen.insert((diag.code, span)) {
                    return false;
                }
            }
        }

        self.error_count += 1;
        self.diagnostics.push(diag);
        true
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Proof that errors were emitted, if any were.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Diagnostics in report order, without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by position and return them, clearing the queue.
    ///
    /// Offsets are global, so sorting by offset also groups by buffer.
    /// The sort is stable: diagnostics at the same offset keep report order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result = std::mem::take(&mut self.diagnostics);
        result.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |s| s.start));
        self.error_count = 0;
        self.limit_reported = false;
        self.seen.clear();
        result
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} errors"))
        .with_label(span, "error limit reached here")
}
