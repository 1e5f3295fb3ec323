//! Hooks for code completion.
//!
//! A completion request is a parse over a buffer containing the completion
//! marker. The grammar calls back into these hooks when it reaches the
//! marker, and the delayed engine reports each finished body.

use lark_ir::{ExprId, Module, Span};

/// Receives completion events from one delayed parse.
pub trait CompletionCallbacks {
    /// The marker stands where an expression was expected.
    fn complete_expr(&mut self, at: Span);

    /// The marker follows `base.`.
    fn complete_member(&mut self, base: ExprId, at: Span) {
        let _ = base;
        self.complete_expr(at);
    }

    /// Called once the delayed body containing the marker has been parsed.
    fn done_parsing(&mut self, module: &Module);
}

/// Creates a fresh set of callbacks for each delayed parse.
pub trait CompletionCallbacksFactory {
    fn create_callbacks(&mut self) -> Box<dyn CompletionCallbacks + '_>;
}
