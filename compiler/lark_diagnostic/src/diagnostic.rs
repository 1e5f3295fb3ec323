//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`Label`] and [`Suggestion`]: the building
//! blocks that the lexer and parser use to report problems. Every
//! diagnostic is an error; recovery never downgrades a problem.

use lark_ir::Span;
use std::fmt;

use crate::ErrorCode;

/// A text substitution for a code fix.
///
/// An empty span inserts; an empty snippet removes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Substitution {
    pub span: Span,
    pub snippet: String,
}

impl Substitution {
    pub fn new(span: Span, snippet: impl Into<String>) -> Self {
        Substitution {
            span,
            snippet: snippet.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.span.is_empty()
    }

    pub fn is_removal(&self) -> bool {
        self.snippet.is_empty()
    }
}

/// A fix-it: a message plus the edits that implement it. Fix-its are
/// mechanical and safe to apply without review.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
    pub substitutions: Vec<Substitution>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>, span: Span, snippet: impl Into<String>) -> Self {
        Suggestion {
            message: message.into(),
            substitutions: vec![Substitution::new(span, snippet)],
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A rich diagnostic with all context needed for a good error message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub fixes: Vec<Suggestion>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            fixes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a fix-it.
    ///
    /// Pass a point span to insert `snippet`, or an empty snippet to remove
    /// the text under `span`.
    pub fn with_fix(
        mut self,
        message: impl Into<String>,
        span: Span,
        snippet: impl Into<String>,
    ) -> Self {
        self.fixes.push(Suggestion::new(message, span, snippet));
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for fix in &self.fixes {
            write!(f, "\n  = help: {}", fix.message)?;
        }

        Ok(())
    }
}

/// Create an "unexpected token" diagnostic.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!(
            "unexpected token: expected {expected}, found `{found}`"
        ))
        .with_label(span, format!("expected {expected}"))
}

/// Create an "expected expression" diagnostic.
pub fn expected_expression(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("expected expression, found `{found}`"))
        .with_label(span, "expected expression here")
}

/// Create an "unclosed delimiter" diagnostic.
pub fn unclosed_delimiter(open_span: Span, close_span: Span, delimiter: char) -> Diagnostic {
    let expected = match delimiter {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => delimiter,
    };
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("unclosed delimiter `{delimiter}`"))
        .with_label(close_span, format!("expected `{expected}`"))
        .with_secondary_label(open_span, format!("to match this opening `{delimiter}`"))
}

/// Create an "expected identifier" diagnostic.
pub fn expected_identifier(span: Span, found: &str, context: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004)
        .with_message(format!("expected identifier {context}, found `{found}`"))
        .with_label(span, "expected identifier here")
}

/// Create an "unexpected separator" diagnostic with a removal fix-it.
pub fn unexpected_separator(span: Span, separator: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1005)
        .with_message(format!("unexpected `{separator}` separator"))
        .with_label(span, "no element before this separator")
        .with_fix(format!("remove this `{separator}`"), span, "")
}

/// Create a "missing separator" diagnostic with an insertion fix-it.
///
/// `found` is the token that should have been the separator; `insert_at`
/// is the point just past the previous element.
pub fn expected_separator(found: Span, insert_at: Span, separator: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1006)
        .with_message(format!("expected `{separator}` separator"))
        .with_label(found, format!("expected `{separator}` before this"))
        .with_fix(format!("insert `{separator}`"), insert_at, separator)
}

#[cfg(test)]
mod tests;
