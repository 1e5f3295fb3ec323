//! Bracketed, separated lists.
//!
//! Call arguments, parameters, tuple and array literals, and the
//! expression list inside a string interpolation all go through
//! [`Parser::parse_list`]. The loop tolerates stray and missing
//! separators and never spins: a missing separator is reported and
//! parsing goes on as if it were there, while an iteration that consumes
//! nothing resynchronizes on the next separator, closer or declaration.

use lark_diagnostic::{expected_separator, unexpected_separator};
use lark_ir::{Span, TokenKind};
use tracing::debug;

use crate::{ParseStatus, Parser};

/// Shape of a list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub close: TokenKind,
    pub separator: TokenKind,
    /// A separator may follow the last element.
    pub allow_trailing: bool,
    /// Elements may follow each other without a separator.
    pub separator_optional: bool,
    /// Named in the note on an unclosed list.
    pub context: &'static str,
}

impl ListConfig {
    /// A comma-separated list closed by `close`.
    pub fn comma(close: TokenKind, context: &'static str) -> Self {
        ListConfig {
            close,
            separator: TokenKind::Comma,
            allow_trailing: true,
            separator_optional: false,
            context,
        }
    }

    /// A semicolon-separated list closed by `close`.
    pub fn semi(close: TokenKind, context: &'static str) -> Self {
        ListConfig {
            separator: TokenKind::Semicolon,
            ..Self::comma(close, context)
        }
    }

    #[must_use]
    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }

    #[must_use]
    pub fn separator_optional(mut self, optional: bool) -> Self {
        self.separator_optional = optional;
        self
    }
}

/// Result of parsing a list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListOutcome {
    /// The closer, or where it should have been.
    pub right: Span,
    pub status: ParseStatus,
    /// Element slots: each element parsed plus each empty slot left by a
    /// stray separator.
    pub elements: usize,
}

impl Parser<'_, '_> {
    /// Parse list elements up to and including the closer.
    ///
    /// The opener at `open` has already been consumed. `element` parses one
    /// element and reports whether it hit an error; an error marks the
    /// list as failed but parsing continues with the next element.
    pub fn parse_list(
        &mut self,
        config: ListConfig,
        open: Span,
        mut element: impl FnMut(&mut Self) -> ParseStatus,
    ) -> ListOutcome {
        let mut status = ParseStatus::Success;
        let mut elements = 0;

        if self.cursor.check(config.close) {
            let right = self.cursor.advance();
            return ListOutcome {
                right,
                status,
                elements,
            };
        }
        if self.at_implicit_close(config.close) {
            return ListOutcome {
                right: self.cursor.current_span(),
                status,
                elements,
            };
        }

        let separator_text = config.separator.fixed_text().unwrap_or(",");
        loop {
            while self.cursor.check(config.separator) {
                let span = self.cursor.advance();
                self.emit(unexpected_separator(span, separator_text));
                elements += 1;
            }
            if self.cursor.check(config.close) || self.at_implicit_close(config.close) {
                break;
            }

            let start = self.cursor.current_span().start;
            status = status.merge(element(self));
            elements += 1;

            if self.cursor.check(config.close) || self.at_implicit_close(config.close) {
                break;
            }

            if self.cursor.eat(config.separator) {
                if !self.cursor.check(config.close) && !self.at_implicit_close(config.close) {
                    continue;
                }
                if !config.allow_trailing {
                    let span = self.cursor.previous_span();
                    self.emit(unexpected_separator(span, separator_text));
                }
                break;
            }

            let current = self.cursor.current();
            if current.is_at_line_start()
                && (current.is(TokenKind::RBrace)
                    || self.cursor.is_start_of_decl()
                    || self.cursor.is_start_of_stmt())
            {
                break;
            }
            if self.cursor.is_at_end() {
                break;
            }

            // The marker is left to the element, which reports the completion.
            if !config.separator_optional && !current.is(TokenKind::CodeComplete) {
                let insert_at = self.cursor.previous_end();
                self.emit(expected_separator(current.span, insert_at, separator_text));
                status.set_error();
            }

            // `}` never starts an element.
            if self.cursor.current_span().start == start || current.is(TokenKind::RBrace) {
                debug!(
                    offset = self.cursor.current_span().start,
                    close = ?config.close,
                    "list made no progress; resynchronizing"
                );
                self.cursor
                    .skip_list_until_decl_rbrace(config.close, config.separator);
                if self.cursor.check(config.close) || !self.cursor.check(config.separator) {
                    break;
                }
                self.cursor.advance();
            }
        }

        let right = if status.is_error() {
            if self.cursor.check(config.close) {
                self.cursor.advance()
            } else if self.at_implicit_close(config.close) {
                self.cursor.current_span()
            } else {
                self.cursor.previous_end()
            }
        } else {
            match self.expect_closer(config.close, open, Some(config.context)) {
                Ok(right) => right,
                Err(_) => {
                    status.set_error();
                    self.cursor.previous_end()
                }
            }
        };

        ListOutcome {
            right,
            status,
            elements,
        }
    }
}
