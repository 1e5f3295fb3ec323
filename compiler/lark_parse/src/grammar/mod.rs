//! Grammar productions.
//!
//! Every production is an `impl Parser` block method. Productions always
//! return a node: when they fail they report a diagnostic and build an
//! `Error` node, so callers only decide how far to resynchronize.
//!
//! - `mod.rs`: file-scope items and top-level code
//! - `decl.rs`: `func`, `var`/`let`, `struct`, `import`
//! - `stmt.rs`: blocks and statements
//! - `expr.rs`: expressions
//! - `string.rs`: string literals and interpolations
//! - `ty.rs`: type references

mod decl;
mod expr;
mod stmt;
mod string;
mod ty;

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{BlockId, BodyState, DeclId, DeclKind, Span, TokenKind, TopLevelCodeDecl};
use tracing::debug;

use crate::{Parser, Position};

impl Parser<'_, '_> {
    /// Parse file-scope items until end of input.
    pub fn parse_items(&mut self) {
        while !self.cursor.is_at_end() {
            self.parse_item();
        }
    }

    /// Parse one file-scope item.
    ///
    /// Returns `None` when the tokens consumed did not form an item, as with
    /// a stray `}`.
    pub fn parse_item(&mut self) -> Option<DeclId> {
        let before = self.cursor.current_span().start;
        let item = if self.cursor.check(TokenKind::RBrace) {
            let span = self.cursor.advance();
            self.emit(
                Diagnostic::error(ErrorCode::E1009)
                    .with_message("extraneous `}` at file scope")
                    .with_label(span, "no matching `{`")
                    .with_fix("remove this `}`", span, ""),
            );
            None
        } else if self.cursor.is_start_of_decl() {
            Some(self.parse_decl())
        } else {
            Some(self.parse_top_level_code())
        };
        if let Some(id) = item {
            self.module.push_item(id);
        }

        if self.cursor.current_span().start == before && !self.cursor.is_at_end() {
            self.cursor.skip_until_decl_stmt_rbrace(false);
        }
        item
    }

    /// A statement written at file scope.
    ///
    /// Under a policy that wants it, the statement is first skipped to find
    /// its extent (up to the next line-start token), and may become the
    /// session's one delayed top-level entry.
    fn parse_top_level_code(&mut self) -> DeclId {
        if self.session.options.delay_policy.wants_top_level() {
            let position = self.cursor.snapshot();
            let span = self.skip_top_level_stmt();
            if self.session.options.delay_policy.delay_top_level(span)
                && !self.session.state.has_pending_top_level_entry()
            {
                let id = self.module.alloc_decl(
                    DeclKind::TopLevelCode(TopLevelCodeDecl {
                        body: BodyState::Unparsed,
                    }),
                    span,
                );
                match self.session.state.delay_top_level(id, position) {
                    Ok(()) => {
                        debug!(?span, "delaying top-level code");
                        return id;
                    }
                    Err(err) => {
                        self.internal_error(span, &err);
                        self.cursor.rewind(position);
                        let block = self.parse_top_level_stmts(span);
                        self.module.set_body_state(id, BodyState::Parsed(block));
                        return id;
                    }
                }
            }
            self.cursor.rewind(position);
        }

        let stmt = self.parse_stmt();
        let span = self.module.arena.stmt(stmt).span;
        let block = self.module.arena.alloc_block(vec![stmt], span);
        self.module.alloc_decl(
            DeclKind::TopLevelCode(TopLevelCodeDecl {
                body: BodyState::Parsed(block),
            }),
            span,
        )
    }

    /// Skip balanced units to the next line-start token or `}`.
    fn skip_top_level_stmt(&mut self) -> Span {
        let start = self.cursor.current_span();
        loop {
            self.cursor.skip_single(false);
            let current = self.cursor.current();
            if self.cursor.is_at_end() || current.is_at_line_start() || current.is(TokenKind::RBrace)
            {
                break;
            }
        }
        self.span_from(start)
    }

    /// Statements starting before `span.end`, as one block.
    pub(crate) fn parse_top_level_stmts(&mut self, span: Span) -> BlockId {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() && self.cursor.current_span().start < span.end {
            let before = self.cursor.current_span().start;
            stmts.push(self.parse_stmt());
            if self.cursor.current_span().start == before && !self.cursor.is_at_end() {
                self.cursor.skip_until_decl_stmt_rbrace(false);
            }
        }
        self.module.arena.alloc_block(stmts, span)
    }

    /// Remember where a delayed body starts, for the delayed pass.
    pub(crate) fn record_delayed(&mut self, id: DeclId, position: Position, span: Span) {
        if let Err(err) = self.session.state.record_position(id, position) {
            self.internal_error(span, &err);
        }
    }

    pub(crate) fn internal_error(&mut self, span: Span, err: &dyn std::error::Error) {
        self.emit(
            Diagnostic::error(ErrorCode::E9001)
                .with_message(format!("internal parser error: {err}"))
                .with_label(span, "while parsing this"),
        );
    }

    /// From `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        let previous = self.cursor.previous_span();
        if previous.end <= start.start {
            Span::point(start.start)
        } else {
            Span::new(start.start, previous.end)
        }
    }
}
