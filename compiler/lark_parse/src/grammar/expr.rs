//! Expressions.
//!
//! Binary operators are a flat left fold: the operator spelling is kept and
//! precedence is left to a later pass. An operator at the start of a line
//! begins a new statement instead of continuing the expression.

use lark_diagnostic::{expected_expression, Diagnostic, ErrorCode};
use lark_ir::{ExprId, ExprKind, Name, Span, TokenKind};
use lark_lexer::Lexer;

use crate::list::{ListConfig, ListOutcome};
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_, '_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ExprId {
        ensure_sufficient_stack(|| self.parse_binary())
    }

    fn parse_binary(&mut self) -> ExprId {
        let mut lhs = self.parse_unary();
        while self.cursor.check(TokenKind::Operator) && !self.cursor.current().is_at_line_start() {
            let op = self.intern(self.cursor.current_text());
            self.cursor.advance();
            let rhs = self.parse_unary();
            let span = self.expr_span(lhs).merge(self.expr_span(rhs));
            lhs = self
                .module
                .arena
                .alloc_expr(ExprKind::Binary { op, lhs, rhs }, span);
        }
        lhs
    }

    fn parse_unary(&mut self) -> ExprId {
        if !self.cursor.check(TokenKind::Operator) {
            return self.parse_postfix();
        }
        let start = self.cursor.current_span();
        let op = self.intern(self.cursor.current_text());
        self.cursor.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary());
        let span = start.merge(self.expr_span(operand));
        self.module
            .arena
            .alloc_expr(ExprKind::Unary { op, operand }, span)
    }

    fn parse_postfix(&mut self) -> ExprId {
        let mut expr = self.parse_primary();
        loop {
            let current = self.cursor.current();
            match current.kind {
                TokenKind::LParen if !current.is_at_line_start() => {
                    let open = self.cursor.advance();
                    let config = ListConfig::comma(TokenKind::RParen, "an argument list");
                    let (args, outcome) = self.parse_expr_list(open, config);
                    let span = self.expr_span(expr).merge(outcome.right);
                    expr = self
                        .module
                        .arena
                        .alloc_expr(ExprKind::Call { callee: expr, args }, span);
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    if self.cursor.check(TokenKind::CodeComplete) {
                        let at = self.cursor.advance();
                        if let Some(callbacks) = self.completion.as_deref_mut() {
                            callbacks.complete_member(expr, at);
                        }
                        let span = self.expr_span(expr).merge(at);
                        expr = self.module.arena.alloc_expr(
                            ExprKind::Member {
                                base: expr,
                                name: Name::EMPTY,
                            },
                            span,
                        );
                        continue;
                    }
                    let Ok((name, name_span)) = self.parse_identifier("after `.`") else {
                        let span = self.expr_span(expr).merge(self.cursor.previous_span());
                        return self.module.arena.alloc_expr(ExprKind::Error, span);
                    };
                    let span = self.expr_span(expr).merge(name_span);
                    expr = self
                        .module
                        .arena
                        .alloc_expr(ExprKind::Member { base: expr, name }, span);
                }
                _ => return expr,
            }
        }
    }

    fn parse_primary(&mut self) -> ExprId {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Ident => {
                let name = self.intern(self.cursor.current_text());
                ExprKind::Ident(name)
            }
            TokenKind::Int => ExprKind::Int,
            TokenKind::Float => ExprKind::Float,
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::StringLiteral | TokenKind::UnterminatedString => {
                return self.parse_string_literal();
            }
            TokenKind::LParen => return self.parse_paren_or_tuple(),
            TokenKind::LBracket => {
                let open = self.cursor.advance();
                let config = ListConfig::comma(TokenKind::RBracket, "an array literal");
                let (elements, outcome) = self.parse_expr_list(open, config);
                let span = open.merge(outcome.right);
                return self.module.arena.alloc_expr(ExprKind::Array(elements), span);
            }
            TokenKind::CodeComplete => {
                if let Some(callbacks) = self.completion.as_deref_mut() {
                    callbacks.complete_expr(token.span);
                }
                ExprKind::CodeCompletion
            }
            TokenKind::Unknown => {
                let text = self.cursor.current_text();
                self.emit(
                    Diagnostic::error(ErrorCode::E0002)
                        .with_message(format!("unknown character `{}`", text.escape_debug()))
                        .with_label(token.span, "not valid here"),
                );
                ExprKind::Error
            }
            TokenKind::Func
            | TokenKind::Var
            | TokenKind::Let
            | TokenKind::Struct
            | TokenKind::Import
            | TokenKind::Return
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Dot
            | TokenKind::Arrow
            | TokenKind::Eq
            | TokenKind::Backslash
            | TokenKind::Operator
            | TokenKind::LineComment
            | TokenKind::Eof => {
                let found = self.found_text();
                self.emit(expected_expression(token.span, found));
                return self
                    .module
                    .arena
                    .alloc_expr(ExprKind::Error, Span::point(token.span.start));
            }
        };
        self.cursor.advance();
        self.module.arena.alloc_expr(kind, token.span)
    }

    /// `(e)` is a parenthesized expression; `()`, `(e,)` and `(a, b)` are
    /// tuples.
    fn parse_paren_or_tuple(&mut self) -> ExprId {
        let open = self.cursor.advance();
        let config = ListConfig::comma(TokenKind::RParen, "a parenthesized expression");
        let (elements, outcome) = self.parse_expr_list(open, config);
        let span = open.merge(outcome.right);
        let paren = match elements.as_slice() {
            [only] if !self.comma_between(self.expr_span(*only), outcome.right) => Some(*only),
            _ => None,
        };
        let kind = match paren {
            Some(inner) => ExprKind::Paren(inner),
            None => ExprKind::Tuple(elements),
        };
        self.module.arena.alloc_expr(kind, span)
    }

    /// Comma-separated expressions up to `config.close`.
    pub(crate) fn parse_expr_list(
        &mut self,
        open: Span,
        config: ListConfig,
    ) -> (Vec<ExprId>, ListOutcome) {
        let mut exprs = Vec::new();
        let outcome = self.parse_list(config, open, |p| {
            let before = p.error_count();
            exprs.push(p.parse_expr());
            p.status_since(before)
        });
        (exprs, outcome)
    }

    /// Whether the first token between `after` and `close` is a comma.
    fn comma_between(&self, after: Span, close: Span) -> bool {
        if close.start < after.end {
            return false;
        }
        let lexer = Lexer::with_range(self.cursor.buffer(), Span::new(after.end, close.start));
        lexer.peek_token(lexer.initial_state()).is(TokenKind::Comma)
    }

    #[inline]
    pub(crate) fn expr_span(&self, id: ExprId) -> Span {
        self.module.arena.expr(id).span
    }
}
