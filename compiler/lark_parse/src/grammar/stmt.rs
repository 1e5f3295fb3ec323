//! Blocks and statements.

use lark_diagnostic::expected_separator;
use lark_ir::{BlockId, ExprId, ExprKind, StmtId, StmtKind, TokenKind};

use crate::Parser;

impl Parser<'_, '_> {
    /// Parse `{ stmt* }`.
    ///
    /// Declarations inside a block are never delayed.
    pub(crate) fn parse_block(&mut self) -> BlockId {
        let Ok(open) = self.parse_token(TokenKind::LBrace, "a block") else {
            let at = self.cursor.previous_end();
            return self.module.arena.alloc_block(Vec::new(), at);
        };

        self.body_depth += 1;
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            let before = self.cursor.current_span().start;
            stmts.push(self.parse_stmt());
            if self.cursor.current_span().start == before && !self.cursor.is_at_end() {
                self.cursor.skip_until_decl_stmt_rbrace(false);
            }
        }
        self.body_depth -= 1;

        let span = match self.parse_matching_token(TokenKind::RBrace, open) {
            Ok(close) => open.merge(close),
            Err(_) => self.span_from(open),
        };
        self.module.arena.alloc_block(stmts, span)
    }

    pub(crate) fn parse_stmt(&mut self) -> StmtId {
        let start = self.cursor.current_span();
        let errors = self.error_count();
        let kind = match self.cursor.current_kind() {
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.at_stmt_end() {
                    None
                } else {
                    Some(self.parse_expr())
                };
                StmtKind::Return(value)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_expr();
                let body = self.parse_block();
                StmtKind::While { cond, body }
            }
            _ if self.cursor.is_start_of_decl() => StmtKind::Decl(self.parse_decl()),
            _ => {
                let expr = self.parse_expr_or_assign();
                if matches!(self.module.arena.expr(expr).kind, ExprKind::Error)
                    && self.cursor.current_span().start == start.start
                {
                    StmtKind::Error
                } else {
                    StmtKind::Expr(expr)
                }
            }
        };

        if !self.cursor.eat(TokenKind::Semicolon)
            && !self.at_stmt_end()
            && self.status_since(errors).is_success()
        {
            let current = self.cursor.current_span();
            let insert_at = self.cursor.previous_end();
            self.emit(expected_separator(current, insert_at, ";"));
        }

        let span = self.span_from(start);
        self.module.arena.alloc_stmt(kind, span)
    }

    /// Whether the current token cannot continue the statement on its line.
    fn at_stmt_end(&self) -> bool {
        let current = self.cursor.current();
        current.is_at_line_start()
            || matches!(
                current.kind,
                TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
            )
    }

    fn parse_if(&mut self) -> StmtKind {
        self.cursor.advance();
        let cond = self.parse_expr();
        let then_block = self.parse_block();
        let else_block = if self.cursor.eat(TokenKind::Else) {
            if self.cursor.check(TokenKind::If) {
                let start = self.cursor.current_span();
                let nested = self.parse_if();
                let span = self.span_from(start);
                let stmt = self.module.arena.alloc_stmt(nested, span);
                Some(self.module.arena.alloc_block(vec![stmt], span))
            } else {
                Some(self.parse_block())
            }
        } else {
            None
        };
        StmtKind::If {
            cond,
            then_block,
            else_block,
        }
    }

    fn parse_expr_or_assign(&mut self) -> ExprId {
        let target = self.parse_expr();
        if !self.cursor.eat(TokenKind::Eq) {
            return target;
        }
        let value = self.parse_expr();
        let span = self
            .module
            .arena
            .expr(target)
            .span
            .merge(self.module.arena.expr(value).span);
        self.module
            .arena
            .alloc_expr(ExprKind::Assign { target, value }, span)
    }
}
