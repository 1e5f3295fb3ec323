//! String literals and interpolations.
//!
//! An interpolated literal is split into segments by the lexer. Each
//! `\( ... )` segment is parsed by swapping in a cursor confined to the
//! segment's expression range, which starts at `(` and stops before the
//! matching `)`. That cursor's end-of-input reads as `)`, so the argument
//! list closes on it like any other list.

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{ExprId, ExprKind, Span, TokenKind};
use lark_lexer::{has_interpolation, segment_string_literal, Lexer, StringSegment};

use crate::list::ListConfig;
use crate::stack::ensure_sufficient_stack;
use crate::{Cursor, Parser};

impl Parser<'_, '_> {
    pub(crate) fn parse_string_literal(&mut self) -> ExprId {
        let token = self.cursor.current();
        let span = self.cursor.advance();
        if token.is(TokenKind::UnterminatedString) {
            self.emit(
                Diagnostic::error(ErrorCode::E0001)
                    .with_message("unterminated string literal")
                    .with_label(span, "missing closing `\"`")
                    .with_fix("insert `\"`", span.end_point(), "\""),
            );
        }

        let segments = segment_string_literal(self.cursor.buffer(), token);
        if !has_interpolation(&segments) {
            return self.module.arena.alloc_expr(ExprKind::Str, span);
        }

        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            let part = match segment {
                StringSegment::Literal { span } => self.module.arena.alloc_expr(ExprKind::Str, span),
                StringSegment::Interpolation { .. } => self.parse_interpolation(segment),
            };
            parts.push(part);
        }
        self.module
            .arena
            .alloc_expr(ExprKind::Interpolated(parts), span)
    }

    /// Parse one `\( ... )` segment with its own cursor.
    fn parse_interpolation(&mut self, segment: StringSegment) -> ExprId {
        let Some(range) = segment.expr_range() else {
            return self.module.arena.alloc_expr(ExprKind::Error, segment.span());
        };
        let inner = Cursor::new(Lexer::with_range(self.cursor.buffer(), range));
        let outer = std::mem::replace(&mut self.cursor, inner);
        let expr = ensure_sufficient_stack(|| self.parse_interpolation_list(segment.span()));
        self.cursor = outer;
        expr
    }

    fn parse_interpolation_list(&mut self, whole: Span) -> ExprId {
        let Ok(open) = self.parse_token(TokenKind::LParen, "a string interpolation") else {
            return self.module.arena.alloc_expr(ExprKind::Error, whole);
        };
        let config = ListConfig::comma(TokenKind::RParen, "a string interpolation");
        let (mut exprs, _) = self.parse_expr_list(open, config);

        if !self.cursor.is_at_end() {
            let extra = Span::new(self.cursor.current_span().start, self.cursor.range().end);
            self.emit(
                Diagnostic::error(ErrorCode::E1010)
                    .with_message("unexpected tokens in string interpolation")
                    .with_label(extra, "not part of the interpolated expression"),
            );
        }

        match exprs.len() {
            1 => exprs.remove(0),
            _ => self.module.arena.alloc_expr(ExprKind::Tuple(exprs), whole),
        }
    }
}
