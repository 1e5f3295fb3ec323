//! Type references: `Int`, `Array<Int>`, `Map<String, Array<Int>>`.

use lark_diagnostic::{unexpected_token, Diagnostic, ErrorCode};
use lark_ir::{TokenKind, TypeRef};

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_, '_> {
    /// Parse a type, or report `E1007` and return `None`.
    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
        ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Option<TypeRef> {
        if !self.cursor.check(TokenKind::Ident) {
            let found = self.found_text();
            self.emit(
                Diagnostic::error(ErrorCode::E1007)
                    .with_message(format!("expected type, found `{found}`"))
                    .with_label(self.cursor.current_span(), "expected type here"),
            );
            return None;
        }
        let name = self.intern(self.cursor.current_text());
        let start = self.cursor.advance();

        let mut args = Vec::new();
        if self.cursor.check_starting_less() {
            self.cursor.consume_starting_less();
            loop {
                match self.parse_type() {
                    Some(arg) => args.push(arg),
                    None => break,
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            // `>>` closes two lists; the split leaves the second `>` current.
            if self.cursor.check_starting_greater() {
                self.cursor.consume_starting_greater();
            } else {
                let found = self.found_text();
                self.emit(unexpected_token(self.cursor.current_span(), "`>`", found));
            }
        }

        Some(TypeRef {
            name,
            args,
            span: self.span_from(start),
        })
    }
}
