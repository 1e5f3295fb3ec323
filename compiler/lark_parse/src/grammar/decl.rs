//! Declarations: `func`, `var`/`let`, `struct`, `import`.

use lark_diagnostic::{unexpected_token, Diagnostic, ErrorCode};
use lark_ir::{
    BodyState, DeclId, DeclKind, FuncBody, FuncDecl, ImportDecl, Name, Param, Span, StructDecl,
    TokenKind, VarDecl,
};
use tracing::debug;

use crate::list::ListConfig;
use crate::recovery::DECL_START;
use crate::{Parser, Position};

impl Parser<'_, '_> {
    /// Parse a declaration, including a leading modifier.
    pub(crate) fn parse_decl(&mut self) -> DeclId {
        let start = self.cursor.current_span();
        if !DECL_START.contains(self.cursor.current_kind()) && self.cursor.is_start_of_decl() {
            // `public` / `private`
            self.cursor.advance();
        }
        match self.cursor.current_kind() {
            TokenKind::Func => self.parse_func(start),
            TokenKind::Var | TokenKind::Let => self.parse_var(start),
            TokenKind::Struct => self.parse_struct(start),
            TokenKind::Import => self.parse_import(start),
            _ => {
                let found = self.found_text();
                self.emit(unexpected_token(self.cursor.current_span(), "a declaration", found));
                let span = self.span_from(start);
                self.module.alloc_decl(DeclKind::Error, span)
            }
        }
    }

    fn parse_func(&mut self, start: Span) -> DeclId {
        self.cursor.advance();
        let name = self
            .parse_any_identifier("after `func`")
            .map_or(Name::EMPTY, |(name, _)| name);

        let params = if self.cursor.check(TokenKind::LParen) {
            self.parse_params()
        } else {
            let found = self.found_text();
            self.emit(unexpected_token(self.cursor.current_span(), "`(`", found));
            Vec::new()
        };
        let result = if self.cursor.eat(TokenKind::Arrow) {
            self.parse_type()
        } else {
            None
        };

        let body = self.parse_func_body();
        let span = self.span_from(start);
        let (body, delayed) = match body {
            Some((body, delayed)) => (Some(body), delayed),
            None => (None, None),
        };
        let id = self.module.alloc_decl(
            DeclKind::Func(FuncDecl {
                name,
                params,
                result,
                body,
            }),
            span,
        );
        if let Some(position) = delayed {
            self.record_delayed(id, position, span);
        }
        id
    }

    /// The body of a function, or the position to parse it from later.
    fn parse_func_body(&mut self) -> Option<(FuncBody, Option<Position>)> {
        if !self.cursor.check(TokenKind::LBrace) {
            let found = self.found_text();
            self.emit(
                Diagnostic::error(ErrorCode::E1008)
                    .with_message(format!("expected function body, found `{found}`"))
                    .with_label(self.cursor.current_span(), "expected `{` here"),
            );
            return None;
        }

        if self.body_depth == 0 && !self.session.options.delay_policy.never_delays() {
            let position = self.cursor.snapshot();
            let open = self.cursor.current_span();
            self.cursor.skip_single(false);
            let span = self.span_from(open);
            if self.session.options.delay_policy.delay_body(span) {
                debug!(?span, "delaying function body");
                let body = FuncBody {
                    span,
                    state: BodyState::Unparsed,
                };
                return Some((body, Some(position)));
            }
            self.cursor.rewind(position);
        }

        let block = self.parse_block();
        let body = FuncBody {
            span: self.module.arena.block(block).span,
            state: BodyState::Parsed(block),
        };
        Some((body, None))
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let open = self.cursor.advance();
        let mut params = Vec::new();
        let config = ListConfig::comma(TokenKind::RParen, "a parameter list");
        let _ = self.parse_list(config, open, |p| {
            let before = p.error_count();
            if let Ok((name, span)) = p.parse_identifier("in parameter list") {
                let ty = if p.cursor.eat(TokenKind::Colon) {
                    p.parse_type()
                } else {
                    None
                };
                params.push(Param {
                    name,
                    ty,
                    span: p.span_from(span),
                });
            }
            p.status_since(before)
        });
        params
    }

    fn parse_var(&mut self, start: Span) -> DeclId {
        let mutable = self.cursor.check(TokenKind::Var);
        self.cursor.advance();
        let name = self
            .parse_identifier("in variable declaration")
            .map_or(Name::EMPTY, |(name, _)| name);
        let ty = if self.cursor.eat(TokenKind::Colon) {
            self.parse_type()
        } else {
            None
        };
        let init = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_expr())
        } else {
            None
        };
        let span = self.span_from(start);
        self.module.alloc_decl(
            DeclKind::Var(VarDecl {
                name,
                mutable,
                ty,
                init,
            }),
            span,
        )
    }

    fn parse_struct(&mut self, start: Span) -> DeclId {
        self.cursor.advance();
        let name = self
            .parse_identifier("after `struct`")
            .map_or(Name::EMPTY, |(name, _)| name);

        let mut members = Vec::new();
        if let Ok(open) = self.parse_token(TokenKind::LBrace, "a struct body") {
            while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
                if self.cursor.is_start_of_decl() {
                    members.push(self.parse_decl());
                    continue;
                }
                let found = self.found_text();
                self.emit(unexpected_token(
                    self.cursor.current_span(),
                    "a member declaration",
                    found,
                ));
                if self.cursor.skip_until_decl_rbrace() == 0 {
                    self.cursor.skip_single(false);
                }
            }
            let _ = self.parse_matching_token(TokenKind::RBrace, open);
        }

        let span = self.span_from(start);
        self.module
            .alloc_decl(DeclKind::Struct(StructDecl { name, members }), span)
    }

    fn parse_import(&mut self, start: Span) -> DeclId {
        self.cursor.advance();
        let mut path = Vec::new();
        loop {
            match self.parse_identifier("in import path") {
                Ok((name, _)) => path.push(name),
                Err(_) => break,
            }
            if !self.cursor.eat(TokenKind::Dot) {
                break;
            }
        }
        let span = self.span_from(start);
        self.module
            .alloc_decl(DeclKind::Import(ImportDecl { path }), span)
    }
}
