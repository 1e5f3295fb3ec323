//! Error recovery for the parser.
//!
//! Token sets for synchronization points, and skip operations that move the
//! cursor forward one balanced unit at a time until a boundary is found.
//!
//! Every skip loop consumes at least one token per iteration or stops, so
//! recovery is bounded by the number of tokens left in the range.

use lark_ir::TokenKind;
use tracing::debug;

use crate::stack::ensure_sufficient_stack;
use crate::Cursor;

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `TokenKind` discriminant index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

const _: () = assert!(TokenKind::COUNT <= 128, "TokenSet needs one bit per kind");

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u128 << kind.discriminant_index())
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }


    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Keywords that start a declaration.
pub const DECL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Func)
    .with(TokenKind::Var)
    .with(TokenKind::Let)
    .with(TokenKind::Struct)
    .with(TokenKind::Import);

/// Keywords that start a statement that is not a declaration.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Return)
    .with(TokenKind::If)
    .with(TokenKind::While);

/// Contextual modifiers that may precede a declaration keyword.
const DECL_MODIFIERS: [&str; 2] = ["public", "private"];

impl Cursor<'_> {
    /// Whether a declaration starts here, looking past one modifier.
    pub fn is_start_of_decl(&mut self) -> bool {
        if DECL_START.contains(self.current_kind()) {
            return true;
        }
        self.check(TokenKind::Ident)
            && DECL_MODIFIERS.contains(&self.current_text())
            && DECL_START.contains(self.peek().kind)
    }

    #[inline]
    pub fn is_start_of_stmt(&self) -> bool {
        STMT_START.contains(self.current_kind())
    }

    /// Skip one balanced unit.
    ///
    /// A bracket opener takes its whole group with it, closer included if
    /// present. `(` and `[` groups also stop at a `}` so an unbalanced paren
    /// cannot swallow the rest of the enclosing block. End of input and, if
    /// requested, the completion marker are never consumed.
    pub fn skip_single(&mut self, stop_at_code_complete: bool) {
        match self.current_kind() {
            TokenKind::Eof => {}
            TokenKind::CodeComplete if stop_at_code_complete => {}
            TokenKind::LParen => self.skip_group(
                TokenKind::RParen,
                TokenSet::single(TokenKind::RParen).with(TokenKind::RBrace),
                stop_at_code_complete,
            ),
            TokenKind::LBracket => self.skip_group(
                TokenKind::RBracket,
                TokenSet::single(TokenKind::RBracket).with(TokenKind::RBrace),
                stop_at_code_complete,
            ),
            TokenKind::LBrace => self.skip_group(
                TokenKind::RBrace,
                TokenSet::single(TokenKind::RBrace),
                stop_at_code_complete,
            ),
            _ => {
                self.advance();
            }
        }
    }

    fn skip_group(&mut self, close: TokenKind, stop: TokenSet, stop_at_code_complete: bool) {
        self.advance();
        ensure_sufficient_stack(|| self.skip_until(stop, stop_at_code_complete));
        self.eat(close);
    }

    /// Skip until the current token is in `targets`.
    ///
    /// Also stops at end of input, and at the completion marker if
    /// `stop_at_code_complete`. An empty target set skips nothing. Returns
    /// the number of units skipped.
    pub fn skip_until(&mut self, targets: TokenSet, stop_at_code_complete: bool) -> usize {
        if targets.is_empty() {
            return 0;
        }
        self.skip_while(stop_at_code_complete, |cursor| {
            !targets.contains(cursor.current_kind())
        })
    }

    /// Skip to a `}` or the start of a declaration.
    pub fn skip_until_decl_rbrace(&mut self) -> usize {
        self.skip_while(true, |cursor| {
            !cursor.check(TokenKind::RBrace) && !cursor.is_start_of_decl()
        })
    }

    /// Skip to a `}`, the start of a statement, or the start of a declaration.
    pub fn skip_until_decl_stmt_rbrace(&mut self, stop_at_code_complete: bool) -> usize {
        self.skip_while(stop_at_code_complete, |cursor| {
            !cursor.check(TokenKind::RBrace)
                && !cursor.is_start_of_stmt()
                && !cursor.is_start_of_decl()
        })
    }

    /// Skip a broken list element: to `close`, `separator`, a `}` or the
    /// start of a declaration. `var` and `let` only count as a declaration
    /// at the start of a line, since they may also name a list element.
    pub fn skip_list_until_decl_rbrace(&mut self, close: TokenKind, separator: TokenKind) -> usize {
        let targets = TokenSet::single(close)
            .with(separator)
            .with(TokenKind::RBrace);
        self.skip_while(true, |cursor| {
            if targets.contains(cursor.current_kind()) {
                return false;
            }
            if !cursor.is_start_of_decl() {
                return true;
            }
            let binding = cursor.check(TokenKind::Var) || cursor.check(TokenKind::Let);
            binding && !cursor.current().is_at_line_start()
        })
    }

    fn skip_while(
        &mut self,
        stop_at_code_complete: bool,
        mut keep_going: impl FnMut(&mut Self) -> bool,
    ) -> usize {
        let mut skipped = 0;
        while !self.is_at_end()
            && !(stop_at_code_complete && self.check(TokenKind::CodeComplete))
            && keep_going(self)
        {
            let before = self.current_span().start;
            self.skip_single(stop_at_code_complete);
            debug_assert!(
                self.current_span().start > before,
                "skip made no progress at offset {before}"
            );
            skipped += 1;
        }
        if skipped > 0 {
            debug!(
                skipped,
                stopped_at = ?self.current_kind(),
                offset = self.current_span().start,
                "recovery skipped tokens"
            );
        }
        skipped
    }
}
