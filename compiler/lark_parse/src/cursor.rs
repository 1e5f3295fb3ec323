//! Token cursor over an on-demand lexer.
//!
//! The cursor holds exactly one live token. The lexer state stored next to
//! it always describes the input right after that token, and both change
//! together on `advance` and `restore`. The only way to look further ahead
//! is `peek`, which caches its result and never moves the visible token.

use lark_ir::{SourceBuffer, Span, Token, TokenKind};
use lark_lexer::{LexState, Lexer};
use tracing::trace;

/// A saved cursor position.
///
/// Restoring it reproduces the visible token and the lexer state exactly.
/// It is only meaningful for the buffer it was taken from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    token: Token,
    /// Lexer state right after `token`.
    state: LexState,
    prev_span: Span,
}

impl Position {
    /// The token that will be current after restoring.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Global offset of that token.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.token.span.start
    }
}

/// Misuse of a cursor position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("position at offset {offset} does not belong to `{buffer}` ({range:?})")]
    ForeignPosition {
        offset: u32,
        buffer: String,
        range: Span,
    },
}

/// Cursor for navigating the tokens of one buffer range.
pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    token: Token,
    /// Lexer state right after `token`.
    state: LexState,
    peeked: Option<(Token, LexState)>,
    prev_span: Span,
}

impl<'a> Cursor<'a> {
    /// Create a cursor on the first token of `lexer`'s range.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let (token, state) = lexer.next_token(lexer.initial_state());
        Cursor {
            lexer,
            token,
            state,
            peeked: None,
            prev_span: Span::point(lexer.range().start),
        }
    }

    /// Cursor over a whole buffer.
    pub fn for_buffer(buffer: &'a SourceBuffer) -> Self {
        Cursor::new(Lexer::new(buffer))
    }

    #[inline]
    pub fn buffer(&self) -> &'a SourceBuffer {
        self.lexer.buffer()
    }

    /// The global range this cursor walks.
    #[inline]
    pub fn range(&self) -> Span {
        self.lexer.range()
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.token.kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.token.span
    }

    /// Source text of the current token.
    ///
    /// An end-of-input token that stops a sub-range in front of a closing
    /// delimiter reads as that delimiter.
    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.buffer().slice(self.token.span)
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.prev_span
    }

    /// The point just past the most recently consumed token.
    #[inline]
    pub fn previous_end(&self) -> Span {
        self.prev_span.end_point()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.token.is(TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.token.is(kind)
    }

    #[inline]
    pub fn check_text(&self, text: &str) -> bool {
        self.current_text() == text
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token and return its span.
    ///
    /// # Panics
    /// Panics at end of input: the caller lost track of where it is.
    pub fn advance(&mut self) -> Span {
        assert!(
            !self.is_at_end(),
            "advance past end of input at {:?}",
            self.token.span
        );
        let consumed = self.token;
        let (next, state) = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token(self.state),
        };
        trace!(kind = ?consumed.kind, span = ?consumed.span, "advance");
        self.prev_span = consumed.span;
        self.token = next;
        self.state = state;
        consumed.span
    }

    /// The token after the current one.
    pub fn peek(&mut self) -> Token {
        if let Some((token, _)) = self.peeked {
            return token;
        }
        let peeked = self.lexer.next_token(self.state);
        self.peeked = Some(peeked);
        peeked.0
    }

    pub fn snapshot(&self) -> Position {
        Position {
            token: self.token,
            state: self.state,
            prev_span: self.prev_span,
        }
    }

    /// Return to a saved position.
    ///
    /// Fails without touching the cursor if `position` lies outside this
    /// cursor's buffer range.
    pub fn restore(&mut self, position: Position) -> Result<(), CursorError> {
        let range = self.range();
        if !range.contains_inclusive(position.offset())
            || !range.contains_inclusive(position.state.offset())
        {
            return Err(CursorError::ForeignPosition {
                offset: position.offset(),
                buffer: self.buffer().name().to_string(),
                range,
            });
        }
        self.rewind(position);
        Ok(())
    }

    /// `restore` for positions this cursor produced itself.
    pub(crate) fn rewind(&mut self, position: Position) {
        debug_assert!(self.range().contains_inclusive(position.offset()));
        trace!(offset = position.offset(), "restore");
        self.token = position.token;
        self.state = position.state;
        self.prev_span = position.prev_span;
        self.peeked = None;
    }

    /// Whether the current token is an operator run starting with `<`.
    #[inline]
    pub fn check_starting_less(&self) -> bool {
        self.starts_operator_with(b'<')
    }

    /// Whether the current token is an operator run starting with `>`.
    #[inline]
    pub fn check_starting_greater(&self) -> bool {
        self.starts_operator_with(b'>')
    }

    /// Consume the leading `<` of the current operator.
    ///
    /// See [`Cursor::consume_starting_greater`].
    pub fn consume_starting_less(&mut self) -> Span {
        self.split_first_char(b'<')
    }

    /// Consume the leading `>` of the current operator.
    ///
    /// If the operator is longer than one character, the rest stays as the
    /// current token (`>>` leaves `>`, `>=` leaves `=`), synthesized from the
    /// remaining span without scanning again. The lexer state is unchanged
    /// since it already points past the whole run.
    pub fn consume_starting_greater(&mut self) -> Span {
        self.split_first_char(b'>')
    }

    fn starts_operator_with(&self, ch: u8) -> bool {
        self.token.is_any_operator() && self.current_text().as_bytes().first() == Some(&ch)
    }

    fn split_first_char(&mut self, ch: u8) -> Span {
        debug_assert!(
            self.starts_operator_with(ch),
            "current token does not start with `{}`",
            char::from(ch)
        );
        if self.token.span.len() <= 1 {
            return self.advance();
        }
        let first = Span::new(self.token.span.start, self.token.span.start + 1);
        let rest = self.token.span.advanced(1);
        let kind = TokenKind::classify_operator(self.buffer().slice(rest).as_bytes());
        trace!(span = ?first, rest = ?rest, "split operator");
        self.prev_span = first;
        self.token = Token::new(kind, rest);
        first
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
