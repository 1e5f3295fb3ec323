//! Pull-based lexer over a buffer range.

use lark_ir::{SourceBuffer, Span, Token, TokenFlags, TokenKind};

use crate::scanner;

/// Where the lexer is: the global offset of the next unscanned byte.
///
/// The lexer keeps no other state, so a `LexState` saved at any point fully
/// determines every token that follows it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LexState {
    offset: u32,
}

impl LexState {
    #[inline]
    pub fn offset(self) -> u32 {
        self.offset
    }
}

/// Tokenizer confined to a range of one buffer.
///
/// `Copy`: it is only a view. All progress lives in the `LexState` values
/// passed in and out.
#[derive(Copy, Clone, Debug)]
pub struct Lexer<'a> {
    buffer: &'a SourceBuffer,
    /// Local byte indices into `buffer.text()`.
    start: usize,
    end: usize,
    keep_comments: bool,
}

impl<'a> Lexer<'a> {
    /// Lexer over the whole buffer.
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Lexer {
            buffer,
            start: 0,
            end: buffer.text().len(),
            keep_comments: false,
        }
    }

    /// Lexer over `range` (global offsets) of `buffer`.
    ///
    /// When the range stops short of the buffer end, the end-of-input token
    /// is artificial. If the byte at the range end is a closing delimiter,
    /// that token spans it, so its text reads `)`, `]` or `}`.
    pub fn with_range(buffer: &'a SourceBuffer, range: Span) -> Self {
        let len = buffer.text().len();
        let clamp = |offset: u32| {
            if buffer.contains(offset) {
                buffer.local(offset)
            } else if offset < buffer.base() {
                0
            } else {
                len
            }
        };
        let start = clamp(range.start);
        Lexer {
            buffer,
            start,
            end: clamp(range.end).max(start),
            keep_comments: false,
        }
    }

    /// Emit `LineComment` tokens instead of skipping comments.
    #[must_use]
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    #[inline]
    pub fn buffer(&self) -> &'a SourceBuffer {
        self.buffer
    }

    /// The range this lexer covers, in global offsets.
    pub fn range(&self) -> Span {
        Span::new(self.buffer.global(self.start), self.buffer.global(self.end))
    }

    pub fn initial_state(&self) -> LexState {
        LexState {
            offset: self.buffer.global(self.start),
        }
    }

    /// State that resumes scanning at `offset`.
    ///
    /// # Panics
    /// Debug builds panic if `offset` is outside this lexer's range.
    pub fn state_at(&self, offset: u32) -> LexState {
        debug_assert!(
            self.range().contains_inclusive(offset),
            "offset {offset} outside lexer range {:?}",
            self.range()
        );
        LexState { offset }
    }

    /// Scan the token at `state` and return it with the state after it.
    ///
    /// At end of input the returned state equals `state`, so asking again
    /// yields the same end-of-input token.
    pub fn next_token(&self, state: LexState) -> (Token, LexState) {
        let bytes = &self.buffer.text().as_bytes()[..self.end];
        let mut pos = self.buffer.local(state.offset).clamp(self.start, self.end);
        loop {
            pos = scanner::skip_whitespace(bytes, pos);
            if pos >= bytes.len() {
                return (self.eof_token(), self.state_for(self.end));
            }
            if scanner::starts_line_comment(bytes, pos) {
                let end = scanner::line_end(bytes, pos);
                if self.keep_comments {
                    return (
                        self.make_token(TokenKind::LineComment, pos, end),
                        self.state_for(end),
                    );
                }
                pos = end;
                continue;
            }
            let (kind, end) = scanner::scan_token(bytes, pos);
            return (self.make_token(kind, pos, end), self.state_for(end));
        }
    }

    /// The token at `state`, without advancing.
    #[inline]
    pub fn peek_token(&self, state: LexState) -> Token {
        self.next_token(state).0
    }

    #[inline]
    fn state_for(&self, local: usize) -> LexState {
        LexState {
            offset: self.buffer.global(local),
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        let span = Span::new(self.buffer.global(start), self.buffer.global(end));
        let flags = if self.is_line_start(start) {
            TokenFlags::LINE_START
        } else {
            TokenFlags::empty()
        };
        Token::new(kind, span).with_flags(flags)
    }

    fn eof_token(&self) -> Token {
        let at = self.buffer.global(self.end);
        if self.end == self.buffer.text().len() {
            return Token::new(TokenKind::Eof, Span::point(at));
        }
        let span = match self.buffer.text().as_bytes()[self.end] {
            b')' | b']' | b'}' => Span::new(at, at + 1),
            _ => Span::point(at),
        };
        Token::new(TokenKind::Eof, span).with_flags(TokenFlags::ARTIFICIAL_EOF)
    }

    /// Only horizontal whitespace between the start of the line and `pos`.
    fn is_line_start(&self, pos: usize) -> bool {
        let bytes = self.buffer.text().as_bytes();
        let mut i = pos;
        while i > 0 {
            match bytes[i - 1] {
                b'\n' => return true,
                b' ' | b'\t' | b'\r' => i -= 1,
                _ => return false,
            }
        }
        true
    }
}
