//! The parser and the session it runs in.
//!
//! A `ParseSession` holds what both passes share: the sources, the
//! interner, the diagnostic sink, the persistent state and the options. A
//! `Parser` is short-lived: one per buffer in the first pass, one per body
//! in the delayed pass. Each owns a fresh `Cursor`.

use lark_diagnostic::{
    expected_identifier, unclosed_delimiter, unexpected_token, Diagnostic, DiagnosticSink,
    ErrorGuaranteed,
};
use lark_ir::{
    BufferId, DeclId, Module, Name, SourceMap, Span, StringInterner, TokenFlags, TokenKind,
};
use lark_lexer::{tokenize, TokenizeOptions};
use tracing::debug;

use crate::completion::CompletionCallbacks;
use crate::delayed::{DelayNone, DelayedParsingPolicy};
use crate::{Cursor, ParseStatus, PersistentParserState};

/// Per-session parse configuration.
#[derive(Debug)]
pub struct ParseOptions {
    /// Which bodies the first pass leaves unparsed.
    pub delay_policy: Box<dyn DelayedParsingPolicy>,
    /// Record the spans of line comments in the module.
    pub keep_comments: bool,
}

impl ParseOptions {
    /// Parse every body immediately.
    pub fn eager() -> Self {
        ParseOptions {
            delay_policy: Box::new(DelayNone),
            keep_comments: false,
        }
    }

    /// Postpone every body that can be postponed.
    pub fn delayed() -> Self {
        Self::eager().with_policy(crate::DelayAll)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl DelayedParsingPolicy + 'static) -> Self {
        self.delay_policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::eager()
    }
}

/// Everything the first pass and the delayed pass share.
pub struct ParseSession<'a> {
    pub sources: &'a SourceMap,
    pub interner: &'a StringInterner,
    pub diagnostics: &'a mut dyn DiagnosticSink,
    pub state: PersistentParserState,
    pub options: ParseOptions,
}

impl<'a> ParseSession<'a> {
    pub fn new(
        sources: &'a SourceMap,
        interner: &'a StringInterner,
        diagnostics: &'a mut dyn DiagnosticSink,
        options: ParseOptions,
    ) -> Self {
        ParseSession {
            sources,
            interner,
            diagnostics,
            state: PersistentParserState::new(),
            options,
        }
    }
}

/// Recursive descent parser over one cursor.
pub struct Parser<'p, 'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) session: &'p mut ParseSession<'a>,
    pub(crate) module: &'p mut Module,
    pub(crate) completion: Option<&'p mut dyn CompletionCallbacks>,
    /// Brace bodies currently open. Only bodies at depth 0 can be delayed.
    pub(crate) body_depth: u32,
    errors: usize,
}

impl<'p, 'a> Parser<'p, 'a> {
    pub fn new(session: &'p mut ParseSession<'a>, module: &'p mut Module, cursor: Cursor<'a>) -> Self {
        Parser {
            cursor,
            session,
            module,
            completion: None,
            body_depth: 0,
            errors: 0,
        }
    }

    #[must_use]
    pub fn with_completion(mut self, callbacks: &'p mut dyn CompletionCallbacks) -> Self {
        self.completion = Some(callbacks);
        self
    }

    #[inline]
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    /// Errors this parser has reported so far.
    #[inline]
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// `Error` if anything was reported since `before` (an `error_count`).
    #[inline]
    pub(crate) fn status_since(&self, before: usize) -> ParseStatus {
        if self.errors > before {
            ParseStatus::Error
        } else {
            ParseStatus::Success
        }
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        self.errors += 1;
        self.session.diagnostics.emit_error(diagnostic)
    }

    #[inline]
    pub(crate) fn intern(&self, text: &str) -> Name {
        self.session.interner.intern(text)
    }

    /// The current token as diagnostics should quote it.
    pub(crate) fn found_text(&self) -> &'a str {
        let text = self.cursor.current_text();
        if text.is_empty() || self.cursor.is_at_end() {
            self.cursor.current_kind().display_name()
        } else {
            text
        }
    }

    /// End of input standing in for `close` at the end of a sub-range.
    pub(crate) fn at_implicit_close(&self, close: TokenKind) -> bool {
        let token = self.cursor.current();
        token.is(TokenKind::Eof)
            && token.flags.contains(TokenFlags::ARTIFICIAL_EOF)
            && close.fixed_text() == Some(self.cursor.current_text())
    }

    /// Consume a token of `kind` or report what was expected instead.
    pub fn parse_token(&mut self, kind: TokenKind, context: &str) -> Result<Span, ErrorGuaranteed> {
        if self.cursor.check(kind) {
            return Ok(self.cursor.advance());
        }
        let found = self.found_text();
        let diagnostic = unexpected_token(self.cursor.current_span(), kind.display_name(), found)
            .with_note(format!("while parsing {context}"));
        Err(self.emit(diagnostic))
    }

    /// Consume the closer matching the opener at `open`.
    ///
    /// An artificial end of input that reads as `close` is accepted without
    /// being consumed; its span is returned.
    pub fn parse_matching_token(&mut self, close: TokenKind, open: Span) -> Result<Span, ErrorGuaranteed> {
        self.expect_closer(close, open, None)
    }

    pub(crate) fn expect_closer(
        &mut self,
        close: TokenKind,
        open: Span,
        context: Option<&str>,
    ) -> Result<Span, ErrorGuaranteed> {
        if self.cursor.check(close) {
            return Ok(self.cursor.advance());
        }
        if self.at_implicit_close(close) {
            return Ok(self.cursor.current_span());
        }
        let mut diagnostic = unclosed_delimiter(open, self.cursor.current_span(), opener_char(close));
        if let Some(context) = context {
            diagnostic = diagnostic.with_note(format!("while parsing {context}"));
        }
        Err(self.emit(diagnostic))
    }

    /// Consume an identifier and intern it.
    pub fn parse_identifier(&mut self, context: &str) -> Result<(Name, Span), ErrorGuaranteed> {
        if self.cursor.check(TokenKind::Ident) {
            let name = self.intern(self.cursor.current_text());
            return Ok((name, self.cursor.advance()));
        }
        let found = self.found_text();
        let diagnostic = expected_identifier(self.cursor.current_span(), found, context);
        Err(self.emit(diagnostic))
    }

    /// Like `parse_identifier`, but an operator also names something.
    pub fn parse_any_identifier(&mut self, context: &str) -> Result<(Name, Span), ErrorGuaranteed> {
        if self.cursor.current().is_any_operator() {
            let name = self.intern(self.cursor.current_text());
            return Ok((name, self.cursor.advance()));
        }
        self.parse_identifier(context)
    }
}

fn opener_char(close: TokenKind) -> char {
    match close {
        TokenKind::RParen => '(',
        TokenKind::RBracket => '[',
        TokenKind::RBrace => '{',
        _ => close
            .fixed_text()
            .and_then(|text| text.chars().next())
            .unwrap_or('?'),
    }
}

/// Parse every file-scope item of `buffer` into `module`.
///
/// Bodies the session's policy chooses to delay are left `Unparsed` and
/// their positions recorded. If an earlier [`parse_next_item`] left a
/// resume position in this buffer, parsing continues from there.
pub fn parse_into_module(session: &mut ParseSession<'_>, module: &mut Module, buffer: BufferId) -> ParseStatus {
    let sources = session.sources;
    let source = sources.buffer(buffer);
    let mut cursor = Cursor::for_buffer(source);
    let start = if resume(session, &mut cursor) {
        cursor.current_span().start
    } else {
        source.base()
    };
    debug!(buffer = source.name(), start, "parse buffer");

    if session.options.keep_comments {
        collect_comments(session.sources, module, buffer, Span::new(start, source.end()));
    }

    let mut parser = Parser::new(session, module, cursor);
    parser.parse_items();
    ParseStatus::from_error_count(parser.error_count())
}

/// Parse the next file-scope item of `buffer` and stop.
///
/// The position after the item becomes the session's resume position.
/// Returns `None` once the buffer is exhausted.
pub fn parse_next_item(session: &mut ParseSession<'_>, module: &mut Module, buffer: BufferId) -> Option<DeclId> {
    let sources = session.sources;
    let source = sources.buffer(buffer);
    let mut cursor = Cursor::for_buffer(source);
    let start = if resume(session, &mut cursor) {
        cursor.current_span().start
    } else {
        source.base()
    };

    let mut parser = Parser::new(session, module, cursor);
    let mut item = None;
    while item.is_none() && !parser.cursor.is_at_end() {
        item = parser.parse_item();
    }
    let end = parser.cursor.snapshot();
    session.state.set_resume_position(end);

    if session.options.keep_comments {
        collect_comments(session.sources, module, buffer, Span::new(start, end.offset()));
    }
    item
}

/// Restore `cursor` to the session's resume position if it is in range.
fn resume(session: &mut ParseSession<'_>, cursor: &mut Cursor<'_>) -> bool {
    let Some(position) = session.state.take_resume_position() else {
        return false;
    };
    if cursor.restore(position).is_err() {
        // Belongs to another buffer; leave it for that one.
        session.state.set_resume_position(position);
        return false;
    }
    true
}

fn collect_comments(sources: &SourceMap, module: &mut Module, buffer: BufferId, range: Span) {
    let options = TokenizeOptions {
        keep_comments: true,
        split_interpolated_strings: false,
    };
    for token in tokenize(sources.buffer(buffer), range, options) {
        if token.is(TokenKind::LineComment) {
            module.push_comment(token.span);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
