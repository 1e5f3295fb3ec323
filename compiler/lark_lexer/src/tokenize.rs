//! Eager tokenization of a range, with interpolated strings spliced open.

use lark_ir::{SourceBuffer, Span, Token, TokenFlags, TokenKind};

use crate::segment::{has_interpolation, segment_string_literal, StringSegment};
use crate::Lexer;

/// Options for [`tokenize`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Emit `LineComment` tokens.
    pub keep_comments: bool,
    /// Replace each interpolated string with its [`string_part_tokens`].
    pub split_interpolated_strings: bool,
}

/// Every token in `range` of `buffer`, end-of-input excluded.
pub fn tokenize(buffer: &SourceBuffer, range: Span, options: TokenizeOptions) -> Vec<Token> {
    let lexer = Lexer::with_range(buffer, range).keep_comments(options.keep_comments);
    let mut tokens = Vec::new();
    let mut state = lexer.initial_state();
    loop {
        let (token, next) = lexer.next_token(state);
        match token.kind {
            TokenKind::Eof => return tokens,
            TokenKind::StringLiteral | TokenKind::UnterminatedString
                if options.split_interpolated_strings =>
            {
                tokens.extend(string_part_tokens(buffer, token));
            }
            _ => tokens.push(token),
        }
        state = next;
    }
}

/// Flatten a string literal into literal and expression tokens.
///
/// Literal runs become `StringLiteral` tokens; the first one also covers the
/// opening quote and the last one the closing quote (it stays
/// `UnterminatedString` if the literal was). Each interpolation is
/// tokenized again, comments kept, and its tokens are spliced in place, so
/// `"a\(b)c"` becomes `"a`, `\`, `(`, `b`, `)`, `c"`.
///
/// A string without interpolations comes back as the single input token.
pub fn string_part_tokens(buffer: &SourceBuffer, token: Token) -> Vec<Token> {
    let segments = segment_string_literal(buffer, token);
    if !has_interpolation(&segments) {
        return vec![token];
    }
    let last = segments.len() - 1;
    let nested = TokenizeOptions {
        keep_comments: true,
        split_interpolated_strings: true,
    };
    let mut out = Vec::with_capacity(segments.len() * 2);
    for (i, segment) in segments.into_iter().enumerate() {
        match segment {
            StringSegment::Literal { span } => {
                let start = if i == 0 { token.span.start } else { span.start };
                let end = if i == last { token.span.end } else { span.end };
                let kind = if i == last && token.kind == TokenKind::UnterminatedString {
                    TokenKind::UnterminatedString
                } else {
                    TokenKind::StringLiteral
                };
                let flags = if i == 0 { token.flags } else { TokenFlags::empty() };
                out.push(Token::new(kind, Span::new(start, end)).with_flags(flags));
            }
            StringSegment::Interpolation { span, .. } => {
                out.extend(tokenize(buffer, span, nested));
            }
        }
    }
    out
}
