//! String literal segmentation.
//!
//! A string literal token is split into literal runs and interpolations.
//! Segments tile the token interior: the first starts right after the
//! opening quote, the last ends right before the closing quote (or at the
//! token end if the literal is unterminated), and neighbours share
//! endpoints.

use lark_ir::{SourceBuffer, Span, Token, TokenKind};
use smallvec::SmallVec;

use crate::scanner;

/// One run of a string literal's content.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StringSegment {
    /// Raw literal text, escapes undecoded, quotes excluded.
    Literal { span: Span },
    /// A whole `\( ... )` run.
    Interpolation {
        span: Span,
        /// False when the line or literal ended before the matching `)`.
        terminated: bool,
    },
}

impl StringSegment {
    pub fn span(self) -> Span {
        match self {
            StringSegment::Literal { span } | StringSegment::Interpolation { span, .. } => span,
        }
    }

    pub fn is_interpolation(self) -> bool {
        matches!(self, StringSegment::Interpolation { .. })
    }

    /// The range to re-lex as an expression: from the `(` up to, but not
    /// including, the closing `)`. `None` for literal runs.
    pub fn expr_range(self) -> Option<Span> {
        match self {
            StringSegment::Literal { .. } => None,
            StringSegment::Interpolation { span, terminated } => {
                let end = if terminated { span.end - 1 } else { span.end };
                Some(Span::new(span.start + 1, end))
            }
        }
    }
}

/// Split a string literal token into segments.
///
/// Non-string tokens yield no segments. A literal segment is emitted before
/// each interpolation only if it is non-empty or would be the first
/// segment; the trailing literal segment is always emitted, so the result
/// starts and ends with a literal.
pub fn segment_string_literal(buffer: &SourceBuffer, token: Token) -> SmallVec<[StringSegment; 4]> {
    let mut segments = SmallVec::new();
    let terminated = match token.kind {
        TokenKind::StringLiteral => true,
        TokenKind::UnterminatedString => false,
        _ => return segments,
    };
    let bytes = buffer.slice(token.span).as_bytes();
    if bytes.is_empty() {
        return segments;
    }
    let content_end = if terminated && bytes.len() >= 2 {
        bytes.len() - 1
    } else {
        bytes.len()
    };
    let content = &bytes[..content_end];
    let global = |local: usize| token.span.start + to_u32(local);

    let mut literal_start = 1;
    let mut pos = 1;
    while pos < content_end {
        let Some(off) = memchr::memchr(b'\\', &content[pos..]) else {
            break;
        };
        pos += off;
        if content.get(pos + 1) != Some(&b'(') {
            pos += 2;
            continue;
        }
        let (end, closed) = match scanner::interpolation_end(content, pos + 1) {
            Some(end) => (end, true),
            None => (content_end, false),
        };
        if pos > literal_start || segments.is_empty() {
            segments.push(StringSegment::Literal {
                span: Span::new(global(literal_start), global(pos)),
            });
        }
        segments.push(StringSegment::Interpolation {
            span: Span::new(global(pos), global(end)),
            terminated: closed,
        });
        literal_start = end;
        pos = end;
    }
    segments.push(StringSegment::Literal {
        span: Span::new(global(literal_start.min(content_end)), global(content_end)),
    });
    segments
}

/// Whether any segment is an interpolation.
pub fn has_interpolation(segments: &[StringSegment]) -> bool {
    segments.iter().any(|s| s.is_interpolation())
}

#[inline]
fn to_u32(local: usize) -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "token lengths are bounded by the buffer length, which fits in u32"
    )]
    let local = local as u32;
    local
}
