//! Byte-level token recognition.
//!
//! Every function takes the byte slice it may look at and a start index,
//! and returns an end index. The slice is already cut at the lexer's range
//! end, so running off the end of it is simply end of input.
//!
//! Keyword resolution happens here too; literal values are never decoded.

use lark_ir::TokenKind;

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0C)
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Width of the UTF-8 character led by `byte`.
#[inline]
fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

pub(crate) fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_whitespace(bytes[pos]) {
        pos += 1;
    }
    pos
}

#[inline]
pub(crate) fn starts_line_comment(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'/') && bytes.get(pos + 1) == Some(&b'/')
}

/// Index of the next newline at or after `pos`, or end of input.
pub(crate) fn line_end(bytes: &[u8], pos: usize) -> usize {
    memchr::memchr(b'\n', &bytes[pos..]).map_or(bytes.len(), |off| pos + off)
}

/// Recognize the token starting at `pos`. `pos` must be in bounds and not
/// at whitespace or a comment.
pub(crate) fn scan_token(bytes: &[u8], pos: usize) -> (TokenKind, usize) {
    debug_assert!(pos < bytes.len());
    let single = |kind| (kind, pos + 1);
    match bytes[pos] {
        0 => single(TokenKind::CodeComplete),
        b'(' => single(TokenKind::LParen),
        b')' => single(TokenKind::RParen),
        b'{' => single(TokenKind::LBrace),
        b'}' => single(TokenKind::RBrace),
        b'[' => single(TokenKind::LBracket),
        b']' => single(TokenKind::RBracket),
        b',' => single(TokenKind::Comma),
        b';' => single(TokenKind::Semicolon),
        b':' => single(TokenKind::Colon),
        b'.' => single(TokenKind::Dot),
        b'\\' => single(TokenKind::Backslash),
        b'"' => string(bytes, pos),
        b'0'..=b'9' => number(bytes, pos),
        b if is_ident_start(b) => identifier(bytes, pos),
        b if TokenKind::is_operator_byte(b) => operator(bytes, pos),
        b => (
            TokenKind::Unknown,
            (pos + utf8_char_width(b)).min(bytes.len()),
        ),
    }
}

fn identifier(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let mut end = start + 1;
    while end < bytes.len() && is_ident_continue(bytes[end]) {
        end += 1;
    }
    let kind = TokenKind::keyword(&bytes[start..end]).unwrap_or(TokenKind::Ident);
    (kind, end)
}

fn number(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let digits = |mut pos: usize| {
        while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'_') {
            pos += 1;
        }
        pos
    };
    let end = digits(start);
    // `1.5` is a float; `1.foo` is a member access on an integer.
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        return (TokenKind::Float, digits(end + 1));
    }
    (TokenKind::Int, end)
}

fn operator(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let mut end = start;
    while end < bytes.len() && TokenKind::is_operator_byte(bytes[end]) {
        // A comment ends the run.
        if end > start && starts_line_comment(bytes, end) {
            break;
        }
        end += 1;
    }
    (TokenKind::classify_operator(&bytes[start..end]), end)
}

/// Scan a string literal starting at the opening quote.
///
/// Interpolations are skipped as balanced units, so a `"` inside
/// `\( ... )` opens a nested literal rather than closing this one. A
/// newline or end of input before the closing quote yields
/// `UnterminatedString` running up to (not including) that newline.
pub(crate) fn string(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    debug_assert_eq!(bytes[start], b'"');
    let mut pos = start + 1;
    loop {
        let Some(off) = memchr::memchr3(b'"', b'\\', b'\n', &bytes[pos..]) else {
            return (TokenKind::UnterminatedString, bytes.len());
        };
        pos += off;
        match bytes[pos] {
            b'"' => return (TokenKind::StringLiteral, pos + 1),
            b'\n' => return (TokenKind::UnterminatedString, pos),
            _ => match bytes.get(pos + 1).copied() {
                Some(b'(') => match interpolation_end(bytes, pos + 1) {
                    Some(end) => pos = end,
                    None => return (TokenKind::UnterminatedString, line_end(bytes, pos)),
                },
                Some(b'\n') | None => return (TokenKind::UnterminatedString, pos + 1),
                Some(_) => pos += 2,
            },
        }
    }
}

/// Given the `(` of an interpolation, return the index just past its
/// matching `)`, or `None` if the line or input ends first.
pub(crate) fn interpolation_end(bytes: &[u8], open: usize) -> Option<usize> {
    debug_assert_eq!(bytes[open], b'(');
    let mut depth = 0usize;
    let mut pos = open;
    loop {
        match *bytes.get(pos)? {
            b'(' => {
                depth += 1;
                pos += 1;
            }
            b')' => {
                depth -= 1;
                pos += 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'"' => match string(bytes, pos) {
                (TokenKind::StringLiteral, end) => pos = end,
                _ => return None,
            },
            b'\n' => return None,
            _ => pos += 1,
        }
    }
}

#[cfg(test)]
mod tests;
