//! Token types for the Lark lexer.
//!
//! A token is plain data: a kind, a span into its buffer, and flags. The
//! text is recovered by slicing the buffer with the span, so tokens stay
//! `Copy` and eight-byte aligned.

use std::fmt;

use bitflags::bitflags;

use crate::Span;

bitflags! {
    /// Per-token facts the scanner knows and the parser needs.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// First token on its line (only whitespace precedes it).
        const LINE_START = 1 << 0;
        /// End of a sub-range rather than end of the buffer.
        const ARTIFICIAL_EOF = 1 << 1;
    }
}

/// Token kinds for Lark.
///
/// Closed and fieldless: literal values and identifier text are read back
/// from the source through the token's span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // Names and literals
    Ident,
    Int,
    Float,
    StringLiteral,
    /// String literal missing its closing quote; runs to end of line.
    UnterminatedString,

    // Keywords
    Func,
    Var,
    Let,
    Struct,
    Import,
    Return,
    If,
    Else,
    While,
    True,
    False,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    /// `->`
    Arrow,
    /// `=`
    Eq,
    /// `\`, only meaningful inside string literals.
    Backslash,

    /// Any other maximal run of operator characters: `+`, `>>`, `<=`, ...
    Operator,

    /// `// ...`, produced only when comments are kept.
    LineComment,

    /// The code-completion marker (a NUL byte in the source).
    CodeComplete,
    /// A character that starts no token.
    Unknown,
    Eof,
}

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Every kind, indexed by discriminant.
    pub const ALL: [TokenKind; 34] = [
        TokenKind::Ident,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::StringLiteral,
        TokenKind::UnterminatedString,
        TokenKind::Func,
        TokenKind::Var,
        TokenKind::Let,
        TokenKind::Struct,
        TokenKind::Import,
        TokenKind::Return,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::True,
        TokenKind::False,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::Arrow,
        TokenKind::Eq,
        TokenKind::Backslash,
        TokenKind::Operator,
        TokenKind::LineComment,
        TokenKind::CodeComplete,
        TokenKind::Unknown,
        TokenKind::Eof,
    ];

    /// Discriminant index, for bitset membership.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Kind for a discriminant index.
    #[inline]
    pub fn from_index(index: u8) -> Option<TokenKind> {
        Self::ALL.get(index as usize).copied()
    }

    /// Keyword for an identifier spelling.
    pub fn keyword(text: &[u8]) -> Option<TokenKind> {
        Some(match text {
            b"func" => TokenKind::Func,
            b"var" => TokenKind::Var,
            b"let" => TokenKind::Let,
            b"struct" => TokenKind::Struct,
            b"import" => TokenKind::Import,
            b"return" => TokenKind::Return,
            b"if" => TokenKind::If,
            b"else" => TokenKind::Else,
            b"while" => TokenKind::While,
            b"true" => TokenKind::True,
            b"false" => TokenKind::False,
            _ => return None,
        })
    }

    /// Kind for a run of operator characters.
    ///
    /// `=` and `->` are reserved punctuation; every other run is a generic
    /// operator.
    pub fn classify_operator(text: &[u8]) -> TokenKind {
        match text {
            b"=" => TokenKind::Eq,
            b"->" => TokenKind::Arrow,
            _ => TokenKind::Operator,
        }
    }

    /// Whether `byte` can appear in an operator run.
    #[inline]
    pub const fn is_operator_byte(byte: u8) -> bool {
        matches!(
            byte,
            b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>' | b'!' | b'&' | b'|' | b'^' | b'~'
                | b'?' | b'='
        )
    }

    /// The fixed spelling of this kind, if it has one.
    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Func => "func",
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::Struct => "struct",
            TokenKind::Import => "import",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Arrow => "->",
            TokenKind::Eq => "=",
            TokenKind::Backslash => "\\",
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::StringLiteral
            | TokenKind::UnterminatedString
            | TokenKind::Operator
            | TokenKind::LineComment
            | TokenKind::CodeComplete
            | TokenKind::Unknown
            | TokenKind::Eof => return None,
        })
    }

    /// Human-readable name for diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::UnterminatedString => "unterminated string literal",
            TokenKind::Func => "`func`",
            TokenKind::Var => "`var`",
            TokenKind::Let => "`let`",
            TokenKind::Struct => "`struct`",
            TokenKind::Import => "`import`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Arrow => "`->`",
            TokenKind::Eq => "`=`",
            TokenKind::Backslash => "`\\`",
            TokenKind::Operator => "operator",
            TokenKind::LineComment => "comment",
            TokenKind::CodeComplete => "code completion point",
            TokenKind::Unknown => "unknown character",
            TokenKind::Eof => "end of input",
        }
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Func
                | TokenKind::Var
                | TokenKind::Let
                | TokenKind::Struct
                | TokenKind::Import
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Kinds that open a bracket group.
    #[inline]
    pub const fn closing_delimiter(self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub flags: TokenFlags,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            flags: TokenFlags::empty(),
            span,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn is_not(&self, kind: TokenKind) -> bool {
        self.kind != kind
    }

    #[inline]
    pub fn is_any_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Operator | TokenKind::Eq | TokenKind::Arrow
        )
    }

    #[inline]
    pub fn is_at_line_start(&self) -> bool {
        self.flags.contains(TokenFlags::LINE_START)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Token;
    crate::static_assert_size!(Token, 12);
}

#[cfg(test)]
mod tests;
