//! Tokenizer for Lark.
//!
//! The lexer is pull-based: the parser hands it a `LexState` and gets back
//! one token plus the state after it. Nothing is buffered, so any saved state
//! can be resumed later, and a `Lexer` can be confined to a sub-range of a
//! buffer (used to re-lex the expression inside a string interpolation).
//!
//! - `scanner`: byte-level token recognition
//! - `lexer`: `Lexer`, `LexState`
//! - `segment`: splitting string literals into literal and interpolation runs
//! - `tokenize`: eager tokenization of a range, splicing interpolations

mod lexer;
mod scanner;
mod segment;
mod tokenize;

pub use lexer::{LexState, Lexer};
pub use segment::{has_interpolation, segment_string_literal, StringSegment};
pub use tokenize::{string_part_tokens, tokenize, TokenizeOptions};
