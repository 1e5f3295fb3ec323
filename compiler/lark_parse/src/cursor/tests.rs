use lark_ir::SourceMap;
use pretty_assertions::assert_eq;

use super::*;

fn one_buffer(text: &str) -> SourceMap {
    let mut sources = SourceMap::new();
    sources.add_buffer("c.lark", text).unwrap();
    sources
}

fn first(sources: &SourceMap) -> &SourceBuffer {
    sources.buffers().next().unwrap()
}

#[test]
fn test_advance_returns_consumed_span() {
    let sources = one_buffer("let x = 1");
    let mut cursor = Cursor::for_buffer(first(&sources));
    assert!(cursor.check(TokenKind::Let));
    let span = cursor.advance();
    assert_eq!(first(&sources).slice(span), "let");
    assert_eq!(cursor.current_text(), "x");
    assert_eq!(cursor.previous_span(), span);
    assert_eq!(cursor.previous_end(), span.end_point());
}

#[test]
#[should_panic(expected = "advance past end of input")]
fn test_advance_at_end_panics() {
    let sources = one_buffer("x");
    let mut cursor = Cursor::for_buffer(first(&sources));
    cursor.advance();
    cursor.advance();
}

#[test]
fn test_peek_is_cached_and_does_not_move() {
    let sources = one_buffer("a b c");
    let mut cursor = Cursor::for_buffer(first(&sources));
    let peeked = cursor.peek();
    assert_eq!(cursor.current_text(), "a");
    assert_eq!(cursor.peek(), peeked);
    cursor.advance();
    assert_eq!(cursor.current(), peeked);
    assert_eq!(cursor.current_text(), "b");
}

#[test]
fn test_peek_at_end_is_end() {
    let sources = one_buffer("a");
    let mut cursor = Cursor::for_buffer(first(&sources));
    cursor.advance();
    assert!(cursor.is_at_end());
    assert!(cursor.peek().is(TokenKind::Eof));
}

#[test]
fn test_snapshot_then_restore_changes_nothing() {
    let sources = one_buffer("f(a, b) + g");
    let mut plain = Cursor::for_buffer(first(&sources));
    let mut restored = Cursor::for_buffer(first(&sources));
    plain.advance();
    restored.advance();

    let position = restored.snapshot();
    restored.peek();
    restored.restore(position).unwrap();

    for _ in 0..3 {
        assert_eq!(restored.advance(), plain.advance());
    }
    assert_eq!(restored.current(), plain.current());
}

#[test]
fn test_restore_rewinds_token_and_lexer_together() {
    let sources = one_buffer("a b c d");
    let mut cursor = Cursor::for_buffer(first(&sources));
    cursor.advance();
    let at_b = cursor.snapshot();
    cursor.advance();
    cursor.advance();
    assert_eq!(cursor.current_text(), "d");

    cursor.restore(at_b).unwrap();
    assert_eq!(cursor.current_text(), "b");
    assert_eq!(cursor.peek(), at_b_peek(&sources));
    cursor.advance();
    assert_eq!(cursor.current_text(), "c");
}

fn at_b_peek(sources: &SourceMap) -> Token {
    let mut cursor = Cursor::for_buffer(first(sources));
    cursor.advance();
    cursor.advance();
    cursor.current()
}

#[test]
fn test_restore_rejects_foreign_position() {
    let mut sources = SourceMap::new();
    let a = sources.add_buffer("a.lark", "one two").unwrap();
    let b = sources.add_buffer("b.lark", "three").unwrap();
    let mut in_a = Cursor::for_buffer(sources.buffer(a));
    in_a.advance();
    let position = in_a.snapshot();

    let mut in_b = Cursor::for_buffer(sources.buffer(b));
    let before = in_b.current();
    let err = in_b.restore(position).unwrap_err();
    assert!(matches!(err, CursorError::ForeignPosition { ref buffer, .. } if buffer == "b.lark"));
    assert_eq!(in_b.current(), before);
}

#[test]
fn test_eat_and_check_text() {
    let sources = one_buffer("( x");
    let mut cursor = Cursor::for_buffer(first(&sources));
    assert!(!cursor.eat(TokenKind::RParen));
    assert!(cursor.eat(TokenKind::LParen));
    assert!(cursor.check_text("x"));
    assert_eq!(cursor.current_kind(), TokenKind::Ident);
}

#[test]
fn test_split_greater_greater() {
    let sources = one_buffer("A<B<C>> x");
    let buffer = first(&sources);
    let mut cursor = Cursor::for_buffer(buffer);
    cursor.advance(); // A
    assert!(cursor.check_starting_less());
    cursor.consume_starting_less();
    cursor.advance(); // B
    cursor.consume_starting_less();
    cursor.advance(); // C
    assert_eq!(cursor.current_text(), ">>");

    let first_gt = cursor.consume_starting_greater();
    assert_eq!(buffer.slice(first_gt), ">");
    assert_eq!(cursor.current_text(), ">");
    assert_eq!(cursor.current_kind(), TokenKind::Operator);
    assert_eq!(cursor.current_span().start, first_gt.end);

    let second_gt = cursor.consume_starting_greater();
    assert_eq!(second_gt.start, first_gt.end);
    assert_eq!(cursor.current_text(), "x");
}

#[test]
fn test_split_greater_equal_leaves_eq() {
    let sources = one_buffer(">= 1");
    let mut cursor = Cursor::for_buffer(first(&sources));
    cursor.consume_starting_greater();
    assert_eq!(cursor.current_kind(), TokenKind::Eq);
    assert_eq!(cursor.peek().kind, TokenKind::Int);
    cursor.advance();
    assert_eq!(cursor.current_text(), "1");
}

#[test]
fn test_snapshot_of_split_token_restores_it() {
    let sources = one_buffer(">> y");
    let mut cursor = Cursor::for_buffer(first(&sources));
    cursor.consume_starting_greater();
    let position = cursor.snapshot();
    cursor.advance();
    cursor.advance();
    cursor.restore(position).unwrap();
    assert_eq!(cursor.current_text(), ">");
    cursor.advance();
    assert_eq!(cursor.current_text(), "y");
}

#[test]
fn test_sub_range_cursor_ends_on_closer_text() {
    let sources = one_buffer("\"\\(a, b)\"");
    let buffer = first(&sources);
    let base = buffer.base();
    let mut cursor = Cursor::new(Lexer::with_range(buffer, Span::new(base + 2, base + 7)));
    let texts: Vec<&str> = std::iter::from_fn(|| {
        if cursor.is_at_end() {
            None
        } else {
            cursor.advance();
            Some(buffer.slice(cursor.previous_span()))
        }
    })
    .collect();
    assert_eq!(texts, vec!["(", "a", ",", "b"]);
    assert!(cursor.is_at_end());
    assert_eq!(cursor.current_text(), ")");
}
