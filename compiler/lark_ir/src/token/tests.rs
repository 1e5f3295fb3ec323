use super::*;

#[test]
fn all_is_indexed_by_discriminant() {
    for (i, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(kind.discriminant_index() as usize, i, "{kind:?}");
        assert_eq!(TokenKind::from_index(kind.discriminant_index()), Some(*kind));
    }
    assert_eq!(TokenKind::COUNT, 34);
    assert_eq!(TokenKind::from_index(200), None);
}

#[test]
fn keywords_round_trip_through_fixed_text() {
    for kind in TokenKind::ALL {
        if kind.is_keyword() {
            let text = kind.fixed_text().unwrap_or_default();
            assert_eq!(TokenKind::keyword(text.as_bytes()), Some(kind));
        }
    }
    assert_eq!(TokenKind::keyword(b"funcs"), None);
}

#[test]
fn classify_operator_reserves_eq_and_arrow() {
    assert_eq!(TokenKind::classify_operator(b"="), TokenKind::Eq);
    assert_eq!(TokenKind::classify_operator(b"->"), TokenKind::Arrow);
    assert_eq!(TokenKind::classify_operator(b"=="), TokenKind::Operator);
    assert_eq!(TokenKind::classify_operator(b">"), TokenKind::Operator);
}

#[test]
fn closing_delimiters() {
    assert_eq!(TokenKind::LParen.closing_delimiter(), Some(TokenKind::RParen));
    assert_eq!(TokenKind::LBracket.closing_delimiter(), Some(TokenKind::RBracket));
    assert_eq!(TokenKind::LBrace.closing_delimiter(), Some(TokenKind::RBrace));
    assert_eq!(TokenKind::RParen.closing_delimiter(), None);
}

#[test]
fn token_flags() {
    let tok = Token::new(TokenKind::Ident, Span::new(0, 3));
    assert!(!tok.is_at_line_start());
    let tok = tok.with_flags(TokenFlags::LINE_START);
    assert!(tok.is_at_line_start());
    assert!(tok.is(TokenKind::Ident));
    assert!(tok.is_not(TokenKind::Eof));
}

#[test]
fn token_debug() {
    let tok = Token::new(TokenKind::Comma, Span::new(4, 5));
    assert_eq!(format!("{tok:?}"), "Comma @ 4..5");
}
