use pretty_assertions::assert_eq;

use super::*;

fn scan_all(source: &str) -> Vec<(TokenKind, &str)> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0;
    loop {
        pos = skip_whitespace(bytes, pos);
        if pos >= bytes.len() {
            break;
        }
        if starts_line_comment(bytes, pos) {
            pos = line_end(bytes, pos);
            continue;
        }
        let (kind, end) = scan_token(bytes, pos);
        out.push((kind, &source[pos..end]));
        pos = end;
    }
    out
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        scan_all("func funcs _x let"),
        vec![
            (TokenKind::Func, "func"),
            (TokenKind::Ident, "funcs"),
            (TokenKind::Ident, "_x"),
            (TokenKind::Let, "let"),
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        scan_all("1_000 2.5 3.foo"),
        vec![
            (TokenKind::Int, "1_000"),
            (TokenKind::Float, "2.5"),
            (TokenKind::Int, "3"),
            (TokenKind::Dot, "."),
            (TokenKind::Ident, "foo"),
        ]
    );
}

#[test]
fn test_operator_runs() {
    assert_eq!(
        scan_all("a >>= b -> = == +// c"),
        vec![
            (TokenKind::Ident, "a"),
            (TokenKind::Operator, ">>="),
            (TokenKind::Ident, "b"),
            (TokenKind::Arrow, "->"),
            (TokenKind::Eq, "="),
            (TokenKind::Operator, "=="),
            (TokenKind::Operator, "+"),
        ]
    );
}

#[test]
fn test_code_completion_and_unknown() {
    assert_eq!(
        scan_all("a.\0 é"),
        vec![
            (TokenKind::Ident, "a"),
            (TokenKind::Dot, "."),
            (TokenKind::CodeComplete, "\0"),
            (TokenKind::Unknown, "é"),
        ]
    );
}

#[test]
fn test_plain_and_escaped_strings() {
    assert_eq!(
        scan_all(r#""a\"b" "c\\" x"#),
        vec![
            (TokenKind::StringLiteral, r#""a\"b""#),
            (TokenKind::StringLiteral, r#""c\\""#),
            (TokenKind::Ident, "x"),
        ]
    );
}

#[test]
fn test_interpolation_is_one_token() {
    let source = r#""a\(f("x\(y)"))b" z"#;
    let tokens = scan_all(source);
    assert_eq!(tokens[0], (TokenKind::StringLiteral, r#""a\(f("x\(y)"))b""#));
    assert_eq!(tokens[1], (TokenKind::Ident, "z"));
}

#[test]
fn test_unterminated_string_stops_at_newline() {
    assert_eq!(
        scan_all("\"abc\nx"),
        vec![
            (TokenKind::UnterminatedString, "\"abc"),
            (TokenKind::Ident, "x"),
        ]
    );
}

#[test]
fn test_unterminated_interpolation() {
    assert_eq!(
        scan_all("\"a\\(b\nc"),
        vec![
            (TokenKind::UnterminatedString, "\"a\\(b"),
            (TokenKind::Ident, "c"),
        ]
    );
}

#[test]
fn test_interpolation_end() {
    let bytes = b"(a(b)c)d";
    assert_eq!(interpolation_end(bytes, 0), Some(7));
    assert_eq!(interpolation_end(b"(a\"s)\")", 0), Some(7));
    assert_eq!(interpolation_end(b"(a", 0), None);
}
