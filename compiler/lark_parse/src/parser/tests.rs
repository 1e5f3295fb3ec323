use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{DeclKind, Module, SourceMap, Span, StringInterner, TokenKind};
use lark_lexer::Lexer;
use pretty_assertions::assert_eq;

use crate::test_helpers::{codes, Fixture};
use crate::{parse_into_module, parse_next_item, Cursor, ParseOptions, ParseSession, ParseStatus};

#[test]
fn test_parse_token_reports_context() {
    let fixture = Fixture::new("x )");
    let (results, _, diagnostics) = fixture.with_parser(ParseOptions::eager(), |p| {
        let ident = p.parse_token(TokenKind::Ident, "a test");
        let paren = p.parse_token(TokenKind::LParen, "a call");
        (ident.is_ok(), paren.is_err(), p.cursor().current_kind())
    });
    assert_eq!(results, (true, true, TokenKind::RParen));
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1001]);
    assert_eq!(diagnostics[0].notes, vec!["while parsing a call".to_string()]);
}

#[test]
fn test_identifiers() {
    let fixture = Fixture::new("+ foo");
    let (names, _, diagnostics) = fixture.with_parser(ParseOptions::eager(), |p| {
        let op = p.parse_any_identifier("test").unwrap().0;
        let ident = p.parse_identifier("test").unwrap().0;
        let missing = p.parse_identifier("after `foo`").is_err();
        (op, ident, missing)
    });
    assert_eq!(fixture.name(names.0), "+");
    assert_eq!(fixture.name(names.1), "foo");
    assert!(names.2);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1004]);
    assert!(diagnostics[0].message.contains("end of input"));
}

#[test]
fn test_matching_token_unclosed() {
    let fixture = Fixture::new("(a ]");
    let (open, _, diagnostics) = fixture.with_parser(ParseOptions::eager(), |p| {
        let open = p.cursor_mut().advance();
        p.cursor_mut().advance();
        assert!(p.parse_matching_token(TokenKind::RParen, open).is_err());
        open
    });
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1003]);
    let secondary: Vec<Span> = diagnostics[0]
        .labels
        .iter()
        .filter(|l| !l.is_primary)
        .map(|l| l.span)
        .collect();
    assert_eq!(secondary, vec![open]);
}

#[test]
fn test_matching_token_accepts_implicit_close() {
    let fixture = Fixture::new("(a)");
    let range = Span::new(fixture.offset_of("("), fixture.offset_of(")"));
    let ((close, kind), _, diagnostics) = fixture.with_parser(ParseOptions::eager(), |p| {
        let buffer = p.cursor().buffer();
        p.cursor = Cursor::new(Lexer::with_range(buffer, range));
        let open = p.cursor_mut().advance();
        p.cursor_mut().advance();
        let close = p.parse_matching_token(TokenKind::RParen, open).unwrap();
        (close, p.cursor().current_kind())
    });
    assert!(diagnostics.is_empty());
    assert_eq!(fixture.text(close), ")");
    assert_eq!(kind, TokenKind::Eof);
}

#[test]
fn test_parse_into_module_status() {
    let fixture = Fixture::new("func f() {}\nlet x = 1");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let mut session = ParseSession::new(
        &fixture.sources,
        &fixture.interner,
        &mut diagnostics,
        ParseOptions::eager(),
    );
    let status = parse_into_module(&mut session, &mut module, fixture.buffer);
    assert_eq!(status, ParseStatus::Success);
    assert_eq!(module.items().len(), 2);

    let broken = Fixture::new("let = ");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let mut session = ParseSession::new(
        &broken.sources,
        &broken.interner,
        &mut diagnostics,
        ParseOptions::eager(),
    );
    let status = parse_into_module(&mut session, &mut module, broken.buffer);
    assert_eq!(status, ParseStatus::Error);
}

#[test]
fn test_parse_next_item_one_at_a_time() {
    let fixture = Fixture::new("func a() {}\n}\nfunc b() {}\n");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let mut session = ParseSession::new(
        &fixture.sources,
        &fixture.interner,
        &mut diagnostics,
        ParseOptions::eager(),
    );

    let first = parse_next_item(&mut session, &mut module, fixture.buffer).unwrap();
    assert_eq!(module.items(), &[first]);
    // The stray `}` is not an item; the call goes on to `func b`.
    let second = parse_next_item(&mut session, &mut module, fixture.buffer).unwrap();
    assert_eq!(module.items(), &[first, second]);
    assert!(parse_next_item(&mut session, &mut module, fixture.buffer).is_none());
    assert!(matches!(module.decl(second).kind, DeclKind::Func(_)));
    drop(session);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E1009]);
}

#[test]
fn test_parse_into_module_resumes_after_next_item() {
    let fixture = Fixture::new("func a() {}\nfunc b() {}\nfunc c() {}");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let mut session = ParseSession::new(
        &fixture.sources,
        &fixture.interner,
        &mut diagnostics,
        ParseOptions::eager(),
    );

    parse_next_item(&mut session, &mut module, fixture.buffer).unwrap();
    assert!(session.state.resume_position().is_some());
    parse_into_module(&mut session, &mut module, fixture.buffer);
    assert!(session.state.resume_position().is_none());
    assert_eq!(module.items().len(), 3);
}

#[test]
fn test_foreign_resume_position_is_kept() {
    let mut sources = SourceMap::new();
    let first = sources.add_buffer("a.lark", "let a = 1\nlet b = 2").unwrap();
    let second = sources.add_buffer("b.lark", "let c = 3").unwrap();
    let interner = StringInterner::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut session = ParseSession::new(&sources, &interner, &mut diagnostics, ParseOptions::eager());

    let mut module_a = Module::new();
    parse_next_item(&mut session, &mut module_a, first).unwrap();
    let pending = session.state.resume_position().unwrap();

    let mut module_b = Module::new();
    parse_into_module(&mut session, &mut module_b, second);
    assert_eq!(module_b.items().len(), 1);
    assert_eq!(session.state.resume_position(), Some(pending));

    parse_into_module(&mut session, &mut module_a, first);
    assert_eq!(module_a.items().len(), 2);
}

#[test]
fn test_comments_are_collected_once() {
    let fixture = Fixture::new("// one\nfunc f() {} // two\n// three\nlet x = 1");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let mut session = ParseSession::new(
        &fixture.sources,
        &fixture.interner,
        &mut diagnostics,
        ParseOptions::eager().with_comments(true),
    );
    parse_next_item(&mut session, &mut module, fixture.buffer).unwrap();
    parse_into_module(&mut session, &mut module, fixture.buffer);

    let comments: Vec<&str> = module.comments().iter().map(|&s| fixture.text(s)).collect();
    assert_eq!(comments, vec!["// one", "// two", "// three"]);
}

#[test]
fn test_comments_off_by_default() {
    let fixture = Fixture::new("// one\nfunc f() {}");
    let (module, _) = fixture.parse(ParseOptions::default());
    assert!(module.comments().is_empty());
}
