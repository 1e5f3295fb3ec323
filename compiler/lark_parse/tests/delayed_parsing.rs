// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the two-pass parse through the public API.

use lark_diagnostic::{Diagnostic, DiagnosticQueue};
use lark_ir::{BodyState, DeclKind, ExprKind, Module, SourceMap, StringInterner};
use lark_parse::{
    parse_delayed_nearest, parse_into_module, perform_delayed_parsing, DelayedStats,
    ParseOptions, ParseSession, ParseStatus,
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = r#"import core.io

struct Point {
    var x: Int
    var y: Int

    func norm() -> Int {
        return x * x + y * y
    }
}

func greet(name: String) -> String {
    let message = "hello, \(name)! \("nested \(name)")"
    return message
}

func main() {
    var p = Point(1, 2)
    if p.norm() > 4 { print(greet("big")) } else { print("small") }
}
"#;

fn sources(text: &str) -> (SourceMap, lark_ir::BufferId) {
    let mut sources = SourceMap::new();
    let buffer = sources.add_buffer("program.lark", text).unwrap();
    (sources, buffer)
}

/// Shape of a module that does not depend on allocation order.
fn shape(module: &Module) -> Vec<String> {
    module
        .decls_in_order()
        .into_iter()
        .map(|id| {
            let decl = module.decl(id);
            let kind = match &decl.kind {
                DeclKind::Func(_) => "func",
                DeclKind::Var(_) => "var",
                DeclKind::Struct(_) => "struct",
                DeclKind::Import(_) => "import",
                DeclKind::TopLevelCode(_) => "code",
                DeclKind::Error => "error",
            };
            let stmts = module
                .body_state(id)
                .and_then(BodyState::block)
                .map_or(0, |block| module.arena.block(block).stmts.len());
            format!("{kind}@{}..{}:{stmts}", decl.span.start, decl.span.end)
        })
        .collect()
}

#[test]
fn delayed_parse_matches_eager_parse() {
    let (sources, buffer) = sources(PROGRAM);
    let interner = StringInterner::new();

    let mut eager_diagnostics: Vec<Diagnostic> = Vec::new();
    let mut eager = Module::new();
    let status = {
        let mut session =
            ParseSession::new(&sources, &interner, &mut eager_diagnostics, ParseOptions::eager());
        parse_into_module(&mut session, &mut eager, buffer)
    };
    assert_eq!(status, ParseStatus::Success, "{eager_diagnostics:?}");

    let mut queue = DiagnosticQueue::new();
    let mut delayed = Module::new();
    let stats = {
        let mut session =
            ParseSession::new(&sources, &interner, &mut queue, ParseOptions::delayed());
        parse_into_module(&mut session, &mut delayed, buffer);
        assert_eq!(delayed.unparsed_bodies().len(), 3);
        perform_delayed_parsing(&mut session, &mut delayed, None).unwrap()
    };
    assert_eq!(stats, DelayedStats { parsed: 3, skipped: 0 });
    assert!(queue.has_errors().is_none());
    assert!(delayed.unparsed_bodies().is_empty());
    assert_eq!(shape(&eager), shape(&delayed));
}

#[test]
fn interpolations_nest() {
    let (sources, buffer) = sources("let s = \"a\\(\"b\\(\"c\\(d)\")\")\"");
    let interner = StringInterner::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    {
        let mut session =
            ParseSession::new(&sources, &interner, &mut diagnostics, ParseOptions::eager());
        parse_into_module(&mut session, &mut module, buffer);
    }
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let DeclKind::Var(var) = &module.decl(module.items()[0]).kind else {
        panic!("expected a variable");
    };
    let mut expr = var.init.unwrap();
    let mut depth = 0;
    while let ExprKind::Interpolated(parts) = &module.arena.expr(expr).kind {
        expr = parts[1];
        depth += 1;
    }
    assert_eq!(depth, 3);
    assert!(matches!(module.arena.expr(expr).kind, ExprKind::Ident(_)));
    assert_eq!(sources.buffer(buffer).slice(module.arena.expr(expr).span), "d");
}

#[test]
fn nearest_leaves_other_bodies_alone() {
    let (sources, buffer) = sources(PROGRAM);
    let interner = StringInterner::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let offset = u32::try_from(PROGRAM.find("return message").unwrap()).unwrap();

    let stats = {
        let mut session =
            ParseSession::new(&sources, &interner, &mut diagnostics, ParseOptions::delayed());
        parse_into_module(&mut session, &mut module, buffer);
        parse_delayed_nearest(&mut session, &mut module, offset).unwrap()
    };
    assert_eq!(stats, DelayedStats { parsed: 1, skipped: 2 });
    assert_eq!(module.unparsed_bodies().len(), 2);
    assert!(diagnostics.is_empty());
}

#[test]
fn recovery_keeps_later_declarations() {
    let text = "func broken( {\n  let = \n}\nfunc fine() { return 1 }\n";
    let (sources, buffer) = sources(text);
    let interner = StringInterner::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut module = Module::new();
    let status = {
        let mut session =
            ParseSession::new(&sources, &interner, &mut diagnostics, ParseOptions::eager());
        parse_into_module(&mut session, &mut module, buffer)
    };
    assert_eq!(status, ParseStatus::Error);
    assert!(!diagnostics.is_empty());

    let last = *module.items().last().unwrap();
    let DeclKind::Func(func) = &module.decl(last).kind else {
        panic!("expected `fine` to survive recovery");
    };
    assert_eq!(interner.lookup(func.name), "fine");
    assert!(matches!(func.body.as_ref().unwrap().state, BodyState::Parsed(_)));
}
