use pretty_assertions::assert_eq;

use super::*;
use crate::StringInterner;

fn func(module: &mut Module, name: Name, span: Span, state: BodyState) -> DeclId {
    module.alloc_decl(
        DeclKind::Func(FuncDecl {
            name,
            params: Vec::new(),
            result: None,
            body: Some(FuncBody { span, state }),
        }),
        span,
    )
}

#[test]
fn body_state_transitions() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let f = func(
        &mut module,
        interner.intern("f"),
        Span::new(0, 10),
        BodyState::Unparsed,
    );
    assert_eq!(module.body_state(f), Some(BodyState::Unparsed));

    module.set_body_state(f, BodyState::Parsing);
    assert_eq!(module.body_state(f), Some(BodyState::Parsing));

    let block = module.arena.alloc_block(Vec::new(), Span::new(5, 10));
    module.set_body_state(f, BodyState::Parsed(block));
    assert_eq!(module.body_state(f).and_then(BodyState::block), Some(block));
}

#[test]
fn decls_in_order_visits_nested_declarations() {
    let interner = StringInterner::new();
    let mut module = Module::new();

    // struct S { func m() {} }
    let m = func(
        &mut module,
        interner.intern("m"),
        Span::new(11, 20),
        BodyState::Unparsed,
    );
    let s = module.alloc_decl(
        DeclKind::Struct(StructDecl {
            name: interner.intern("S"),
            members: vec![m],
        }),
        Span::new(0, 22),
    );

    // func f() { let x = 1 }
    let x = module.alloc_decl(
        DeclKind::Var(VarDecl {
            name: interner.intern("x"),
            mutable: false,
            ty: None,
            init: None,
        }),
        Span::new(35, 44),
    );
    let stmt = module.arena.alloc_stmt(StmtKind::Decl(x), Span::new(35, 44));
    let block = module.arena.alloc_block(vec![stmt], Span::new(33, 46));
    let f = func(
        &mut module,
        interner.intern("f"),
        Span::new(23, 46),
        BodyState::Parsed(block),
    );

    module.push_item(s);
    module.push_item(f);

    assert_eq!(module.child_decls(s), vec![m]);
    assert_eq!(module.child_decls(f), vec![x]);
    assert_eq!(module.decls_in_order(), vec![s, m, f, x]);
    assert_eq!(module.unparsed_bodies(), vec![(m, Span::new(11, 20))]);
}

#[test]
fn unparsed_body_hides_its_children() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let f = func(
        &mut module,
        interner.intern("f"),
        Span::new(0, 10),
        BodyState::Unparsed,
    );
    module.push_item(f);
    assert!(module.child_decls(f).is_empty());
}

#[test]
fn decls_without_body() {
    let interner = StringInterner::new();
    let mut module = Module::new();
    let import = module.alloc_decl(
        DeclKind::Import(ImportDecl {
            path: vec![interner.intern("core")],
        }),
        Span::new(0, 11),
    );
    assert_eq!(module.body_state(import), None);
}
