//! Syntax tree for Lark.
//!
//! Nodes live in flat arenas and refer to each other through `u32` ids.
//! Declarations are owned by the `Module`; expressions, statements and
//! blocks by its `ExprArena`.
//!
//! Function bodies and top-level code carry a `BodyState`, so a body can be
//! recorded during the first pass and parsed later.

use crate::{Name, Span};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            fn from_len(len: usize) -> Self {
                $name(
                    u32::try_from(len)
                        .unwrap_or_else(|_| panic!("{} arena exceeded u32::MAX", stringify!($name))),
                )
            }
        }
    };
}

define_id!(
    /// Index of a declaration in its `Module`.
    DeclId
);
define_id!(ExprId);
define_id!(StmtId);
define_id!(BlockId);

/// A named type with optional generic arguments: `Array<Int>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub name: Name,
    pub args: Vec<TypeRef>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

/// Parse state of a postponable body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyState {
    /// Recorded during the first pass; its tokens have not been parsed.
    Unparsed,
    /// A delayed parse of this body is in progress.
    Parsing,
    Parsed(BlockId),
}

impl BodyState {
    #[inline]
    pub fn is_unparsed(self) -> bool {
        matches!(self, BodyState::Unparsed)
    }

    #[inline]
    pub fn block(self) -> Option<BlockId> {
        match self {
            BodyState::Parsed(block) => Some(block),
            BodyState::Unparsed | BodyState::Parsing => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncBody {
    /// Braces included.
    pub span: Span,
    pub state: BodyState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub result: Option<TypeRef>,
    /// `None` when the body is missing entirely.
    pub body: Option<FuncBody>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Name,
    /// `var` rather than `let`.
    pub mutable: bool,
    pub ty: Option<TypeRef>,
    pub init: Option<ExprId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDecl {
    pub name: Name,
    pub members: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: Vec<Name>,
}

/// Statements written directly at file scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopLevelCodeDecl {
    pub body: BodyState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Func(FuncDecl),
    Var(VarDecl),
    Struct(StructDecl),
    Import(ImportDecl),
    TopLevelCode(TopLevelCodeDecl),
    /// Placeholder for a declaration that failed to parse.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident(Name),
    /// Value is read back from the source through the span.
    Int,
    Float,
    Bool(bool),
    /// A string literal without interpolation, or a literal run of one.
    Str,
    /// Alternating literal runs and parenthesized interpolated expressions.
    Interpolated(Vec<ExprId>),
    Paren(ExprId),
    Tuple(Vec<ExprId>),
    Array(Vec<ExprId>),
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Member {
        base: ExprId,
        name: Name,
    },
    Unary {
        op: Name,
        operand: ExprId,
    },
    /// Operator sequences are left-folded; precedence is resolved later.
    Binary {
        op: Name,
        lhs: ExprId,
        rhs: ExprId,
    },
    Assign {
        target: ExprId,
        value: ExprId,
    },
    /// Where the completion marker stood.
    CodeCompletion,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    Expr(ExprId),
    Decl(DeclId),
    Return(Option<ExprId>),
    If {
        cond: ExprId,
        then_block: BlockId,
        else_block: Option<BlockId>,
    },
    While {
        cond: ExprId,
        body: BlockId,
    },
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<StmtId>,
    /// Braces included.
    pub span: Span,
}

/// Storage for expressions, statements and blocks.
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
}

impl ExprArena {
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::from_len(self.exprs.len());
        self.exprs.push(Expr { kind, span });
        id
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId::from_len(self.stmts.len());
        self.stmts.push(Stmt { kind, span });
        id
    }

    pub fn alloc_block(&mut self, stmts: Vec<StmtId>, span: Span) -> BlockId {
        let id = BlockId::from_len(self.blocks.len());
        self.blocks.push(Block { stmts, span });
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

/// Every declaration parsed from one translation unit.
#[derive(Debug, Default)]
pub struct Module {
    decls: Vec<Decl>,
    items: Vec<DeclId>,
    comments: Vec<Span>,
    pub arena: ExprArena,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_decl(&mut self, kind: DeclKind, span: Span) -> DeclId {
        let id = DeclId::from_len(self.decls.len());
        self.decls.push(Decl { kind, span });
        id
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Record a file-scope declaration.
    pub fn push_item(&mut self, id: DeclId) {
        self.items.push(id);
    }

    /// File-scope declarations in source order.
    pub fn items(&self) -> &[DeclId] {
        &self.items
    }

    pub fn push_comment(&mut self, span: Span) {
        self.comments.push(span);
    }

    pub fn comments(&self) -> &[Span] {
        &self.comments
    }

    /// State of the postponable body of `id`, if it has one.
    pub fn body_state(&self, id: DeclId) -> Option<BodyState> {
        match &self.decl(id).kind {
            DeclKind::Func(func) => func.body.as_ref().map(|body| body.state),
            DeclKind::TopLevelCode(code) => Some(code.body),
            DeclKind::Var(_) | DeclKind::Struct(_) | DeclKind::Import(_) | DeclKind::Error => {
                None
            }
        }
    }

    /// Overwrite the body state of `id`.
    ///
    /// # Panics
    /// Panics if `id` has no postponable body.
    pub fn set_body_state(&mut self, id: DeclId, state: BodyState) {
        match &mut self.decl_mut(id).kind {
            DeclKind::Func(FuncDecl {
                body: Some(body), ..
            }) => body.state = state,
            DeclKind::TopLevelCode(code) => code.body = state,
            other => panic!("declaration {id:?} has no body: {other:?}"),
        }
    }

    /// Declarations directly nested in `id`: struct members and the
    /// declarations inside a parsed body.
    pub fn child_decls(&self, id: DeclId) -> Vec<DeclId> {
        let mut out = Vec::new();
        match &self.decl(id).kind {
            DeclKind::Struct(s) => out.extend_from_slice(&s.members),
            DeclKind::Func(FuncDecl {
                body: Some(FuncBody {
                    state: BodyState::Parsed(block),
                    ..
                }),
                ..
            })
            | DeclKind::TopLevelCode(TopLevelCodeDecl {
                body: BodyState::Parsed(block),
            }) => self.collect_block_decls(*block, &mut out),
            DeclKind::Func(_)
            | DeclKind::TopLevelCode(_)
            | DeclKind::Var(_)
            | DeclKind::Import(_)
            | DeclKind::Error => {}
        }
        out
    }

    fn collect_block_decls(&self, block: BlockId, out: &mut Vec<DeclId>) {
        for &stmt in &self.arena.block(block).stmts {
            match &self.arena.stmt(stmt).kind {
                StmtKind::Decl(decl) => out.push(*decl),
                StmtKind::If {
                    then_block,
                    else_block,
                    ..
                } => {
                    self.collect_block_decls(*then_block, out);
                    if let Some(else_block) = else_block {
                        self.collect_block_decls(*else_block, out);
                    }
                }
                StmtKind::While { body, .. } => self.collect_block_decls(*body, out),
                StmtKind::Expr(_) | StmtKind::Return(_) | StmtKind::Error => {}
            }
        }
    }

    /// Every reachable declaration, pre-order, in source order.
    pub fn decls_in_order(&self) -> Vec<DeclId> {
        let mut out = Vec::with_capacity(self.decls.len());
        let mut stack: Vec<DeclId> = self.items.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.child_decls(id).into_iter().rev());
        }
        out
    }

    /// Function bodies still waiting to be parsed, with their spans.
    pub fn unparsed_bodies(&self) -> Vec<(DeclId, Span)> {
        self.decls_in_order()
            .into_iter()
            .filter_map(|id| match &self.decl(id).kind {
                DeclKind::Func(FuncDecl {
                    body: Some(body), ..
                }) if body.state.is_unparsed() => Some((id, body.span)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
