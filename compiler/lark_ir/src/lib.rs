//! Lark IR - core data structures shared by the front-end crates.
//!
//! - Spans in a single global offset space, and the `SourceMap` that hands
//!   out disjoint offset ranges to buffers
//! - Tokens (`TokenKind`, `Token`, `TokenFlags`)
//! - Interned names (`Name`, `StringInterner`)
//! - The syntax tree arena (`Module`, `Decl`, `Expr`, `Stmt`, `Block`)
//!
//! Everything here is plain data: no lexing or parsing logic lives in this
//! crate.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod source_map;
mod span;
mod token;

pub use ast::{
    Block, BlockId, BodyState, Decl, DeclId, DeclKind, Expr, ExprArena, ExprId, ExprKind,
    FuncBody, FuncDecl, ImportDecl, Module, Param, Stmt, StmtId, StmtKind, StructDecl,
    TopLevelCodeDecl, TypeRef, VarDecl,
};
pub use interner::StringInterner;
pub use name::Name;
pub use source_map::{BufferId, SourceBuffer, SourceMap, SourceMapError};
pub use span::{Span, SpanError};
pub use token::{Token, TokenFlags, TokenKind};
