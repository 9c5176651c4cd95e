//! Prim IR - Intermediate Representation Types
//!
//! Core data structures shared by every stage of the prim compiler:
//! - [`Type`] and [`Literal`], the closed value model
//! - [`BinaryOp`] with its typing class and display precedence
//! - The raw, line-annotated AST handed over by a parser ([`RawExpr`], [`RawProgram`])
//! - The decorated AST where every node carries its resolved [`Type`] ([`Expr`])
//! - [`DecoratedProgram`] and [`ProcessedProgram`], the inputs and outputs of lowering
//! - [`RuntimeLibrary`], the static table of host-provided operations
//! - [`GuardedCommand`], one `condition --> action` rule of a flattened program
//!
//! # Design Philosophy
//!
//! - **Trees, not graphs**: every transform consumes a tree and builds a new one.
//!   A function body inlined at three call sites becomes three independent copies.
//! - **Sum types everywhere**: one enum variant per node kind, matched exhaustively.
//! - **Lines, not spans**: diagnostics only need the source line of a node.

mod expr;
mod format;
mod guarded;
mod literal;
mod operators;
mod program;
mod raw;
mod runtime;
pub mod stack;
mod types;

pub use expr::{Expr, ExprKind};
pub use guarded::GuardedCommand;
pub use literal::Literal;
pub use operators::{BinaryOp, OpClass};
pub use program::{
    DecoratedProgram, Function, FunctionBody, FunctionCategory, Param, ProcessedProgram,
    RecursiveHeader, Variable,
};
pub use raw::{RawExpr, RawExprKind, RawFunction, RawProgram, RawVariable};
pub use runtime::{RuntimeFunction, RuntimeLibrary};
pub use types::Type;
