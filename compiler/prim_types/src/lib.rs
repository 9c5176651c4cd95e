//! Type checking for the prim compiler.
//!
//! [`check`] turns a [`RawProgram`](prim_ir::RawProgram) into a
//! [`DecoratedProgram`](prim_ir::DecoratedProgram), resolving the type of
//! every node against a persistent [`TypeEnv`]. Operations from a
//! [`RuntimeLibrary`](prim_ir::RuntimeLibrary) are injected as `PROVIDED`
//! declarations ahead of the program's own members by [`inject_runtime`].

mod check;
mod env;
mod runtime;

pub use check::{check, literal_from_token};
pub use env::TypeEnv;
pub use runtime::inject_runtime;
