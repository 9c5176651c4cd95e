//! Reference evaluator for prim IR.
//!
//! A small tree-walking interpreter over decorated expressions. It exists to
//! check that lowering preserves meaning: a program evaluated before and
//! after a transform must leave the same memory behind and make the same
//! sequence of host calls.
//!
//! # Semantics
//!
//! - Memory maps variable names to values; assignment overwrites.
//! - Operands are evaluated left to right, both always evaluated.
//! - Integer arithmetic wraps; division or remainder by zero yields `0`.
//! - Calls go to a [`Host`], which stands in for the target's runtime.
//! - A guarded-command list runs the first command whose condition holds,
//!   with every condition evaluated against the state before any action.

mod errors;
mod eval;
mod host;

pub use errors::{EvalError, EvalResult};
pub use eval::{eval, init_memory, run_guarded, run_program, Evaluator, Memory};
pub use host::{Host, HostCall, RecordingHost, Value};
