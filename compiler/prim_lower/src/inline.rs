//! Whole-program function inlining.
//!
//! The entry function is the last user-defined function; it takes no
//! parameters. Starting from its body, every earlier user function is
//! inlined, from the second-to-last back to the first. A function can only
//! call functions declared before it, so once a function has been inlined
//! nothing later in the fold can reintroduce a call to it.
//!
//! # Argument passing
//!
//! Arguments are substituted lazily: each occurrence of a parameter in the
//! body becomes its own copy of the argument expression. An argument that
//! calls a `PROVIDED` function and is used twice therefore makes that call
//! twice, and an argument used zero times never makes it.

use prim_diagnostic::{CompileError, CompileResult};
use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{Expr, ExprKind, Function, Param};

use crate::subst::{substitute, Substitution};

/// Replace every application of `callee` in `expr` by a copy of `body`
/// whose parameters are replaced by the call's arguments.
///
/// Arguments are processed before the call that receives them. The pasted
/// body is not searched again, so a body that calls `callee` itself keeps
/// those calls: one pass inlines exactly one level.
pub(crate) fn inline_calls(
    expr: Expr,
    callee: &str,
    params: &[Param],
    body: &Expr,
) -> CompileResult<Expr> {
    ensure_sufficient_stack(|| {
        let expr = expr.try_map_children(|child| inline_calls(child, callee, params, body))?;
        match expr.kind {
            ExprKind::Call { name, args } if name == callee => {
                let map: Substitution = params
                    .iter()
                    .map(|param| param.name.clone())
                    .zip(args)
                    .collect();
                substitute(body.clone(), &map)
            }
            kind => Ok(Expr::new(kind, expr.ty, expr.line)),
        }
    })
}

/// Inline every user function into the entry function's body.
///
/// `functions` must be free of self-calls (unrolled) and in declaration
/// order. `PROVIDED` functions are skipped; calls to them survive.
#[tracing::instrument(level = "debug", skip_all, fields(functions = functions.len()))]
pub fn inline_program(functions: Vec<Function>) -> CompileResult<Expr> {
    let mut user: Vec<Function> = functions.into_iter().filter(|f| !f.is_provided()).collect();

    let entry = user.pop().ok_or(CompileError::MissingEntryFunction)?;
    if !entry.params.is_empty() {
        return Err(CompileError::InvalidEntryFunction {
            name: entry.name,
            line: entry.line,
        });
    }
    tracing::debug!(entry = %entry.name, "inlining into entry function");

    let Some(main) = entry.body.as_defined().cloned() else {
        return Err(CompileError::MissingEntryFunction);
    };

    user.iter().rev().try_fold(main, |acc, function| {
        let Some(body) = function.body.as_defined() else {
            return Ok(acc);
        };
        tracing::trace!(name = %function.name, "inlining function");
        inline_calls(acc, &function.name, &function.params, body)
    })
}
