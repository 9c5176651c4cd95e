//! Bounded unrolling of self-recursive functions.
//!
//! A function with a recursive header `(depth, default)` is rewritten into
//! one without: its own application sites are inlined `depth` times, each
//! time pasting a copy of the original body, and whatever self-calls remain
//! after that are replaced by `default`, arguments discarded.
//!
//! With body `if n == 0 then 0 else 1 + f(n - 1)` and depth 2, `f(5)`
//! evaluates to `1 + 1 + 1 + 0`: the outer body plus two pasted copies
//! each add one, then the default ends the chain.

use prim_diagnostic::CompileResult;
use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{Expr, ExprKind, Function, FunctionBody};

use crate::inline::inline_calls;

#[tracing::instrument(level = "debug", skip_all, fields(name = %function.name))]
pub fn unroll(function: Function) -> CompileResult<Function> {
    let header = match function.recursion {
        Some(header) => header,
        None => return Ok(function),
    };
    let body = match function.body {
        FunctionBody::Defined(body) => body,
        FunctionBody::Provided => {
            return Ok(Function {
                recursion: None,
                body: FunctionBody::Provided,
                ..function
            });
        }
    };

    let mut unrolled = body.clone();
    for _ in 0..header.depth {
        unrolled = inline_calls(unrolled, &function.name, &function.params, &body)?;
    }
    let unrolled = replace_calls(unrolled, &function.name, &header.default);
    tracing::debug!(depth = header.depth, "unrolled recursive function");

    Ok(Function {
        recursion: None,
        body: FunctionBody::Defined(unrolled),
        ..function
    })
}

/// Replace every call to `callee` with `default`, dropping its arguments.
fn replace_calls(expr: Expr, callee: &str, default: &Expr) -> Expr {
    let is_self_call = matches!(&expr.kind, ExprKind::Call { name, .. } if name == callee);
    if is_self_call {
        return default.clone();
    }
    ensure_sufficient_stack(|| expr.map_children(|child| replace_calls(child, callee, default)))
}

#[cfg(test)]
mod tests;
