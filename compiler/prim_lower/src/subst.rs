//! Simultaneous substitution of free names.
//!
//! Expressions bind no names of their own, so every `Var` is free and
//! substitution never has to rename to avoid capture. All replacements in
//! one [`Substitution`] happen at once: a replacement is never itself
//! substituted into, which makes swaps like `{x -> y, y -> x}` well defined.

use prim_diagnostic::{CompileError, CompileResult};
use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{Expr, ExprKind};
use rustc_hash::FxHashMap;

/// Map from a free name to the expression replacing it.
pub type Substitution = FxHashMap<String, Expr>;

/// Replace every free occurrence of a mapped name in `expr`.
///
/// An assignment target is a name, not an expression: it may only be
/// replaced by another name. Replacing it with anything else fails with
/// [`CompileError::NotAssignableIdentifier`].
pub fn substitute(expr: Expr, map: &Substitution) -> CompileResult<Expr> {
    if map.is_empty() {
        return Ok(expr);
    }
    ensure_sufficient_stack(|| substitute_inner(expr, map))
}

fn substitute_inner(expr: Expr, map: &Substitution) -> CompileResult<Expr> {
    match expr.kind {
        ExprKind::Var(ref name) => Ok(map.get(name).cloned().unwrap_or(expr)),
        ExprKind::Assign { target, value } => {
            let target = match map.get(&target) {
                Some(Expr {
                    kind: ExprKind::Var(renamed),
                    ..
                }) => renamed.clone(),
                Some(other) => {
                    return Err(CompileError::NotAssignableIdentifier {
                        found: other.to_string(),
                        line: expr.line,
                    });
                }
                None => target,
            };
            let value = substitute(*value, map)?;
            Ok(Expr::new(
                ExprKind::Assign {
                    target,
                    value: Box::new(value),
                },
                expr.ty,
                expr.line,
            ))
        }
        _ => expr.try_map_children(|child| substitute(child, map)),
    }
}
