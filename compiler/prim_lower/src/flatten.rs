//! Guarded-command flattening.
//!
//! The target machine has no conditionals inside actions: a program is an
//! ordered list of `condition --> action` rules and the first rule whose
//! condition holds fires. Flattening runs in two steps.
//!
//! 1. **Hoisting** pushes every `if` outwards until the expression is a
//!    tree of `if`s whose conditions and leaves are conditional-free.
//! 2. **Collecting** walks that tree and emits one [`GuardedCommand`] per
//!    leaf, guarding then-leaves with the conjunction of their conditions.
//!
//! Hoisting evaluates every condition against the state before the whole
//! expression runs, as the target does. The result is equivalent to the
//! input when conditions are pure and read no cell an earlier part of the
//! same expression writes.

use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{BinaryOp, Expr, ExprKind, GuardedCommand, Type};

/// Flatten `expr` into an exhaustive first-match rule list.
///
/// The list is never empty, its last condition is the literal `true`, and
/// no condition or action contains an `if`.
#[tracing::instrument(level = "debug", skip_all, fields(line = expr.line))]
pub fn flatten(expr: Expr) -> Vec<GuardedCommand> {
    let hoisted = hoist(expr);
    let mut commands = Vec::new();
    collect(hoisted, &mut commands);
    tracing::debug!(commands = commands.len(), "flattened expression");
    commands
}

/// Rewrite `expr` so that `if` only appears as an outer tree whose
/// conditions are conditional-free.
fn hoist(expr: Expr) -> Expr {
    ensure_sufficient_stack(|| {
        let Expr { kind, ty, line } = expr;
        match kind {
            ExprKind::Literal(_) | ExprKind::Var(_) => Expr::new(kind, ty, line),
            ExprKind::Not(operand) => distribute(hoist(*operand), &|e| Expr::not(e, line)),
            ExprKind::Assign { target, value } => {
                distribute(hoist(*value), &|e| Expr::assign(target.clone(), e, line))
            }
            ExprKind::Binary { left, op, right } => {
                combine(hoist(*left), hoist(*right), &|l, r| Expr::binary(l, op, r, line))
            }
            ExprKind::Chain { first, second } => {
                combine(hoist(*first), hoist(*second), &|a, b| Expr::chain(a, b, line))
            }
            ExprKind::Call { name, args } => {
                let args = args.into_iter().map(hoist).collect();
                hoist_call(&name, args, &ty, line)
            }
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            } => hoist_condition(hoist(*cond), hoist(*then_branch), hoist(*else_branch), line),
        }
    })
}

/// Apply `wrap` at every leaf of a hoisted tree.
fn distribute(expr: Expr, wrap: &impl Fn(Expr) -> Expr) -> Expr {
    match expr.kind {
        ExprKind::IfElse {
            cond,
            then_branch,
            else_branch,
        } => Expr::if_else(
            *cond,
            distribute(*then_branch, wrap),
            distribute(*else_branch, wrap),
            expr.line,
        ),
        kind => wrap(Expr::new(kind, expr.ty, expr.line)),
    }
}

/// Combine two hoisted operands with `join`.
///
/// With both operands conditional the four outcomes are split in order:
/// both conditions, only the first, only the second, neither.
fn combine(left: Expr, right: Expr, join: &impl Fn(Expr, Expr) -> Expr) -> Expr {
    match (left.kind, right.kind) {
        (
            ExprKind::IfElse {
                cond: c1,
                then_branch: a,
                else_branch: b,
            },
            ExprKind::IfElse {
                cond: c2,
                then_branch: d,
                else_branch: e,
            },
        ) => {
            let line = left.line;
            let both = Expr::binary((*c1).clone(), BinaryOp::And, (*c2).clone(), line);
            let (a, b, d, e) = (*a, *b, *d, *e);
            let only_second = Expr::if_else(
                *c2,
                combine(b.clone(), d.clone(), join),
                combine(b, e.clone(), join),
                line,
            );
            let only_first = Expr::if_else(*c1, combine(a.clone(), e, join), only_second, line);
            Expr::if_else(both, combine(a, d, join), only_first, line)
        }
        (
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            },
            right_kind,
        ) => {
            let right = Expr::new(right_kind, right.ty, right.line);
            Expr::if_else(
                *cond,
                combine(*then_branch, right.clone(), join),
                combine(*else_branch, right, join),
                left.line,
            )
        }
        (
            left_kind,
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            },
        ) => {
            let left = Expr::new(left_kind, left.ty, left.line);
            Expr::if_else(
                *cond,
                combine(left.clone(), *then_branch, join),
                combine(left, *else_branch, join),
                right.line,
            )
        }
        (left_kind, right_kind) => join(
            Expr::new(left_kind, left.ty, left.line),
            Expr::new(right_kind, right.ty, right.line),
        ),
    }
}

/// Split a call over its left-most conditional argument, repeatedly.
fn hoist_call(name: &str, mut args: Vec<Expr>, ty: &Type, line: u32) -> Expr {
    let Some(index) = args
        .iter()
        .position(|arg| matches!(arg.kind, ExprKind::IfElse { .. }))
    else {
        return Expr::call(name, args, ty.clone(), line);
    };

    let arg = args.remove(index);
    let ExprKind::IfElse {
        cond,
        then_branch,
        else_branch,
    } = arg.kind
    else {
        unreachable!("argument at {index} was matched as a conditional");
    };

    let mut then_args = args.clone();
    then_args.insert(index, *then_branch);
    let mut else_args = args;
    else_args.insert(index, *else_branch);

    Expr::if_else(
        *cond,
        hoist_call(name, then_args, ty, line),
        hoist_call(name, else_args, ty, line),
        line,
    )
}

/// Build `if cond then t else e` where `cond` may itself be a hoisted tree.
fn hoist_condition(cond: Expr, then_branch: Expr, else_branch: Expr, line: u32) -> Expr {
    match cond.kind {
        ExprKind::IfElse {
            cond: inner,
            then_branch: a,
            else_branch: b,
        } => Expr::if_else(
            *inner,
            hoist_condition(*a, then_branch.clone(), else_branch.clone(), line),
            hoist_condition(*b, then_branch, else_branch, line),
            line,
        ),
        kind => Expr::if_else(Expr::new(kind, cond.ty, cond.line), then_branch, else_branch, line),
    }
}

fn collect(expr: Expr, out: &mut Vec<GuardedCommand>) {
    ensure_sufficient_stack(|| match expr.kind {
        ExprKind::IfElse {
            cond,
            then_branch,
            else_branch,
        } => {
            let mut guarded = Vec::new();
            collect(*then_branch, &mut guarded);
            out.extend(guarded.into_iter().map(|command| {
                let condition = if command.condition.is_true() {
                    (*cond).clone()
                } else {
                    let line = cond.line;
                    Expr::binary((*cond).clone(), BinaryOp::And, command.condition, line)
                };
                GuardedCommand::new(condition, command.action)
            }));
            collect(*else_branch, out);
        }
        kind => {
            let action = Expr::new(kind, expr.ty, expr.line);
            out.push(GuardedCommand::new(Expr::bool(true, action.line), action));
        }
    });
}
