//! Constant folding.
//!
//! A bottom-up rewrite that evaluates what is already known:
//! - `!` applied to a boolean literal
//! - a binary operator applied to two literals of the same kind
//! - `if` with a literal condition, collapsed to the chosen branch
//!
//! Integer arithmetic wraps. Division or remainder by a literal zero is
//! left in place for the target to handle. Nothing else is rewritten: no
//! algebraic identities, no short-circuiting on one known operand.

use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{BinaryOp, Expr, ExprKind, Literal};

#[must_use]
pub fn simplify(expr: Expr) -> Expr {
    ensure_sufficient_stack(|| {
        let expr = expr.map_children(simplify);
        let Expr { kind, ty, line } = expr;
        match kind {
            ExprKind::Not(operand) => match operand.as_literal() {
                Some(Literal::Bool(value)) => Expr::bool(!value, line),
                Some(Literal::Int(_)) => {
                    unreachable!("`!` applied to an integer after type checking")
                }
                None => Expr::new(ExprKind::Not(operand), ty, line),
            },
            ExprKind::Binary { left, op, right } => {
                match (left.as_literal(), right.as_literal()) {
                    (Some(l), Some(r)) => match fold_binary(op, l, r) {
                        Some(folded) => Expr::literal(folded, line),
                        None => Expr::new(ExprKind::Binary { left, op, right }, ty, line),
                    },
                    _ => Expr::new(ExprKind::Binary { left, op, right }, ty, line),
                }
            }
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            } => match cond.as_literal() {
                Some(Literal::Bool(true)) => *then_branch,
                Some(Literal::Bool(false)) => *else_branch,
                Some(Literal::Int(_)) => unreachable!("integer `if` condition after type checking"),
                None => Expr::new(
                    ExprKind::IfElse {
                        cond,
                        then_branch,
                        else_branch,
                    },
                    ty,
                    line,
                ),
            },
            kind => Expr::new(kind, ty, line),
        }
    })
}

/// Fold `l op r`. Returns `None` when the operation must stay for the
/// target: division or remainder by zero.
fn fold_binary(op: BinaryOp, l: Literal, r: Literal) -> Option<Literal> {
    match (l, r) {
        (Literal::Int(a), Literal::Int(b)) => {
            let folded = op.apply_int(a, b);
            if folded.is_none() {
                tracing::warn!(
                    op = op.as_symbol(),
                    lhs = a,
                    "division by literal zero left unfolded"
                );
            }
            folded
        }
        (Literal::Bool(a), Literal::Bool(b)) => Some(
            op.apply_bool(a, b)
                .unwrap_or_else(|| unreachable!("`{}` applied to booleans", op.as_symbol())),
        ),
        _ => unreachable!(
            "`{}` applied to literals of different kinds after type checking",
            op.as_symbol()
        ),
    }
}
