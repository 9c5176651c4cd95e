//! One-line rendering of decorated expressions.
//!
//! Used in diagnostics, logging and guarded-command listings. Parentheses
//! are only emitted where the tree shape would otherwise be ambiguous:
//!
//! ```text
//! x = if a < 1 then b * (c + 1) else 0; eat()
//! ```

use std::fmt;

use crate::stack::ensure_sufficient_stack;
use crate::{Expr, ExprKind};

/// Binding strength of each node kind; lower binds tighter.
fn level(expr: &Expr) -> u8 {
    match expr.kind {
        ExprKind::Literal(_) | ExprKind::Var(_) | ExprKind::Call { .. } => 0,
        ExprKind::Not(_) => 1,
        ExprKind::Binary { .. } => 2,
        ExprKind::IfElse { .. } => 3,
        ExprKind::Assign { .. } => 4,
        ExprKind::Chain { .. } => 5,
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Inner,
}

fn needs_parens(parent: &Expr, child: &Expr, side: Side) -> bool {
    match (&parent.kind, &child.kind) {
        (ExprKind::Binary { op: outer, .. }, ExprKind::Binary { op: inner, .. }) => {
            match side {
                Side::Left => inner.precedence() > outer.precedence(),
                Side::Right | Side::Inner => inner.precedence() >= outer.precedence(),
            }
        }
        (ExprKind::Not(_), ExprKind::Not(_)) | (ExprKind::Chain { .. }, ExprKind::Chain { .. }) => {
            false
        }
        _ => level(child) >= level(parent) && level(child) > 0,
    }
}

struct Child<'a> {
    parent: &'a Expr,
    child: &'a Expr,
    side: Side,
}

fn child<'a>(parent: &'a Expr, child: &'a Expr, side: Side) -> Child<'a> {
    Child {
        parent,
        child,
        side,
    }
}

impl fmt::Display for Child<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_parens(self.parent, self.child, self.side) {
            write!(f, "({})", self.child)
        } else {
            write!(f, "{}", self.child)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &self.kind {
            ExprKind::Literal(literal) => write!(f, "{literal}"),
            ExprKind::Var(name) => f.write_str(name),
            ExprKind::Not(operand) => write!(f, "!{}", child(self, operand, Side::Inner)),
            ExprKind::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            ExprKind::Binary { left, op, right } => write!(
                f,
                "{} {} {}",
                child(self, left, Side::Left),
                op.as_symbol(),
                child(self, right, Side::Right)
            ),
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            } => write!(
                f,
                "if {} then {} else {}",
                child(self, cond, Side::Inner),
                child(self, then_branch, Side::Inner),
                child(self, else_branch, Side::Inner)
            ),
            ExprKind::Assign { target, value } => {
                write!(f, "{target} = {}", child(self, value, Side::Inner))
            }
            ExprKind::Chain { first, second } => write!(
                f,
                "{}; {}",
                child(self, first, Side::Left),
                child(self, second, Side::Right)
            ),
        })
    }
}
