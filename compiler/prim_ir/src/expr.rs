//! The decorated AST.
//!
//! Same shapes as [`RawExprKind`](crate::RawExprKind), but every node
//! carries the [`Type`] the checker resolved for it. The constructors
//! compute that type from the node's kind where the kind determines it;
//! `var` and `call` take it from the caller, which knows the binding.

use crate::stack::ensure_sufficient_stack;
use crate::{BinaryOp, Literal, Type};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub line: u32,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Literal(Literal),
    Var(String),
    Not(Box<Expr>),
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    IfElse {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Assign {
        target: String,
        value: Box<Expr>,
    },
    Chain {
        first: Box<Expr>,
        second: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type, line: u32) -> Self {
        Expr { kind, ty, line }
    }

    pub fn literal(literal: Literal, line: u32) -> Self {
        Self::new(ExprKind::Literal(literal), literal.ty(), line)
    }

    pub fn int(value: i32, line: u32) -> Self {
        Self::literal(Literal::Int(value), line)
    }

    pub fn bool(value: bool, line: u32) -> Self {
        Self::literal(Literal::Bool(value), line)
    }

    pub fn var(name: impl Into<String>, ty: Type, line: u32) -> Self {
        Self::new(ExprKind::Var(name.into()), ty, line)
    }

    pub fn not(operand: Expr, line: u32) -> Self {
        Self::new(ExprKind::Not(Box::new(operand)), Type::Bool, line)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, ret: Type, line: u32) -> Self {
        Self::new(
            ExprKind::Call {
                name: name.into(),
                args,
            },
            ret,
            line,
        )
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            op.result_type(),
            line,
        )
    }

    /// Both branches share a type; the node takes the then-branch's.
    pub fn if_else(cond: Expr, then_branch: Expr, else_branch: Expr, line: u32) -> Self {
        let ty = then_branch.ty.clone();
        Self::new(
            ExprKind::IfElse {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            ty,
            line,
        )
    }

    pub fn assign(target: impl Into<String>, value: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Assign {
                target: target.into(),
                value: Box::new(value),
            },
            Type::Void,
            line,
        )
    }

    pub fn chain(first: Expr, second: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Chain {
                first: Box::new(first),
                second: Box::new(second),
            },
            Type::Void,
            line,
        )
    }

    pub fn as_literal(&self) -> Option<Literal> {
        match self.kind {
            ExprKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.as_literal() == Some(Literal::TRUE)
    }

    /// Whether `pred` holds for this node or any node below it.
    pub fn any(&self, pred: &impl Fn(&Expr) -> bool) -> bool {
        ensure_sufficient_stack(|| {
            pred(self)
                || match &self.kind {
                    ExprKind::Literal(_) | ExprKind::Var(_) => false,
                    ExprKind::Not(operand) => operand.any(pred),
                    ExprKind::Call { args, .. } => args.iter().any(|arg| arg.any(pred)),
                    ExprKind::Binary { left, right, .. } => left.any(pred) || right.any(pred),
                    ExprKind::IfElse {
                        cond,
                        then_branch,
                        else_branch,
                    } => cond.any(pred) || then_branch.any(pred) || else_branch.any(pred),
                    ExprKind::Assign { value, .. } => value.any(pred),
                    ExprKind::Chain { first, second } => first.any(pred) || second.any(pred),
                }
        })
    }

    /// Number of nodes in this tree for which `pred` holds.
    pub fn count(&self, pred: &impl Fn(&Expr) -> bool) -> usize {
        ensure_sufficient_stack(|| {
            let below = match &self.kind {
                ExprKind::Literal(_) | ExprKind::Var(_) => 0,
                ExprKind::Not(operand) => operand.count(pred),
                ExprKind::Call { args, .. } => args.iter().map(|arg| arg.count(pred)).sum(),
                ExprKind::Binary { left, right, .. } => left.count(pred) + right.count(pred),
                ExprKind::IfElse {
                    cond,
                    then_branch,
                    else_branch,
                } => cond.count(pred) + then_branch.count(pred) + else_branch.count(pred),
                ExprKind::Assign { value, .. } => value.count(pred),
                ExprKind::Chain { first, second } => first.count(pred) + second.count(pred),
            };
            below + usize::from(pred(self))
        })
    }

    /// Rebuild this node with `f` applied to each direct child expression,
    /// left to right. Names (variables, call targets, assignment targets)
    /// are kept as they are.
    pub fn try_map_children<E>(
        self,
        mut f: impl FnMut(Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        let Expr { kind, ty, line } = self;
        let kind = match kind {
            ExprKind::Literal(_) | ExprKind::Var(_) => kind,
            ExprKind::Not(operand) => ExprKind::Not(Box::new(f(*operand)?)),
            ExprKind::Call { name, args } => ExprKind::Call {
                name,
                args: args.into_iter().map(&mut f).collect::<Result<_, E>>()?,
            },
            ExprKind::Binary { left, op, right } => ExprKind::Binary {
                left: Box::new(f(*left)?),
                op,
                right: Box::new(f(*right)?),
            },
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            } => ExprKind::IfElse {
                cond: Box::new(f(*cond)?),
                then_branch: Box::new(f(*then_branch)?),
                else_branch: Box::new(f(*else_branch)?),
            },
            ExprKind::Assign { target, value } => ExprKind::Assign {
                target,
                value: Box::new(f(*value)?),
            },
            ExprKind::Chain { first, second } => ExprKind::Chain {
                first: Box::new(f(*first)?),
                second: Box::new(f(*second)?),
            },
        };
        Ok(Expr::new(kind, ty, line))
    }

    /// Infallible form of [`Expr::try_map_children`].
    #[must_use]
    pub fn map_children(self, mut f: impl FnMut(Expr) -> Expr) -> Expr {
        match self.try_map_children(|child| Ok::<_, std::convert::Infallible>(f(child))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    pub fn contains_if_else(&self) -> bool {
        self.any(&|e| matches!(e.kind, ExprKind::IfElse { .. }))
    }

    /// Whether this tree calls the function `name` anywhere.
    pub fn calls(&self, name: &str) -> bool {
        self.any(&|e| matches!(&e.kind, ExprKind::Call { name: callee, .. } if callee == name))
    }
}
