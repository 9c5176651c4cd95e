//! The raw AST produced by a parser.
//!
//! Nothing here is typed yet. Every node carries the source line it came
//! from so that type errors can point back at the program text. The
//! constructor helpers let embedders and tests build trees without a parser.

use crate::{BinaryOp, FunctionBody, Literal, Param, RecursiveHeader, Type};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawExpr {
    pub kind: RawExprKind,
    pub line: u32,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawExprKind {
    Literal(Literal),
    Var(String),
    Not(Box<RawExpr>),
    Call {
        name: String,
        args: Vec<RawExpr>,
    },
    Binary {
        left: Box<RawExpr>,
        op: BinaryOp,
        right: Box<RawExpr>,
    },
    IfElse {
        cond: Box<RawExpr>,
        then_branch: Box<RawExpr>,
        else_branch: Box<RawExpr>,
    },
    Assign {
        target: String,
        value: Box<RawExpr>,
    },
    Chain {
        first: Box<RawExpr>,
        second: Box<RawExpr>,
    },
}

impl RawExpr {
    pub fn new(kind: RawExprKind, line: u32) -> Self {
        RawExpr { kind, line }
    }

    pub fn literal(literal: Literal, line: u32) -> Self {
        Self::new(RawExprKind::Literal(literal), line)
    }

    pub fn int(value: i32, line: u32) -> Self {
        Self::literal(Literal::Int(value), line)
    }

    pub fn bool(value: bool, line: u32) -> Self {
        Self::literal(Literal::Bool(value), line)
    }

    pub fn var(name: impl Into<String>, line: u32) -> Self {
        Self::new(RawExprKind::Var(name.into()), line)
    }

    pub fn not(operand: RawExpr, line: u32) -> Self {
        Self::new(RawExprKind::Not(Box::new(operand)), line)
    }

    pub fn call(name: impl Into<String>, args: Vec<RawExpr>, line: u32) -> Self {
        Self::new(
            RawExprKind::Call {
                name: name.into(),
                args,
            },
            line,
        )
    }

    pub fn binary(left: RawExpr, op: BinaryOp, right: RawExpr, line: u32) -> Self {
        Self::new(
            RawExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            line,
        )
    }

    pub fn if_else(cond: RawExpr, then_branch: RawExpr, else_branch: RawExpr, line: u32) -> Self {
        Self::new(
            RawExprKind::IfElse {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            line,
        )
    }

    pub fn assign(target: impl Into<String>, value: RawExpr, line: u32) -> Self {
        Self::new(
            RawExprKind::Assign {
                target: target.into(),
                value: Box::new(value),
            },
            line,
        )
    }

    pub fn chain(first: RawExpr, second: RawExpr, line: u32) -> Self {
        Self::new(
            RawExprKind::Chain {
                first: Box::new(first),
                second: Box::new(second),
            },
            line,
        )
    }
}

/// `var name = init;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawVariable {
    pub name: String,
    pub init: RawExpr,
    pub line: u32,
}

impl RawVariable {
    pub fn new(name: impl Into<String>, init: RawExpr, line: u32) -> Self {
        RawVariable {
            name: name.into(),
            init,
            line,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFunction {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Type,
    pub recursion: Option<RecursiveHeader<RawExpr>>,
    pub body: FunctionBody<RawExpr>,
    pub line: u32,
}

impl RawFunction {
    /// A user-defined function without a recursive header.
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        ret: Type,
        body: RawExpr,
        line: u32,
    ) -> Self {
        RawFunction {
            name: name.into(),
            params,
            ret,
            recursion: None,
            body: FunctionBody::Defined(body),
            line,
        }
    }

    /// A host-provided function declaration. It has no body to check.
    pub fn provided(name: impl Into<String>, params: Vec<Param>, ret: Type, line: u32) -> Self {
        RawFunction {
            name: name.into(),
            params,
            ret,
            recursion: None,
            body: FunctionBody::Provided,
            line,
        }
    }

    /// Allow the function to call itself, unrolled `depth` times before
    /// falling back to `default`.
    #[must_use]
    pub fn with_recursion(mut self, depth: u32, default: RawExpr) -> Self {
        self.recursion = Some(RecursiveHeader { depth, default });
        self
    }
}

/// A whole program as handed over at the parser boundary.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawProgram {
    pub variables: Vec<RawVariable>,
    pub functions: Vec<RawFunction>,
}

impl RawProgram {
    pub fn new(variables: Vec<RawVariable>, functions: Vec<RawFunction>) -> Self {
        RawProgram {
            variables,
            functions,
        }
    }
}
