//! Top-level members and whole programs.

use crate::{Expr, RuntimeLibrary, Type};

/// Who supplies a function's implementation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionCategory {
    /// Defined in the program; inlined away during lowering.
    UserDefined,
    /// Supplied by the host runtime; calls survive lowering verbatim.
    Provided,
}

/// A function body, generic over the expression representation so the raw
/// and decorated ASTs share it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionBody<E> {
    Provided,
    Defined(E),
}

impl<E> FunctionBody<E> {
    pub fn category(&self) -> FunctionCategory {
        match self {
            FunctionBody::Provided => FunctionCategory::Provided,
            FunctionBody::Defined(_) => FunctionCategory::UserDefined,
        }
    }

    pub fn as_defined(&self) -> Option<&E> {
        match self {
            FunctionBody::Provided => None,
            FunctionBody::Defined(body) => Some(body),
        }
    }
}

/// Bounded self-recursion: unroll `depth` times, then fall back to `default`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecursiveHeader<E> {
    pub depth: u32,
    pub default: E,
}

/// A named, typed function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

/// A type-checked top-level variable. Its initializer has type `int`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub name: String,
    pub init: Expr,
    pub line: u32,
}

/// A type-checked top-level function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Type,
    pub recursion: Option<RecursiveHeader<Expr>>,
    pub body: FunctionBody<Expr>,
    pub line: u32,
}

impl Function {
    pub fn category(&self) -> FunctionCategory {
        self.body.category()
    }

    pub fn is_provided(&self) -> bool {
        self.category() == FunctionCategory::Provided
    }

    /// The function's signature as a [`Type::Function`].
    pub fn ty(&self) -> Type {
        Type::function(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.ret.clone(),
        )
    }
}

/// Output of type checking: every expression decorated with its type.
///
/// `functions` starts with the injected runtime stubs, followed by the
/// user functions in declaration order.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoratedProgram {
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub runtime: Option<RuntimeLibrary>,
}

/// Output of lowering: variable initializers plus a single `main` expression
/// containing no calls to user-defined functions.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessedProgram {
    pub variables: Vec<Variable>,
    pub main: Expr,
    pub runtime: Option<RuntimeLibrary>,
}
