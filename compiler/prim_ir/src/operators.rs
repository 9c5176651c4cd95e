//! Binary operators.
//!
//! Every operator belongs to an [`OpClass`] that fixes its typing rule:
//!
//! | Class        | Operators            | Operands   | Result |
//! |--------------|----------------------|------------|--------|
//! | Arithmetic   | `* / % + -`          | int, int   | int    |
//! | Comparison   | `< <= > >=`          | int, int   | bool   |
//! | Equality     | `== !=`              | T, T       | bool   |
//! | Logical      | `&& \|\|`            | bool, bool | bool   |

use crate::{Literal, Type};

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Mul,
    Div,
    Mod,
    Add,
    Sub,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Equality
    Eq,
    NotEq,

    // Logical
    And,
    Or,
}

/// Typing class of a binary operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpClass {
    Arithmetic,
    Comparison,
    Equality,
    Logical,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 13] = [
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Add,
        Self::Sub,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::Eq,
        Self::NotEq,
        Self::And,
        Self::Or,
    ];

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Lower number = binds tighter. Only used when printing.
    /// - 1: `*` `/` `%`
    /// - 2: `+` `-`
    /// - 3: `<` `<=` `>` `>=`
    /// - 4: `==` `!=`
    /// - 5: `&&`
    /// - 6: `||`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 1,
            Self::Add | Self::Sub => 2,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Eq | Self::NotEq => 4,
            Self::And => 5,
            Self::Or => 6,
        }
    }

    pub const fn class(self) -> OpClass {
        match self {
            Self::Mul | Self::Div | Self::Mod | Self::Add | Self::Sub => OpClass::Arithmetic,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => OpClass::Comparison,
            Self::Eq | Self::NotEq => OpClass::Equality,
            Self::And | Self::Or => OpClass::Logical,
        }
    }

    /// The type produced by applying this operator to well-typed operands.
    pub fn result_type(self) -> Type {
        match self.class() {
            OpClass::Arithmetic => Type::Int,
            OpClass::Comparison | OpClass::Equality | OpClass::Logical => Type::Bool,
        }
    }

    /// The type both operands must have, or `None` for equality, where
    /// operands only need to agree with each other.
    pub fn operand_type(self) -> Option<Type> {
        match self.class() {
            OpClass::Arithmetic | OpClass::Comparison => Some(Type::Int),
            OpClass::Logical => Some(Type::Bool),
            OpClass::Equality => None,
        }
    }

    /// Apply this operator to two integers.
    ///
    /// Arithmetic wraps on overflow (32-bit two's complement). Returns `None`
    /// for division or remainder by zero and for logical operators.
    pub fn apply_int(self, a: i32, b: i32) -> Option<Literal> {
        let value = match self {
            Self::Mul => Literal::Int(a.wrapping_mul(b)),
            Self::Div | Self::Mod if b == 0 => return None,
            Self::Div => Literal::Int(a.wrapping_div(b)),
            Self::Mod => Literal::Int(a.wrapping_rem(b)),
            Self::Add => Literal::Int(a.wrapping_add(b)),
            Self::Sub => Literal::Int(a.wrapping_sub(b)),
            Self::Lt => Literal::Bool(a < b),
            Self::LtEq => Literal::Bool(a <= b),
            Self::Gt => Literal::Bool(a > b),
            Self::GtEq => Literal::Bool(a >= b),
            Self::Eq => Literal::Bool(a == b),
            Self::NotEq => Literal::Bool(a != b),
            Self::And | Self::Or => return None,
        };
        Some(value)
    }

    /// Apply this operator to two booleans. Returns `None` for operators
    /// that do not take booleans.
    pub fn apply_bool(self, a: bool, b: bool) -> Option<Literal> {
        match self {
            Self::And => Some(Literal::Bool(a && b)),
            Self::Or => Some(Literal::Bool(a || b)),
            Self::Eq => Some(Literal::Bool(a == b)),
            Self::NotEq => Some(Literal::Bool(a != b)),
            _ => None,
        }
    }
}
