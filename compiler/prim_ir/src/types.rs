//! The closed type model.

use std::fmt;

/// A resolved type.
///
/// `Function` equality is structural: two function types are equal when
/// their parameter lists and return types are equal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Void,
    Int,
    Bool,
    Function { params: Vec<Type>, ret: Box<Type> },
}

impl Type {
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Whether this is one of the value types `void`, `int` or `bool`.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Type::Function { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Int => f.write_str("int"),
            Type::Bool => f.write_str("bool"),
            Type::Function { params, ret } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}

#[cfg(test)]
mod tests;
