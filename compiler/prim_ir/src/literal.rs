//! Literal values.

use std::fmt;

use crate::Type;

/// A literal constant. Its type is determined by its kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Int(i32),
    Bool(bool),
}

impl Literal {
    pub const TRUE: Literal = Literal::Bool(true);
    pub const FALSE: Literal = Literal::Bool(false);

    pub fn ty(self) -> Type {
        match self {
            Literal::Int(_) => Type::Int,
            Literal::Bool(_) => Type::Bool,
        }
    }

    /// Parse a literal token as produced by a lexer.
    ///
    /// Accepts `true`, `false` and optionally signed decimal integers that
    /// fit in 32 bits. Returns `None` for anything else; callers attach
    /// the source line and report the failure.
    pub fn from_token(text: &str) -> Option<Literal> {
        match text {
            "true" => Some(Literal::TRUE),
            "false" => Some(Literal::FALSE),
            _ => {
                let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                text.parse::<i32>().ok().map(Literal::Int)
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests;
