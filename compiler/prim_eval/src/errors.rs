use prim_ir::Type;

use crate::Value;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("line {line}: variable `{name}` is not in memory")]
    UnboundVariable { name: String, line: u32 },

    #[error("line {line}: expected a value of type `{expected}`, found {found:?}")]
    TypeMismatch {
        expected: Type,
        found: Value,
        line: u32,
    },

    #[error("no guarded command matched")]
    NoMatchingCommand,
}

pub type EvalResult<T> = Result<T, EvalError>;
