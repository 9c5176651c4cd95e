use prim_ir::Type;

use crate::ErrorCode;

/// A fatal compile error. The first one raised aborts the compile.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum CompileError {
    #[error("line {line}: `{name}` is already declared")]
    ShadowedName { name: String, line: u32 },

    #[error("line {line}: undefined identifier `{name}`")]
    UndefinedIdentifier { name: String, line: u32 },

    #[error("line {line}: cannot assign to `{found}`, expected a variable name")]
    NotAssignableIdentifier { found: String, line: u32 },

    #[error("line {line}: `{function}` takes {expected} argument(s) but {actual} were supplied")]
    WrongNumberOfArgs {
        function: String,
        expected: usize,
        actual: usize,
        line: u32,
    },

    #[error("line {line}: expected `{expected}`, found `{actual}`")]
    UnexpectedType {
        expected: String,
        actual: Type,
        line: u32,
    },

    #[error("runtime `{library}`: operation `{name}` has a signature that cannot be exposed")]
    DisallowedRuntimeFunction { library: String, name: String },

    #[error("line {line}: invalid literal `{text}`")]
    InvalidLiteral { text: String, line: u32 },

    #[error("program has no entry function")]
    MissingEntryFunction,

    #[error("line {line}: entry function `{name}` must not take parameters")]
    InvalidEntryFunction { name: String, line: u32 },
}

impl CompileError {
    /// Placeholder shown as the expected type when a call target is not a
    /// function.
    pub const FUNCTION_EXPECTED: &'static str = "<function>";

    pub fn unexpected_type(expected: &Type, actual: Type, line: u32) -> Self {
        CompileError::UnexpectedType {
            expected: expected.to_string(),
            actual,
            line,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::ShadowedName { .. } => ErrorCode::E2006,
            CompileError::UndefinedIdentifier { .. } => ErrorCode::E2003,
            CompileError::NotAssignableIdentifier { .. } => ErrorCode::E2030,
            CompileError::WrongNumberOfArgs { .. } => ErrorCode::E2004,
            CompileError::UnexpectedType { .. } => ErrorCode::E2001,
            CompileError::DisallowedRuntimeFunction { .. } => ErrorCode::E2040,
            CompileError::InvalidLiteral { .. } => ErrorCode::E0003,
            CompileError::MissingEntryFunction => ErrorCode::E2050,
            CompileError::InvalidEntryFunction { .. } => ErrorCode::E2051,
        }
    }

    /// Source line of the offending node, when the error has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            CompileError::ShadowedName { line, .. }
            | CompileError::UndefinedIdentifier { line, .. }
            | CompileError::NotAssignableIdentifier { line, .. }
            | CompileError::WrongNumberOfArgs { line, .. }
            | CompileError::UnexpectedType { line, .. }
            | CompileError::InvalidLiteral { line, .. }
            | CompileError::InvalidEntryFunction { line, .. } => Some(*line),
            CompileError::DisallowedRuntimeFunction { .. } | CompileError::MissingEntryFunction => {
                None
            }
        }
    }
}
