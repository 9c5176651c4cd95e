//! Compile errors for the prim compiler.
//!
//! Every failure a user can cause maps to one [`CompileError`] variant with
//! a stable [`ErrorCode`] for searchability. Compilation stops at the first
//! error; there are no partial results and no error recovery.

mod error_code;
mod errors;

pub use error_code::ErrorCode;
pub use errors::CompileError;

/// Result alias used throughout the compiler.
pub type CompileResult<T> = Result<T, CompileError>;
