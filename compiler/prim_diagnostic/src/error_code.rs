use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Literal/token errors
/// - E2xxx: Type and lowering errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Token Errors (E0xxx)
    /// Invalid literal token
    E0003,

    // Type Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown identifier
    E2003,
    /// Argument count mismatch
    E2004,
    /// Duplicate top-level name
    E2006,
    /// Assignment target is not a name
    E2030,
    /// Runtime operation cannot be exposed
    E2040,
    /// No entry function
    E2050,
    /// Entry function takes parameters
    E2051,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0003 => "E0003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2030 => "E2030",
            ErrorCode::E2040 => "E2040",
            ErrorCode::E2050 => "E2050",
            ErrorCode::E2051 => "E2051",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
