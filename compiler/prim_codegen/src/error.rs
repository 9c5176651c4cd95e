/// Failures while rendering a processed program for a target.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum RenderError {
    /// A variable with no storage slot on the target.
    #[error("line {line}: variable `{name}` has no storage slot")]
    UnmappedVariable { name: String, line: u32 },

    /// A conditional survived where the target only takes straight-line code.
    #[error("line {line}: conditional expression cannot be rendered inside a rule")]
    NestedConditional { line: u32 },
}

impl RenderError {
    pub fn line(&self) -> u32 {
        match self {
            RenderError::UnmappedVariable { line, .. }
            | RenderError::NestedConditional { line } => *line,
        }
    }
}
