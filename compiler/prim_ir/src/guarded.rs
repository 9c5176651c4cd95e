use std::fmt;

use crate::Expr;

/// One rule of a flattened program: run `action` when `condition` holds.
///
/// A flattened program is an ordered list of these with first-match
/// semantics; the last condition is always the literal `true`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardedCommand {
    pub condition: Expr,
    pub action: Expr,
}

impl GuardedCommand {
    pub fn new(condition: Expr, action: Expr) -> Self {
        GuardedCommand { condition, action }
    }
}

impl fmt::Display for GuardedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {};", self.condition, self.action)
    }
}
