//! Code generation for the prim compiler.
//!
//! A [`Backend`] turns a [`ProcessedProgram`] into target text. Every
//! backend follows the same outline: flatten `main` into guarded commands,
//! prepend a one-shot initialization rule that stores the variables'
//! initial values, then print one rule per line.
//!
//! [`CritterBackend`] targets the critter world's rule language and ships
//! with the matching [`critter::runtime`] table.

pub mod critter;
mod error;

pub use critter::{CritterBackend, CritterOptions};
pub use error::RenderError;

use prim_ir::ProcessedProgram;

/// A code generator for one target machine.
pub trait Backend {
    /// Short identifier of the target, used in logs.
    fn name(&self) -> &'static str;

    /// Render `program` as target source text.
    fn render(&self, program: &ProcessedProgram) -> Result<String, RenderError>;
}
