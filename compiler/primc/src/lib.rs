//! The prim compiler driver.
//!
//! Takes a parsed [`RawProgram`] through the whole front end:
//!
//! ```text
//! RawProgram --check--> DecoratedProgram --process--> ProcessedProgram
//! ```
//!
//! Every stage fails fast: the first [`CompileError`] stops the pipeline
//! and nothing partial is returned. Rendering the processed program for a
//! target is left to a backend from `prim_codegen`.

mod options;

pub use options::CompileOptions;
pub use prim_diagnostic::{CompileError, CompileResult, ErrorCode};

use prim_ir::{ProcessedProgram, RawProgram, RuntimeLibrary};
use rayon::prelude::*;

/// Type check and lower one program.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        variables = program.variables.len(),
        functions = program.functions.len(),
        runtime = runtime.map(|library| library.name.as_str()),
    )
)]
pub fn compile(
    program: &RawProgram,
    runtime: Option<&RuntimeLibrary>,
    options: &CompileOptions,
) -> CompileResult<ProcessedProgram> {
    let decorated = prim_types::check(program, runtime)?;
    tracing::debug!("type checked");
    prim_lower::process(decorated, options.simplify)
}

/// [`compile`] with [`CompileOptions::default`].
pub fn compile_default(
    program: &RawProgram,
    runtime: Option<&RuntimeLibrary>,
) -> CompileResult<ProcessedProgram> {
    compile(program, runtime, &CompileOptions::default())
}

/// Compile independent programs in parallel against one runtime table.
///
/// Results come back in input order, one per program.
#[tracing::instrument(level = "debug", skip_all, fields(programs = programs.len()))]
pub fn compile_all(
    programs: &[RawProgram],
    runtime: Option<&RuntimeLibrary>,
    options: &CompileOptions,
) -> Vec<CompileResult<ProcessedProgram>> {
    programs
        .par_iter()
        .map(|program| compile(program, runtime, options))
        .collect()
}
