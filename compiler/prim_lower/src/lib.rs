//! Lowering for the prim compiler.
//!
//! Turns a type-checked [`DecoratedProgram`] into a [`ProcessedProgram`]:
//! variable initializers plus one `main` expression that calls nothing but
//! `PROVIDED` functions. The stages, in order:
//!
//! 1. [`rename`] makes every variable and parameter name unique.
//! 2. [`unroll`] removes bounded self-recursion from each function.
//! 3. [`inline_program`] pastes every user function into the entry
//!    function's body.
//! 4. [`simplify`] folds constants, when enabled.
//!
//! [`flatten`] then turns `main` into guarded commands; backends call it.

mod const_fold;
mod flatten;
mod inline;
mod rename;
mod subst;
mod unroll;

pub use const_fold::simplify;
pub use flatten::flatten;
pub use inline::inline_program;
pub use rename::{rename, NameSupply};
pub use subst::{substitute, Substitution};
pub use unroll::unroll;

use prim_diagnostic::CompileResult;
use prim_ir::{DecoratedProgram, FunctionBody, ProcessedProgram, Variable};

/// Run the lowering pipeline over a checked program.
///
/// With `fold` set, each unrolled function body, every variable
/// initializer, and the final `main` are constant-folded.
#[tracing::instrument(level = "debug", skip_all, fields(fold = fold))]
pub fn process(program: DecoratedProgram, fold: bool) -> CompileResult<ProcessedProgram> {
    let DecoratedProgram {
        variables,
        functions,
        runtime,
    } = rename(program)?;

    let functions = functions
        .into_iter()
        .map(|function| {
            let mut function = unroll(function)?;
            function.body = match function.body {
                FunctionBody::Defined(body) if fold => FunctionBody::Defined(simplify(body)),
                body => body,
            };
            Ok(function)
        })
        .collect::<CompileResult<Vec<_>>>()?;

    let main = inline_program(functions)?;

    let (variables, main) = if fold {
        let variables = variables
            .into_iter()
            .map(|variable| Variable {
                init: simplify(variable.init),
                ..variable
            })
            .collect();
        (variables, simplify(main))
    } else {
        (variables, main)
    };
    tracing::debug!(variables = variables.len(), "lowered program");

    Ok(ProcessedProgram {
        variables,
        main,
        runtime,
    })
}
