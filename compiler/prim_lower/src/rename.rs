//! Hygiene pass.
//!
//! Gives every variable and every function parameter a program-wide unique
//! name (`_var0`, `_var1`, ...) so that inlining can paste bodies and
//! arguments into each other without one binding capturing another.
//! Function names are kept.
//!
//! The pass is a single fold over the members in declaration order. The
//! accumulator holds the [`NameSupply`] and the renames of every variable
//! seen so far; each member is rewritten against that accumulator before
//! its own names are added to it. A parameter that shadows a global hides
//! the global's rename inside its function.

use prim_diagnostic::CompileResult;
use prim_ir::{
    DecoratedProgram, Expr, Function, FunctionBody, Param, RecursiveHeader, Type, Variable,
};

use crate::subst::{substitute, Substitution};

/// Monotonic supply of fresh names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NameSupply(u32);

impl NameSupply {
    pub const PREFIX: &'static str = "_var";

    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next fresh name and the supply to use after it.
    #[must_use]
    pub fn fresh(self) -> (String, NameSupply) {
        (format!("{}{}", Self::PREFIX, self.0), NameSupply(self.0 + 1))
    }
}

/// Everything threaded through the fold.
struct Renamer {
    supply: NameSupply,
    globals: Substitution,
}

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(variables = program.variables.len(), functions = program.functions.len())
)]
pub fn rename(program: DecoratedProgram) -> CompileResult<DecoratedProgram> {
    let DecoratedProgram {
        variables,
        functions,
        runtime,
    } = program;

    let start = Renamer {
        supply: NameSupply::new(),
        globals: Substitution::default(),
    };

    let (state, variables) = variables.into_iter().try_fold(
        (start, Vec::new()),
        |(state, mut done), variable| {
            let (variable, state) = rename_variable(variable, state)?;
            done.push(variable);
            CompileResult::Ok((state, done))
        },
    )?;

    let (state, functions) = functions.into_iter().try_fold(
        (state, Vec::new()),
        |(state, mut done), function| {
            let (function, state) = rename_function(function, state)?;
            done.push(function);
            CompileResult::Ok((state, done))
        },
    )?;

    tracing::debug!(fresh_names = state.supply.0, "renamed program");
    Ok(DecoratedProgram {
        variables,
        functions,
        runtime,
    })
}

fn rename_variable(variable: Variable, state: Renamer) -> CompileResult<(Variable, Renamer)> {
    let Renamer {
        supply,
        mut globals,
    } = state;

    let init = substitute(variable.init, &globals)?;
    let (name, supply) = supply.fresh();
    tracing::trace!(from = %variable.name, to = %name, "renamed variable");
    globals.insert(
        variable.name,
        Expr::var(name.clone(), Type::Int, variable.line),
    );

    let variable = Variable {
        name,
        init,
        line: variable.line,
    };
    Ok((variable, Renamer { supply, globals }))
}

fn rename_function(function: Function, state: Renamer) -> CompileResult<(Function, Renamer)> {
    let body = match function.body {
        FunctionBody::Defined(body) => body,
        FunctionBody::Provided => return Ok((function, state)),
    };
    let Renamer {
        mut supply,
        globals,
    } = state;

    let mut scope = globals.clone();
    let mut params = Vec::with_capacity(function.params.len());
    for param in function.params {
        let (name, next) = supply.fresh();
        supply = next;
        scope.insert(
            param.name,
            Expr::var(name.clone(), param.ty.clone(), function.line),
        );
        params.push(Param::new(name, param.ty));
    }

    // The default is a base case evaluated without the parameters in scope.
    let recursion = match function.recursion {
        Some(header) => Some(RecursiveHeader {
            depth: header.depth,
            default: substitute(header.default, &globals)?,
        }),
        None => None,
    };

    let body = substitute(body, &scope)?;
    tracing::trace!(name = %function.name, "renamed function parameters");

    let function = Function {
        name: function.name,
        params,
        ret: function.ret,
        recursion,
        body: FunctionBody::Defined(body),
        line: function.line,
    };
    Ok((function, Renamer { supply, globals }))
}
