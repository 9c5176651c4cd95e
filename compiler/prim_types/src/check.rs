//! Type checking of raw programs.
//!
//! # Environment order
//!
//! Members are checked in a fixed order, each seeing only what precedes it:
//!
//! 1. Injected runtime stubs
//! 2. Variables, in declaration order (each must type to `int`)
//! 3. Functions, in declaration order
//!
//! A function body sees every variable, every earlier function, itself if it
//! has a recursive header, and its own parameters on top. The recursive
//! default is a zero-argument base case: it is checked without the
//! parameters and without the function itself. This ordering is what keeps
//! the call graph acyclic for the lowering passes.
//!
//! Every check fails fast on the first error.

use prim_diagnostic::{CompileError, CompileResult};
use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{
    DecoratedProgram, Expr, Function, FunctionBody, Literal, RawExpr, RawExprKind, RawFunction,
    RawProgram, RecursiveHeader, RuntimeLibrary, Type, Variable,
};
use rustc_hash::FxHashSet;

use crate::{inject_runtime, TypeEnv};

/// Type-check `program`, exposing the operations of `runtime` to it.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        variables = program.variables.len(),
        functions = program.functions.len(),
        runtime = runtime.map(|r| r.name.as_str()),
    )
)]
pub fn check(
    program: &RawProgram,
    runtime: Option<&RuntimeLibrary>,
) -> CompileResult<DecoratedProgram> {
    let stubs = match runtime {
        Some(library) => inject_runtime(library)?,
        None => Vec::new(),
    };

    check_unique_names(&stubs, program)?;

    let mut env = TypeEnv::new();
    let mut functions = Vec::with_capacity(stubs.len() + program.functions.len());

    for stub in &stubs {
        let function = check_function(&env, stub)?;
        env.bind(function.name.clone(), function.ty());
        functions.push(function);
    }

    let mut variables = Vec::with_capacity(program.variables.len());
    for variable in &program.variables {
        let init = check_expr(&env, &variable.init)?;
        expect_type(&Type::Int, &init)?;
        tracing::debug!(name = %variable.name, "checked variable");
        env.bind(variable.name.clone(), Type::Int);
        variables.push(Variable {
            name: variable.name.clone(),
            init,
            line: variable.line,
        });
    }

    for raw in &program.functions {
        let function = check_function(&env, raw)?;
        tracing::debug!(name = %function.name, ty = %function.ty(), "checked function");
        env.bind(function.name.clone(), function.ty());
        functions.push(function);
    }

    Ok(DecoratedProgram {
        variables,
        functions,
        runtime: runtime.cloned(),
    })
}

/// Parse a literal token from the parser boundary, attaching its line on
/// failure.
pub fn literal_from_token(line: u32, text: &str) -> CompileResult<Literal> {
    Literal::from_token(text).ok_or_else(|| CompileError::InvalidLiteral {
        text: text.to_string(),
        line,
    })
}

/// No two top-level members may share a name. The error points at the
/// later declaration.
fn check_unique_names(stubs: &[RawFunction], program: &RawProgram) -> CompileResult<()> {
    let declarations = stubs
        .iter()
        .map(|f| (&f.name, f.line))
        .chain(program.variables.iter().map(|v| (&v.name, v.line)))
        .chain(program.functions.iter().map(|f| (&f.name, f.line)));

    let mut seen = FxHashSet::default();
    for (name, line) in declarations {
        if !seen.insert(name.as_str()) {
            return Err(CompileError::ShadowedName {
                name: name.clone(),
                line,
            });
        }
    }
    Ok(())
}

fn check_function(env: &TypeEnv, raw: &RawFunction) -> CompileResult<Function> {
    let ty = Type::function(
        raw.params.iter().map(|p| p.ty.clone()).collect(),
        raw.ret.clone(),
    );

    let recursion = match &raw.recursion {
        Some(header) => {
            let default = check_expr(env, &header.default)?;
            expect_type(&raw.ret, &default)?;
            Some(RecursiveHeader {
                depth: header.depth,
                default,
            })
        }
        None => None,
    };

    let body = match &raw.body {
        FunctionBody::Provided => FunctionBody::Provided,
        FunctionBody::Defined(body) => {
            let mut scope = if recursion.is_some() {
                env.insert(raw.name.clone(), ty)
            } else {
                env.clone()
            }
            .child();
            for param in &raw.params {
                scope.bind(param.name.clone(), param.ty.clone());
            }

            let body = check_expr(&scope, body)?;
            expect_type(&raw.ret, &body)?;
            FunctionBody::Defined(body)
        }
    };

    Ok(Function {
        name: raw.name.clone(),
        params: raw.params.clone(),
        ret: raw.ret.clone(),
        recursion,
        body,
        line: raw.line,
    })
}

fn expect_type(expected: &Type, expr: &Expr) -> CompileResult<()> {
    if &expr.ty == expected {
        Ok(())
    } else {
        Err(CompileError::unexpected_type(
            expected,
            expr.ty.clone(),
            expr.line,
        ))
    }
}

fn lookup<'e>(env: &'e TypeEnv, name: &str, line: u32) -> CompileResult<&'e Type> {
    env.lookup(name)
        .ok_or_else(|| CompileError::UndefinedIdentifier {
            name: name.to_string(),
            line,
        })
}

fn check_expr(env: &TypeEnv, expr: &RawExpr) -> CompileResult<Expr> {
    ensure_sufficient_stack(|| check_expr_inner(env, expr))
}

fn check_expr_inner(env: &TypeEnv, expr: &RawExpr) -> CompileResult<Expr> {
    let line = expr.line;
    match &expr.kind {
        RawExprKind::Literal(literal) => Ok(Expr::literal(*literal, line)),

        RawExprKind::Var(name) => {
            let ty = lookup(env, name, line)?;
            Ok(Expr::var(name.clone(), ty.clone(), line))
        }

        RawExprKind::Not(operand) => {
            let operand = check_expr(env, operand)?;
            expect_type(&Type::Bool, &operand)?;
            Ok(Expr::not(operand, line))
        }

        RawExprKind::Call { name, args } => {
            let (params, ret) = match lookup(env, name, line)? {
                Type::Function { params, ret } => (params.clone(), ret.as_ref().clone()),
                other => {
                    return Err(CompileError::UnexpectedType {
                        expected: CompileError::FUNCTION_EXPECTED.to_string(),
                        actual: other.clone(),
                        line,
                    });
                }
            };
            if params.len() != args.len() {
                return Err(CompileError::WrongNumberOfArgs {
                    function: name.clone(),
                    expected: params.len(),
                    actual: args.len(),
                    line,
                });
            }
            let args = args
                .iter()
                .zip(&params)
                .map(|(arg, param)| {
                    let arg = check_expr(env, arg)?;
                    expect_type(param, &arg)?;
                    Ok(arg)
                })
                .collect::<CompileResult<Vec<_>>>()?;
            Ok(Expr::call(name.clone(), args, ret, line))
        }

        RawExprKind::Binary { left, op, right } => {
            let left = check_expr(env, left)?;
            let right = check_expr(env, right)?;
            match op.operand_type() {
                Some(operand) => {
                    expect_type(&operand, &left)?;
                    expect_type(&operand, &right)?;
                }
                None => expect_type(&left.ty, &right)?,
            }
            Ok(Expr::binary(left, *op, right, line))
        }

        RawExprKind::IfElse {
            cond,
            then_branch,
            else_branch,
        } => {
            let cond = check_expr(env, cond)?;
            expect_type(&Type::Bool, &cond)?;
            let then_branch = check_expr(env, then_branch)?;
            let else_branch = check_expr(env, else_branch)?;
            expect_type(&then_branch.ty, &else_branch)?;
            Ok(Expr::if_else(cond, then_branch, else_branch, line))
        }

        RawExprKind::Assign { target, value } => {
            let declared = lookup(env, target, line)?.clone();
            let value = check_expr(env, value)?;
            expect_type(&declared, &value)?;
            Ok(Expr::assign(target.clone(), value, line))
        }

        RawExprKind::Chain { first, second } => {
            let first = check_expr(env, first)?;
            expect_type(&Type::Void, &first)?;
            let second = check_expr(env, second)?;
            expect_type(&Type::Void, &second)?;
            Ok(Expr::chain(first, second, line))
        }
    }
}
