use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{
    BinaryOp, Expr, ExprKind, GuardedCommand, Literal, OpClass, ProcessedProgram, Type, Variable,
};
use rustc_hash::FxHashMap;

use crate::{EvalError, EvalResult, Host, Value};

/// Variable storage: name to current value.
pub type Memory = FxHashMap<String, Value>;

/// Tree-walking evaluator over one memory and one host.
pub struct Evaluator<'a, H: Host> {
    memory: &'a mut Memory,
    host: &'a mut H,
}

impl<'a, H: Host> Evaluator<'a, H> {
    pub fn new(memory: &'a mut Memory, host: &'a mut H) -> Self {
        Evaluator { memory, host }
    }

    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(*literal)),
            ExprKind::Var(name) => {
                self.memory
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable {
                        name: name.clone(),
                        line: expr.line,
                    })
            }
            ExprKind::Not(operand) => {
                let value = self.eval_bool(operand)?;
                Ok(Value::Bool(!value))
            }
            ExprKind::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(self.host.call(name, &args, &expr.ty))
            }
            ExprKind::Binary { left, op, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                let folded = match (l, r) {
                    (Value::Int(a), Value::Int(b)) => match op.class() {
                        // Division and remainder by zero evaluate to 0.
                        OpClass::Arithmetic => Some(op.apply_int(a, b).unwrap_or(Literal::Int(0))),
                        _ => op.apply_int(a, b),
                    },
                    (Value::Bool(a), Value::Bool(b)) => op.apply_bool(a, b),
                    (Value::Void, Value::Void) if op.class() == OpClass::Equality => {
                        Some(Literal::Bool(*op == BinaryOp::Eq))
                    }
                    _ => None,
                };
                folded
                    .map(Value::from)
                    .ok_or_else(|| EvalError::TypeMismatch {
                        expected: left.ty.clone(),
                        found: r,
                        line: expr.line,
                    })
            }
            ExprKind::IfElse {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_bool(cond)? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            ExprKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.memory.insert(target.clone(), value);
                Ok(Value::Void)
            }
            ExprKind::Chain { first, second } => {
                self.eval(first)?;
                self.eval(second)?;
                Ok(Value::Void)
            }
        }
    }

    fn eval_bool(&mut self, expr: &Expr) -> EvalResult<bool> {
        match self.eval(expr)? {
            Value::Bool(value) => Ok(value),
            found => Err(EvalError::TypeMismatch {
                expected: Type::Bool,
                found,
                line: expr.line,
            }),
        }
    }
}

/// Evaluate `expr` against `memory`, sending calls to `host`.
pub fn eval<H: Host>(expr: &Expr, memory: &mut Memory, host: &mut H) -> EvalResult<Value> {
    Evaluator::new(memory, host).eval(expr)
}

/// Run the initializers of `variables` in order into a fresh memory.
pub fn init_memory<H: Host>(variables: &[Variable], host: &mut H) -> EvalResult<Memory> {
    let mut memory = Memory::default();
    for variable in variables {
        let value = eval(&variable.init, &mut memory, host)?;
        memory.insert(variable.name.clone(), value);
    }
    Ok(memory)
}

/// Initialize a processed program's variables, then run its main expression
/// once.
pub fn run_program<H: Host>(program: &ProcessedProgram, host: &mut H) -> EvalResult<Memory> {
    let mut memory = init_memory(&program.variables, host)?;
    eval(&program.main, &mut memory, host)?;
    Ok(memory)
}

/// Run the first command whose condition holds and return its index.
///
/// Conditions are evaluated in order against the current memory; only the
/// selected command's action runs.
pub fn run_guarded<H: Host>(
    commands: &[GuardedCommand],
    memory: &mut Memory,
    host: &mut H,
) -> EvalResult<usize> {
    let mut evaluator = Evaluator::new(memory, host);
    for (index, command) in commands.iter().enumerate() {
        if evaluator.eval_bool(&command.condition)? {
            tracing::trace!(index, "guarded command fired");
            evaluator.eval(&command.action)?;
            return Ok(index);
        }
    }
    Err(EvalError::NoMatchingCommand)
}
