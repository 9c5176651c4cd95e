//! The critter world backend.
//!
//! Critters run a list of `condition --> action;` rules over a small array
//! of integer memory cells. The backend keeps an "initialized" flag in one
//! cell and the program's variables, in declaration order, in the cells
//! after it:
//!
//! ```text
//! mem[8] = 0 --> mem[8] := 1 mem[9] := 0;
//! mem[9] < 3 --> mem[9] := mem[9] + 1 serve[ENERGY / 2];
//! 1 = 1 --> wait;
//! ```

mod runtime;

pub use runtime::runtime;

use prim_ir::stack::ensure_sufficient_stack;
use prim_ir::{BinaryOp, Expr, ExprKind, GuardedCommand, Literal, ProcessedProgram, Type, Variable};
use rustc_hash::FxHashMap;

use crate::{Backend, RenderError};

/// Memory layout of a rendered critter program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CritterOptions {
    /// Cell holding `0` until the initialization rule has run.
    pub flag_slot: u32,
    /// Cell of the first declared variable; the rest follow contiguously.
    pub first_variable_slot: u32,
}

impl Default for CritterOptions {
    fn default() -> Self {
        CritterOptions {
            flag_slot: 8,
            first_variable_slot: 9,
        }
    }
}

impl CritterOptions {
    #[must_use]
    pub fn with_flag_slot(mut self, slot: u32) -> Self {
        self.flag_slot = slot;
        self
    }

    #[must_use]
    pub fn with_first_variable_slot(mut self, slot: u32) -> Self {
        self.first_variable_slot = slot;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct CritterBackend {
    options: CritterOptions,
}

impl CritterBackend {
    pub fn new(options: CritterOptions) -> Self {
        CritterBackend { options }
    }

    pub fn options(&self) -> &CritterOptions {
        &self.options
    }
}

impl Backend for CritterBackend {
    fn name(&self) -> &'static str {
        "critter"
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(variables = program.variables.len())
    )]
    fn render(&self, program: &ProcessedProgram) -> Result<String, RenderError> {
        let slots: FxHashMap<&str, u32> = program
            .variables
            .iter()
            .zip(self.options.first_variable_slot..)
            .map(|(variable, slot)| (variable.name.as_str(), slot))
            .collect();
        let printer = Printer { slots: &slots };

        let mut out = String::new();
        printer.init_rule(self.options.flag_slot, &program.variables, &mut out)?;

        let commands = prim_lower::flatten(program.main.clone());
        for command in &commands {
            printer.rule(command, &mut out)?;
        }
        tracing::debug!(rules = commands.len() + 1, "rendered critter program");
        Ok(out)
    }
}

struct Printer<'a> {
    slots: &'a FxHashMap<&'a str, u32>,
}

impl Printer<'_> {
    fn init_rule(
        &self,
        flag: u32,
        variables: &[Variable],
        out: &mut String,
    ) -> Result<(), RenderError> {
        out.push_str(&format!("mem[{flag}] = 0 --> mem[{flag}] := 1"));
        for variable in variables {
            out.push(' ');
            self.assign(&variable.name, &variable.init, variable.line, out)?;
        }
        out.push_str(";\n");
        Ok(())
    }

    fn rule(&self, command: &GuardedCommand, out: &mut String) -> Result<(), RenderError> {
        self.expr(&command.condition, out)?;
        out.push_str(" --> ");
        self.expr(&command.action, out)?;
        out.push_str(";\n");
        Ok(())
    }

    fn slot(&self, name: &str, line: u32) -> Result<u32, RenderError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::UnmappedVariable {
                name: name.to_string(),
                line,
            })
    }

    fn assign(
        &self,
        target: &str,
        value: &Expr,
        line: u32,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let slot = self.slot(target, line)?;
        out.push_str(&format!("mem[{slot}] := "));
        self.expr(value, out)
    }

    fn expr(&self, expr: &Expr, out: &mut String) -> Result<(), RenderError> {
        ensure_sufficient_stack(|| match &expr.kind {
            ExprKind::Literal(Literal::Int(value)) => {
                out.push_str(&value.to_string());
                Ok(())
            }
            ExprKind::Literal(Literal::Bool(value)) => {
                out.push_str(if *value { "1 = 1" } else { "1 = 0" });
                Ok(())
            }
            ExprKind::Var(name) => {
                let slot = self.slot(name, expr.line)?;
                out.push_str(&format!("mem[{slot}]"));
                Ok(())
            }
            ExprKind::Not(operand) => {
                out.push('!');
                self.operand(operand, 0, Side::Right, out)
            }
            ExprKind::Call { name, args } => {
                out.push_str(&call_name(name));
                if !args.is_empty() {
                    out.push('[');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.expr(arg, out)?;
                    }
                    out.push(']');
                }
                Ok(())
            }
            ExprKind::Binary { left, op, right } => {
                self.operand(left, op.precedence(), Side::Left, out)?;
                out.push(' ');
                out.push_str(operator(*op));
                out.push(' ');
                self.operand(right, op.precedence(), Side::Right, out)
            }
            ExprKind::IfElse { .. } => Err(RenderError::NestedConditional { line: expr.line }),
            ExprKind::Assign { target, value } => self.assign(target, value, expr.line, out),
            ExprKind::Chain { first, second } => {
                self.expr(first, out)?;
                out.push(' ');
                self.expr(second, out)
            }
        })
    }

    /// Render an operand, bracketed when it binds looser than its parent:
    /// `(...)` around integers, `{...}` around conditions.
    fn operand(
        &self,
        expr: &Expr,
        parent: u8,
        side: Side,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let strength = strength(expr);
        let wrap = strength > 0
            && match side {
                Side::Left => strength > parent,
                Side::Right => strength >= parent,
            };
        if !wrap {
            return self.expr(expr, out);
        }
        let (open, close) = if expr.ty == Type::Bool {
            ('{', '}')
        } else {
            ('(', ')')
        };
        out.push(open);
        self.expr(expr, out)?;
        out.push(close);
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum Side {
    Left,
    Right,
}

/// Operator precedence of the rendered form; `0` never needs brackets.
/// Boolean literals print as an equality.
fn strength(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Literal(Literal::Bool(_)) => BinaryOp::Eq.precedence(),
        ExprKind::Binary { op, .. } => op.precedence(),
        _ => 0,
    }
}

fn operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "=",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Mod => "mod",
        _ => op.as_symbol(),
    }
}

fn call_name(name: &str) -> String {
    match name {
        "memsize" | "defense" | "offense" | "size" | "energy" | "pass" | "tag" | "posture" => {
            name.to_uppercase()
        }
        "waitFor" => "wait".to_string(),
        _ => name.to_string(),
    }
}
