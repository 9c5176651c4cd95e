//! End-to-end tests: raw programs through checking, lowering, evaluation
//! and critter rendering.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use prim_codegen::{critter, Backend, CritterBackend};
use prim_eval::{run_guarded, run_program, RecordingHost, Value};
use prim_ir::{
    BinaryOp, Expr, ExprKind, Literal, Param, ProcessedProgram, RawExpr, RawFunction, RawProgram,
    RawVariable, RuntimeFunction, RuntimeLibrary, Type,
};
use primc::{compile, compile_all, compile_default, CompileError, CompileOptions, ErrorCode};

// -- Helpers --

fn var(name: &str, line: u32) -> RawExpr {
    RawExpr::var(name, line)
}

fn int(value: i32, line: u32) -> RawExpr {
    RawExpr::int(value, line)
}

fn bin(l: RawExpr, op: BinaryOp, r: RawExpr, line: u32) -> RawExpr {
    RawExpr::binary(l, op, r, line)
}

fn call(name: &str, args: Vec<RawExpr>, line: u32) -> RawExpr {
    RawExpr::call(name, args, line)
}

fn main_fn(body: RawExpr, line: u32) -> RawFunction {
    RawFunction::new("main", vec![], Type::Void, body, line)
}

fn unfolded() -> CompileOptions {
    CompileOptions::default().with_simplify(false)
}

fn run(program: &ProcessedProgram) -> (prim_eval::Memory, RecordingHost) {
    let mut host = RecordingHost::new().with_reading("energy", Value::Int(10));
    let memory = run_program(program, &mut host).unwrap();
    (memory, host)
}

/// `f(n: int): int` recursing with `(depth, 0)`: `if n == 0 then 0 else 1 + f(n - 1)`.
fn countdown(depth: u32) -> RawFunction {
    RawFunction::new(
        "f",
        vec![Param::new("n", Type::Int)],
        Type::Int,
        RawExpr::if_else(
            bin(var("n", 2), BinaryOp::Eq, int(0, 2), 2),
            int(0, 2),
            bin(
                int(1, 2),
                BinaryOp::Add,
                call("f", vec![bin(var("n", 2), BinaryOp::Sub, int(1, 2), 2)], 2),
                2,
            ),
            2,
        ),
        2,
    )
    .with_recursion(depth, int(0, 2))
}

fn countdown_program(depth: u32, arg: i32) -> RawProgram {
    RawProgram::new(
        vec![RawVariable::new("r", int(0, 1), 1)],
        vec![
            countdown(depth),
            main_fn(RawExpr::assign("r", call("f", vec![int(arg, 3)], 3), 3), 3),
        ],
    )
}

// -- Scenarios --

#[test]
fn variable_initializer_folds() {
    // var x = 1 + 2;
    let raw = RawProgram::new(
        vec![RawVariable::new("x", bin(int(1, 1), BinaryOp::Add, int(2, 1), 1), 1)],
        vec![main_fn(call("waitFor", vec![], 2), 2)],
    );
    let runtime = critter::runtime();

    let processed = compile_default(&raw, Some(&runtime)).unwrap();
    assert_eq!(processed.variables.len(), 1);
    assert_eq!(processed.variables[0].name, "_var0");
    assert_eq!(processed.variables[0].init, Expr::int(3, 1));

    let unfolded = compile(&raw, Some(&runtime), &unfolded()).unwrap();
    assert_eq!(
        unfolded.variables[0].init,
        Expr::binary(Expr::int(1, 1), BinaryOp::Add, Expr::int(2, 1), 1)
    );
}

#[test]
fn literal_condition_collapses_to_one_command() {
    // fun main(): void = if (true) then (x = 1) else (x = 2);
    let raw = RawProgram::new(
        vec![RawVariable::new("x", int(0, 1), 1)],
        vec![main_fn(
            RawExpr::if_else(
                RawExpr::bool(true, 2),
                RawExpr::assign("x", int(1, 2), 2),
                RawExpr::assign("x", int(2, 2), 2),
                2,
            ),
            2,
        )],
    );

    let processed = compile_default(&raw, None).unwrap();
    assert_eq!(processed.main, Expr::assign("_var0", Expr::int(1, 2), 2));
    let commands = prim_lower::flatten(processed.main);
    assert_eq!(commands.len(), 1);
    assert!(commands[0].condition.is_true());

    let unfolded = compile(&raw, None, &unfolded()).unwrap();
    assert_eq!(prim_lower::flatten(unfolded.main).len(), 2);
}

#[test]
fn recursion_unrolls_to_depth_then_default() {
    // depth 2: the outer body plus two copies each add one, then the default
    let processed = compile(&countdown_program(2, 5), None, &unfolded()).unwrap();
    assert!(!processed.main.calls("f"));
    let adds = processed
        .main
        .count(&|e| matches!(e.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
    assert_eq!(adds, 3);

    let (memory, _) = run(&processed);
    assert_eq!(memory["_var0"], Value::Int(3));
}

#[test]
fn recursion_with_literal_argument_folds_away() {
    let processed = compile_default(&countdown_program(2, 5), None).unwrap();
    match &processed.main.kind {
        ExprKind::Assign { target, value } => {
            assert_eq!(target, "_var0");
            assert_eq!(value.as_literal(), Some(Literal::Int(3)));
        }
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn deep_enough_recursion_reaches_base_case() {
    for (depth, arg, expected) in [(10, 5, 5), (5, 5, 5), (4, 5, 5), (3, 5, 4), (0, 5, 1)] {
        let processed = compile(&countdown_program(depth, arg), None, &unfolded()).unwrap();
        let (memory, _) = run(&processed);
        assert_eq!(memory["_var0"], Value::Int(expected), "depth {depth}");
    }
}

#[test]
fn two_conditionals_flatten_to_four_commands() {
    // main() = (if energy() > 5 then eat() else waitFor()); (if size() < 3 then grow() else left())
    let raw = RawProgram::new(
        vec![],
        vec![main_fn(
            RawExpr::chain(
                RawExpr::if_else(
                    bin(call("energy", vec![], 2), BinaryOp::Gt, int(5, 2), 2),
                    call("eat", vec![], 2),
                    call("waitFor", vec![], 2),
                    2,
                ),
                RawExpr::if_else(
                    bin(call("size", vec![], 3), BinaryOp::Lt, int(3, 3), 3),
                    call("grow", vec![], 3),
                    call("left", vec![], 3),
                    3,
                ),
                2,
            ),
            2,
        )],
    );
    let processed = compile_default(&raw, Some(&critter::runtime())).unwrap();
    let commands = prim_lower::flatten(processed.main);

    let rendered: Vec<String> = commands.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "energy() > 5 && size() < 3 --> eat(); grow();",
            "energy() > 5 --> eat(); left();",
            "size() < 3 --> waitFor(); grow();",
            "true --> waitFor(); left();",
        ]
    );
}

#[test]
fn undefined_identifier_stops_pipeline() {
    let raw = RawProgram::new(vec![], vec![main_fn(call("launch", vec![], 7), 6)]);
    let err = compile_default(&raw, Some(&critter::runtime())).unwrap_err();
    assert_eq!(
        err,
        CompileError::UndefinedIdentifier {
            name: "launch".into(),
            line: 7
        }
    );
    assert_eq!(err.code(), ErrorCode::E2003);
    assert_eq!(err.line(), Some(7));
}

#[test]
fn value_in_chain_stops_pipeline() {
    // var x = 0; main() = (1 + 2); (x = 1)
    let raw = RawProgram::new(
        vec![RawVariable::new("x", int(0, 1), 1)],
        vec![main_fn(
            RawExpr::chain(
                bin(int(1, 2), BinaryOp::Add, int(2, 2), 2),
                RawExpr::assign("x", int(1, 2), 2),
                2,
            ),
            2,
        )],
    );
    let err = compile_default(&raw, Some(&critter::runtime())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.line(), Some(2));
}

// -- Contracts --

#[test]
fn arguments_are_evaluated_once_per_use() {
    // fun twice(v: int): int = v + v; main() = x = twice(energy())
    let raw = RawProgram::new(
        vec![RawVariable::new("x", int(0, 1), 1)],
        vec![
            RawFunction::new(
                "twice",
                vec![Param::new("v", Type::Int)],
                Type::Int,
                bin(var("v", 2), BinaryOp::Add, var("v", 2), 2),
                2,
            ),
            main_fn(
                RawExpr::assign("x", call("twice", vec![call("energy", vec![], 3)], 3), 3),
                3,
            ),
        ],
    );
    let processed = compile_default(&raw, Some(&critter::runtime())).unwrap();
    let (memory, host) = run(&processed);

    assert_eq!(memory["_var0"], Value::Int(20));
    assert_eq!(host.calls().len(), 2);
    assert!(host.calls().iter().all(|call| call.name == "energy"));
}

#[test]
fn parameter_shadowing_global_keeps_its_own_value() {
    // var n = 10; fun double(n: int): int = n * 2; main() = n = double(n + 1)
    let raw = RawProgram::new(
        vec![RawVariable::new("n", int(10, 1), 1)],
        vec![
            RawFunction::new(
                "double",
                vec![Param::new("n", Type::Int)],
                Type::Int,
                bin(var("n", 2), BinaryOp::Mul, int(2, 2), 2),
                2,
            ),
            main_fn(
                RawExpr::assign(
                    "n",
                    call("double", vec![bin(var("n", 3), BinaryOp::Add, int(1, 3), 3)], 3),
                    3,
                ),
                3,
            ),
        ],
    );
    let processed = compile_default(&raw, None).unwrap();
    let (memory, _) = run(&processed);
    assert_eq!(memory["_var0"], Value::Int(22));
}

#[test]
fn folding_preserves_meaning() {
    let raw = RawProgram::new(
        vec![
            RawVariable::new("a", bin(int(6, 1), BinaryOp::Mul, int(7, 1), 1), 1),
            RawVariable::new("b", bin(var("a", 2), BinaryOp::Mod, int(5, 2), 2), 2),
        ],
        vec![
            countdown(3),
            main_fn(
                RawExpr::if_else(
                    RawExpr::not(bin(var("b", 4), BinaryOp::Lt, int(1, 4), 4), 4),
                    RawExpr::assign(
                        "a",
                        bin(
                            call("f", vec![var("b", 4)], 4),
                            BinaryOp::Add,
                            call("energy", vec![], 4),
                            4,
                        ),
                        4,
                    ),
                    RawExpr::assign("b", int(0, 4), 4),
                    4,
                ),
                4,
            ),
        ],
    );
    let runtime = critter::runtime();
    let folded = compile_default(&raw, Some(&runtime)).unwrap();
    let unfolded = compile(&raw, Some(&runtime), &unfolded()).unwrap();
    assert_ne!(folded, unfolded);

    let (folded_memory, folded_host) = run(&folded);
    let (unfolded_memory, unfolded_host) = run(&unfolded);
    assert_eq!(folded_memory, unfolded_memory);
    assert_eq!(folded_host.calls(), unfolded_host.calls());
    // b = 42 % 5 = 2; f(2) = 2; a = 2 + 10
    assert_eq!(folded_memory["_var0"], Value::Int(12));
}

#[test]
fn flattened_main_matches_direct_run() {
    let raw = countdown_program(2, 5);
    let processed = compile(&raw, None, &unfolded()).unwrap();
    let (direct, _) = run(&processed);

    let mut host = RecordingHost::new();
    let mut memory = prim_eval::init_memory(&processed.variables, &mut host).unwrap();
    run_guarded(&prim_lower::flatten(processed.main), &mut memory, &mut host).unwrap();
    assert_eq!(memory, direct);
}

// -- Errors --

#[test]
fn missing_entry_function() {
    let raw = RawProgram::new(vec![RawVariable::new("x", int(0, 1), 1)], vec![]);
    let err = compile_default(&raw, None).unwrap_err();
    assert_eq!(err, CompileError::MissingEntryFunction);
    assert_eq!(err.code(), ErrorCode::E2050);
}

#[test]
fn entry_function_must_not_take_parameters() {
    let raw = RawProgram::new(
        vec![],
        vec![RawFunction::new(
            "main",
            vec![Param::new("n", Type::Int)],
            Type::Int,
            var("n", 5),
            5,
        )],
    );
    let err = compile_default(&raw, None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2051);
    assert_eq!(err.line(), Some(5));
}

#[test]
fn generic_runtime_function_rejected() {
    let runtime = RuntimeLibrary::new("robot").with_function(
        RuntimeFunction::new("identity", vec![Type::Int], Type::Int)
            .with_type_params(vec!["T".into()]),
    );
    let raw = RawProgram::new(vec![], vec![main_fn(call("identity", vec![int(1, 1)], 1), 1)]);
    let err = compile_default(&raw, Some(&runtime)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2040);
}

#[test]
fn duplicate_member_rejected() {
    let raw = RawProgram::new(
        vec![RawVariable::new("energy", int(0, 3), 3)],
        vec![main_fn(call("eat", vec![], 4), 4)],
    );
    let err = compile_default(&raw, Some(&critter::runtime())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2006);
    assert_eq!(err.line(), Some(3));
}

// -- Driver --

#[test]
fn compile_all_keeps_input_order() {
    let bad = RawProgram::new(vec![], vec![main_fn(var("nope", 2), 2)]);
    let programs = vec![countdown_program(2, 5), bad, countdown_program(4, 1)];

    let results = compile_all(&programs, None, &CompileOptions::default());
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap(),
        &compile_default(&programs[0], None).unwrap()
    );
    assert_eq!(results[1].as_ref().unwrap_err().code(), ErrorCode::E2003);
    assert!(results[2].is_ok());
}

#[test]
fn compile_options_default_simplifies() {
    assert!(CompileOptions::default().simplify);
    assert!(!CompileOptions::default().with_simplify(false).simplify);
}

// -- Rendering --

#[test]
fn renders_critter_program() {
    // var count = 0;
    // fun step(n: int): int = n + 1;
    // fun main(): void =
    //     if count < 3 then (count = step(count); serve(energy() / 2)) else waitFor();
    let raw = RawProgram::new(
        vec![RawVariable::new("count", int(0, 1), 1)],
        vec![
            RawFunction::new(
                "step",
                vec![Param::new("n", Type::Int)],
                Type::Int,
                bin(var("n", 2), BinaryOp::Add, int(1, 2), 2),
                2,
            ),
            main_fn(
                RawExpr::if_else(
                    bin(var("count", 4), BinaryOp::Lt, int(3, 4), 4),
                    RawExpr::chain(
                        RawExpr::assign("count", call("step", vec![var("count", 4)], 4), 4),
                        call(
                            "serve",
                            vec![bin(call("energy", vec![], 4), BinaryOp::Div, int(2, 4), 4)],
                            4,
                        ),
                        4,
                    ),
                    call("waitFor", vec![], 4),
                    4,
                ),
                3,
            ),
        ],
    );
    let processed = compile_default(&raw, Some(&critter::runtime())).unwrap();
    let text = CritterBackend::default().render(&processed).unwrap();
    assert_eq!(
        text,
        "mem[8] = 0 --> mem[8] := 1 mem[9] := 0;\n\
         mem[9] < 3 --> mem[9] := mem[9] + 1 serve[ENERGY / 2];\n\
         1 = 1 --> wait;\n"
    );
}
