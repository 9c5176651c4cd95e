use pretty_assertions::assert_eq;
use prim_ir::{BinaryOp, Param, RecursiveHeader, Type};

use super::*;

fn n() -> Expr {
    Expr::var("n", Type::Int, 2)
}

fn self_call(arg: Expr) -> Expr {
    Expr::call("f", vec![arg], Type::Int, 2)
}

/// `f(n: int): int` with body `if n == 0 then 0 else 1 + f(n - 1)`.
fn countdown(depth: u32, default: i32) -> Function {
    let body = Expr::if_else(
        Expr::binary(n(), BinaryOp::Eq, Expr::int(0, 2), 2),
        Expr::int(0, 2),
        Expr::binary(
            Expr::int(1, 2),
            BinaryOp::Add,
            self_call(Expr::binary(n(), BinaryOp::Sub, Expr::int(1, 2), 2)),
            2,
        ),
        2,
    );
    Function {
        name: "f".into(),
        params: vec![Param::new("n", Type::Int)],
        ret: Type::Int,
        recursion: Some(RecursiveHeader {
            depth,
            default: Expr::int(default, 1),
        }),
        body: FunctionBody::Defined(body),
        line: 1,
    }
}

fn body_of(function: &Function) -> &Expr {
    function.body.as_defined().unwrap()
}

fn is_default(e: &Expr) -> bool {
    e.as_literal() == Some(prim_ir::Literal::Int(-7))
}

#[test]
fn test_non_recursive_function_unchanged() {
    let mut function = countdown(3, 0);
    function.recursion = None;
    assert_eq!(unroll(function.clone()).unwrap(), function);
}

#[test]
fn test_header_removed_and_no_self_call_left() {
    let unrolled = unroll(countdown(2, 0)).unwrap();
    assert_eq!(unrolled.recursion, None);
    assert!(!body_of(&unrolled).calls("f"));
}

#[test]
fn test_depth_zero_replaces_self_call_with_default() {
    let unrolled = unroll(countdown(0, -7)).unwrap();
    let expected = Expr::if_else(
        Expr::binary(n(), BinaryOp::Eq, Expr::int(0, 2), 2),
        Expr::int(0, 2),
        Expr::binary(Expr::int(1, 2), BinaryOp::Add, Expr::int(-7, 1), 2),
        2,
    );
    assert_eq!(body_of(&unrolled), &expected);
}

#[test]
fn test_one_default_per_remaining_call_site() {
    for depth in 0..5 {
        let unrolled = unroll(countdown(depth, -7)).unwrap();
        assert_eq!(body_of(&unrolled).count(&is_default), 1, "depth {depth}");
        let adds = body_of(&unrolled)
            .count(&|e| matches!(e.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
        assert_eq!(adds, depth as usize + 1, "depth {depth}");
    }
}

#[test]
fn test_arguments_substituted_into_pasted_copies() {
    let unrolled = unroll(countdown(1, 0)).unwrap();
    // the pasted copy tests `n - 1 == 0`
    let inner_test = Expr::binary(
        Expr::binary(n(), BinaryOp::Sub, Expr::int(1, 2), 2),
        BinaryOp::Eq,
        Expr::int(0, 2),
        2,
    );
    assert!(body_of(&unrolled).any(&|e| *e == inner_test));
}

#[test]
fn test_two_self_calls_double_each_level() {
    // g(n) = g(n) + g(n)
    let call = || Expr::call("g", vec![Expr::var("n", Type::Int, 1)], Type::Int, 1);
    let function = Function {
        name: "g".into(),
        params: vec![Param::new("n", Type::Int)],
        ret: Type::Int,
        recursion: Some(RecursiveHeader {
            depth: 2,
            default: Expr::int(-7, 1),
        }),
        body: FunctionBody::Defined(Expr::binary(call(), BinaryOp::Add, call(), 1)),
        line: 1,
    };
    let unrolled = unroll(function).unwrap();
    assert!(!body_of(&unrolled).calls("g"));
    assert_eq!(body_of(&unrolled).count(&is_default), 8);
}
