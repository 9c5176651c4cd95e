use super::*;

#[test]
fn test_display_primitives() {
    assert_eq!(Type::Void.to_string(), "void");
    assert_eq!(Type::Int.to_string(), "int");
    assert_eq!(Type::Bool.to_string(), "bool");
}

#[test]
fn test_display_function() {
    let ty = Type::function(vec![Type::Int, Type::Bool], Type::Int);
    assert_eq!(ty.to_string(), "(int, bool) -> int");

    let nullary = Type::function(vec![], Type::Void);
    assert_eq!(nullary.to_string(), "() -> void");
}

#[test]
fn test_function_equality_is_structural() {
    let a = Type::function(vec![Type::Int], Type::Bool);
    let b = Type::function(vec![Type::Int], Type::Bool);
    let c = Type::function(vec![Type::Bool], Type::Bool);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_is_primitive() {
    assert!(Type::Int.is_primitive());
    assert!(Type::Void.is_primitive());
    assert!(!Type::function(vec![], Type::Int).is_primitive());
}
