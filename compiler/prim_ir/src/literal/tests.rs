use super::*;

#[test]
fn test_literal_types() {
    assert_eq!(Literal::Int(3).ty(), Type::Int);
    assert_eq!(Literal::TRUE.ty(), Type::Bool);
}

#[test]
fn test_from_token_bools() {
    assert_eq!(Literal::from_token("true"), Some(Literal::TRUE));
    assert_eq!(Literal::from_token("false"), Some(Literal::FALSE));
    assert_eq!(Literal::from_token("True"), None);
}

#[test]
fn test_from_token_ints() {
    assert_eq!(Literal::from_token("0"), Some(Literal::Int(0)));
    assert_eq!(Literal::from_token("42"), Some(Literal::Int(42)));
    assert_eq!(Literal::from_token("-17"), Some(Literal::Int(-17)));
    assert_eq!(Literal::from_token("+5"), Some(Literal::Int(5)));
    assert_eq!(
        Literal::from_token("-2147483648"),
        Some(Literal::Int(i32::MIN))
    );
}

#[test]
fn test_from_token_rejects_garbage() {
    assert_eq!(Literal::from_token(""), None);
    assert_eq!(Literal::from_token("-"), None);
    assert_eq!(Literal::from_token("12a"), None);
    assert_eq!(Literal::from_token("2147483648"), None);
    assert_eq!(Literal::from_token(" 1"), None);
}

#[test]
fn test_display() {
    assert_eq!(Literal::Int(-4).to_string(), "-4");
    assert_eq!(Literal::FALSE.to_string(), "false");
}
