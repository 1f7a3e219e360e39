use super::*;
use crate::types::PrimitiveKind;

#[test]
fn test_literal_display_preserves_suffix() {
    let lit = Literal::Float {
        value: 100.0,
        ty: Some(Type::simple(PrimitiveKind::Fp64)),
    };
    assert_eq!(lit.to_string(), "100.0_fp64");

    let untyped = Literal::Integer {
        value: 42,
        ty: None,
    };
    assert_eq!(untyped.to_string(), "42");
}

#[test]
fn test_float_display_never_looks_like_integer() {
    let lit = Literal::Float {
        value: 100.0,
        ty: None,
    };
    assert_eq!(lit.to_string(), "100.0");

    let fractional = Literal::Float {
        value: 2.5,
        ty: None,
    };
    assert_eq!(fractional.to_string(), "2.5");
}

#[test]
fn test_string_literal_escaping() {
    let lit = Literal::String {
        value: "a \"b\"\nc\\d".to_string(),
        ty: None,
    };
    assert_eq!(lit.to_string(), "\"a \\\"b\\\"\\nc\\\\d\"");
}

#[test]
fn test_call_display() {
    let expr = Expr::Call {
        function: "gt".to_string(),
        args: vec![
            Expr::Column {
                qualifier: None,
                name: "value".to_string(),
            },
            Expr::Literal(Literal::Integer {
                value: 10,
                ty: None,
            }),
        ],
        output_type: Some(Type::simple(PrimitiveKind::Bool)),
    };
    assert_eq!(expr.to_string(), "gt(value, 10) -> bool");
}

#[test]
fn test_qualified_column_and_cast() {
    let expr = Expr::Cast {
        expr: Box::new(Expr::Column {
            qualifier: Some("orders".to_string()),
            name: "id".to_string(),
        }),
        ty: Type::simple(PrimitiveKind::I64),
    };
    assert_eq!(expr.to_string(), "orders.id as i64");
}

#[test]
fn test_null_literal() {
    assert_eq!(Literal::Null(None).to_string(), "null");
    assert_eq!(
        Literal::Null(Some(Type::simple(PrimitiveKind::I32))).to_string(),
        "null_i32"
    );
}
