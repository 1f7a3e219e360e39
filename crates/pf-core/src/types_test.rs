use super::*;

#[test]
fn test_primitive_from_name() {
    assert_eq!(PrimitiveKind::from_name("i32"), Some(PrimitiveKind::I32));
    assert_eq!(PrimitiveKind::from_name("FP64"), Some(PrimitiveKind::Fp64));
    assert_eq!(
        PrimitiveKind::from_name("boolean"),
        Some(PrimitiveKind::Bool)
    );
    assert_eq!(PrimitiveKind::from_name("i128"), None);
}

#[test]
fn test_primitive_tag_roundtrip() {
    for kind in [
        PrimitiveKind::Bool,
        PrimitiveKind::I8,
        PrimitiveKind::I64,
        PrimitiveKind::Fp32,
        PrimitiveKind::String,
        PrimitiveKind::TimestampTz,
        PrimitiveKind::FixedChar,
    ] {
        assert_eq!(PrimitiveKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(PrimitiveKind::from_tag(200), None);
}

#[test]
fn test_display_simple() {
    assert_eq!(Type::simple(PrimitiveKind::I32).to_string(), "i32");

    let nullable = Type::Simple {
        kind: PrimitiveKind::String,
        nullable: true,
        params: Vec::new(),
    };
    assert_eq!(nullable.to_string(), "string?");
}

#[test]
fn test_display_parameterized() {
    let decimal = Type::Simple {
        kind: PrimitiveKind::Decimal,
        nullable: false,
        params: vec![10, 2],
    };
    assert_eq!(decimal.to_string(), "decimal<10,2>");

    let nullable_varchar = Type::Simple {
        kind: PrimitiveKind::Varchar,
        nullable: true,
        params: vec![100],
    };
    assert_eq!(nullable_varchar.to_string(), "varchar?<100>");
}

#[test]
fn test_display_compound() {
    let list = Type::List {
        nullable: false,
        element: Box::new(Type::simple(PrimitiveKind::I32)),
    };
    assert_eq!(list.to_string(), "list<i32>");

    let map = Type::Map {
        nullable: true,
        key: Box::new(Type::simple(PrimitiveKind::String)),
        value: Box::new(list.clone()),
    };
    assert_eq!(map.to_string(), "map?<string, list<i32>>");

    let strukt = Type::Struct {
        nullable: false,
        fields: vec![Type::simple(PrimitiveKind::I32), list],
    };
    assert_eq!(strukt.to_string(), "struct<i32, list<i32>>");
}
