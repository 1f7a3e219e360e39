use super::*;
use crate::error::EncodeError;
use crate::format;
use pf_core::{Plan, Relation, RelationId, RelationKind, Schema, SchemaId, Source, SourceId, SourceKind};

fn plan_from_text(text: &str) -> Plan {
    pf_parser::resolve(pf_parser::parse(text).unwrap()).unwrap()
}

const PIPELINE_PLAN: &str = r#"
pipelines {
  orders -> keep_large;
  keep_large -> root;
}

schema order_schema {
  id i32;
  amount fp64;
}

source named_table order_table {
  names = ["orders"]
}

read relation orders {
  base_schema order_schema;
  source order_table;
}

filter relation keep_large {
  filter gt(amount, 100.0_fp64) -> bool;
}
"#;

#[test]
fn test_encode_envelope_layout() {
    let plan = plan_from_text(PIPELINE_PLAN);
    let bytes = encode_plan(&plan).unwrap();

    // length prefix + payload + checksum
    let declared = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    assert_eq!(bytes.len(), 4 + declared + 4);

    let payload = &bytes[4..4 + declared];
    assert_eq!(&payload[0..4], &format::MAGIC);
    assert_eq!(
        u16::from_le_bytes(payload[4..6].try_into().unwrap()),
        format::VERSION
    );

    let stored = u32::from_le_bytes(bytes[bytes.len() - 4..].try_into().unwrap());
    assert_eq!(stored, crc32fast::hash(payload));
}

#[test]
fn test_encode_is_deterministic() {
    let plan = plan_from_text(PIPELINE_PLAN);
    let first = encode_plan(&plan).unwrap();
    let second = encode_plan(&plan).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_equal_plans_encode_identically() {
    let a = plan_from_text(PIPELINE_PLAN);
    let b = plan_from_text(PIPELINE_PLAN);
    assert_eq!(encode_plan(&a).unwrap(), encode_plan(&b).unwrap());
}

#[test]
fn test_encode_rejects_dangling_schema() {
    let plan = Plan {
        schemas: vec![],
        sources: vec![Source {
            name: "t".into(),
            kind: SourceKind::NamedTable {
                names: vec!["t".into()],
            },
        }],
        relations: vec![Relation {
            name: "r".into(),
            kind: RelationKind::Read {
                schema: SchemaId(7),
                source: SourceId(0),
            },
        }],
        roots: vec![RelationId(0)],
    };
    assert!(matches!(encode_plan(&plan), Err(EncodeError::InvalidPlan(_))));
}

#[test]
fn test_encode_rejects_empty_roots() {
    let plan = Plan {
        schemas: vec![Schema {
            name: "s".into(),
            fields: vec![],
        }],
        sources: vec![],
        relations: vec![],
        roots: vec![],
    };
    assert!(matches!(encode_plan(&plan), Err(EncodeError::InvalidPlan(_))));
}
