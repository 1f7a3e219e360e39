use super::*;
use crate::expr::{Expr, Literal};
use crate::relation::RelationKind;
use crate::source::SourceKind;
use crate::types::PrimitiveKind;

fn sample_plan() -> Plan {
    Plan {
        schemas: vec![Schema {
            name: "s".to_string(),
            fields: vec![Field {
                name: "id".to_string(),
                ty: Type::simple(PrimitiveKind::I32),
            }],
        }],
        sources: vec![Source {
            name: "src".to_string(),
            kind: SourceKind::NamedTable {
                names: vec!["t".to_string()],
            },
        }],
        relations: vec![
            Relation {
                name: "read_rel".to_string(),
                kind: RelationKind::Read {
                    schema: SchemaId(0),
                    source: SourceId(0),
                },
            },
            Relation {
                name: "filter_rel".to_string(),
                kind: RelationKind::Filter {
                    input: RelationId(0),
                    condition: Expr::Literal(Literal::Bool(true)),
                },
            },
        ],
        roots: vec![RelationId(1)],
    }
}

#[test]
fn test_valid_plan_passes() {
    assert!(sample_plan().validate().is_ok());
}

#[test]
fn test_dangling_schema_rejected() {
    let mut plan = sample_plan();
    plan.relations[0].kind = RelationKind::Read {
        schema: SchemaId(9),
        source: SourceId(0),
    };
    assert!(matches!(
        plan.validate(),
        Err(PlanError::DanglingSchema { .. })
    ));
}

#[test]
fn test_dangling_input_rejected() {
    let mut plan = sample_plan();
    plan.relations[1].kind = RelationKind::Filter {
        input: RelationId(7),
        condition: Expr::Literal(Literal::Bool(true)),
    };
    assert!(matches!(
        plan.validate(),
        Err(PlanError::DanglingInput { .. })
    ));
}

#[test]
fn test_empty_roots_rejected() {
    let mut plan = sample_plan();
    plan.roots.clear();
    assert!(matches!(plan.validate(), Err(PlanError::NoRoots)));
}

#[test]
fn test_dangling_root_rejected() {
    let mut plan = sample_plan();
    plan.roots = vec![RelationId(5)];
    assert!(matches!(
        plan.validate(),
        Err(PlanError::DanglingRoot { .. })
    ));
}

#[test]
fn test_serde_roundtrip() {
    let plan = sample_plan();
    let json = serde_json::to_string(&plan).unwrap();
    let back: Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, back);
}
