use super::*;
use crate::expr::{Expr, Literal};
use crate::plan::{Field, Schema, SchemaId, SourceId};
use crate::relation::{Relation, RelationKind};
use crate::source::{Source, SourceKind};
use crate::types::{PrimitiveKind, Type};

fn filter(name: &str, input: u32) -> Relation {
    Relation {
        name: name.to_string(),
        kind: RelationKind::Filter {
            input: RelationId(input),
            condition: Expr::Literal(Literal::Bool(true)),
        },
    }
}

fn chain_plan() -> Plan {
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
            // Declared out of dependency order on purpose.
            filter("b", 2),
            filter("a", 0),
            Relation {
                name: "base".to_string(),
                kind: RelationKind::Read {
                    schema: SchemaId(0),
                    source: SourceId(0),
                },
            },
        ],
        roots: vec![RelationId(1)],
    }
}

#[test]
fn test_topological_order_puts_inputs_first() {
    let plan = chain_plan();
    let order = RelationGraph::from_plan(&plan).topological_order().unwrap();

    let pos = |id: u32| order.iter().position(|r| r.0 == id).unwrap();
    // base (2) feeds b (0) feeds a (1)
    assert!(pos(2) < pos(0));
    assert!(pos(0) < pos(1));
}

#[test]
fn test_cycle_detected() {
    let mut plan = chain_plan();
    // base now consumes a: base -> b -> a -> base
    plan.relations[2] = filter("base", 1);

    let err = RelationGraph::from_plan(&plan).validate().unwrap_err();
    match err {
        PlanError::CircularReference { cycle } => {
            assert!(cycle.contains(" -> "), "cycle path should be readable: {cycle}");
        }
        other => panic!("expected CircularReference, got {other:?}"),
    }
}

#[test]
fn test_two_node_cycle_detected() {
    let mut plan = chain_plan();
    plan.relations[0] = filter("b", 1);
    plan.relations[1] = filter("a", 0);
    plan.relations[2] = Relation {
        name: "base".to_string(),
        kind: RelationKind::Read {
            schema: SchemaId(0),
            source: SourceId(0),
        },
    };

    assert!(matches!(
        RelationGraph::from_plan(&plan).validate(),
        Err(PlanError::CircularReference { .. })
    ));
}
