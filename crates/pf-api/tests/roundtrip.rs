//! End-to-end conversions through the public facade.

use pf_api::{
    decode_binary_to_plan, parse_text_to_binary, parse_text_to_plan, plan_from_json, plan_to_json,
    render_binary_to_text, DecodeError, ParseError, PlanForgeError, RelationId, ResolveError,
    SourceKind,
};

const SIMPLE_PLAN: &str = r#"
schema simple_schema {
  id i32;
  name string;
  value fp64;
}

source local_files simple_source {
  items = [
    { uri_file: "data.csv" }
  ]
}

read relation read_rel {
  source simple_source;
  base_schema simple_schema;
}

ROOT {
  NAMES = [read_rel]
}
"#;

const PIPELINE_PLAN: &str = r#"
pipelines {
  orders -> keep_large;
  keep_large -> totals;
  totals -> root;
}

schema order_schema {
  id i32;
  region string;
  amount fp64;
}

source named_table order_table {
  names = ["sales", "orders"]
}

read relation orders {
  base_schema order_schema;
  source order_table;
}

filter relation keep_large {
  filter gt(amount, 100.0_fp64) -> bool;
}

aggregate relation totals {
  grouping region;
  measure {
    measure sum(amount) -> fp64 named total;
  }
}
"#;

#[test]
fn test_simple_plan_converts_to_binary() {
    let bytes = parse_text_to_binary(SIMPLE_PLAN).unwrap();
    let plan = decode_binary_to_plan(&bytes).unwrap();
    assert_eq!(plan.schemas.len(), 1);
    assert_eq!(plan.sources.len(), 1);
    assert_eq!(plan.relations.len(), 1);
    assert_eq!(plan.roots.len(), 1);
}

#[test]
fn test_text_binary_text_binary_is_stable() {
    let first_bytes = parse_text_to_binary(PIPELINE_PLAN).unwrap();
    let text = render_binary_to_text(&first_bytes).unwrap();
    let second_bytes = parse_text_to_binary(&text).unwrap();
    assert_eq!(first_bytes, second_bytes);

    let first_plan = decode_binary_to_plan(&first_bytes).unwrap();
    let second_plan = decode_binary_to_plan(&second_bytes).unwrap();
    assert_eq!(first_plan, second_plan);
}

#[test]
fn test_rendered_text_preserves_literal_suffix() {
    let bytes = parse_text_to_binary(PIPELINE_PLAN).unwrap();
    let text = render_binary_to_text(&bytes).unwrap();
    assert!(text.contains("100.0_fp64"), "suffix lost in: {text}");
}

#[test]
fn test_both_surfaces_produce_identical_binaries() {
    let legacy = parse_text_to_binary(SIMPLE_PLAN).unwrap();
    let lowercase = parse_text_to_binary(
        r#"
pipelines {
  read_rel -> root;
}

schema simple_schema {
  id i32;
  name string;
  value fp64;
}

source local_files simple_source {
  items = [
    { uri_file: "data.csv" }
  ]
}

read relation read_rel {
  base_schema simple_schema;
  source simple_source;
}
"#,
    )
    .unwrap();
    assert_eq!(legacy, lowercase);
}

#[test]
fn test_virtual_and_extension_sources_survive_roundtrip() {
    let text = r#"
pipelines {
  inline -> root;
  remote -> root;
}

schema pair {
  id i32;
  label string;
}

source virtual_table inline_rows {
  rows = [
    { 1_i32, "one" },
    { 2, null },
    { 3.5, true }
  ]
}

source extension_table remote_rows {
}

read relation inline {
  base_schema pair;
  source inline_rows;
}

read relation remote {
  base_schema pair;
  source remote_rows;
}
"#;
    let first_bytes = parse_text_to_binary(text).unwrap();
    let rendered = render_binary_to_text(&first_bytes).unwrap();
    let second_bytes = parse_text_to_binary(&rendered).unwrap();
    assert_eq!(first_bytes, second_bytes);

    let plan = decode_binary_to_plan(&second_bytes).unwrap();
    let SourceKind::VirtualTable { rows } = &plan.sources[0].kind else {
        panic!("expected a virtual table, got {:?}", plan.sources[0].kind);
    };
    assert_eq!(rows.len(), 3);
    assert_eq!(plan.sources[1].kind, SourceKind::Extension);

    // The typed cell keeps its tag; the untyped ones stay bare.
    assert!(rendered.contains("{ 1_i32, \"one\" },"), "in: {rendered}");
    assert!(rendered.contains("{ 2, null },"), "in: {rendered}");
    assert!(rendered.contains("{ 3.5, true },"), "in: {rendered}");
    assert!(rendered.contains("source extension_table remote_rows"));
}

#[test]
fn test_empty_text_is_rejected() {
    assert!(matches!(
        parse_text_to_binary(""),
        Err(PlanForgeError::Parse(ParseError::EmptyPlan))
    ));
    assert!(matches!(
        parse_text_to_binary("   \n\t  // just a comment\n"),
        Err(PlanForgeError::Parse(ParseError::EmptyPlan))
    ));
}

#[test]
fn test_garbage_text_is_rejected() {
    assert!(matches!(
        parse_text_to_binary("definitely not a plan"),
        Err(PlanForgeError::Parse(_))
    ));
}

#[test]
fn test_empty_buffer_is_rejected() {
    assert!(matches!(
        render_binary_to_text(&[]),
        Err(PlanForgeError::Decode(DecodeError::EmptyBuffer))
    ));
}

#[test]
fn test_relation_cycle_is_rejected() {
    let err = parse_text_to_plan(
        r#"
pipelines {
  a -> b;
  b -> a;
  b -> root;
}

filter relation a {
  filter true;
}

filter relation b {
  filter true;
}
"#,
    )
    .unwrap_err();
    match err {
        PlanForgeError::Resolve(ResolveError::CyclicReference { cycle }) => {
            assert!(cycle.contains(" -> "), "cycle path should be readable: {cycle}");
        }
        other => panic!("expected a cycle error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_roots_are_rejected() {
    let text = r#"
schema s {
  a i32;
}

source named_table t {
  names = ["t"]
}

read relation r {
  base_schema s;
  source t;
}

ROOT {
  NAMES = [r, r]
}
"#;
    assert!(matches!(
        parse_text_to_plan(text),
        Err(PlanForgeError::Resolve(ResolveError::DuplicateRoot { .. }))
    ));
}

#[test]
fn test_duplicate_declarations_are_rejected() {
    let text = format!(
        "{}\nread relation read_rel {{ source simple_source; base_schema simple_schema; }}",
        SIMPLE_PLAN
    );
    assert!(matches!(
        parse_text_to_plan(&text),
        Err(PlanForgeError::Resolve(ResolveError::DuplicateSymbol { .. }))
    ));
}

#[test]
fn test_json_export_import_roundtrip() {
    let plan = parse_text_to_plan(PIPELINE_PLAN).unwrap();
    let json = plan_to_json(&plan).unwrap();
    assert_eq!(plan_from_json(&json).unwrap(), plan);
}

#[test]
fn test_json_import_validates_structure() {
    let mut plan = parse_text_to_plan(SIMPLE_PLAN).unwrap();
    // point the root at a relation that does not exist
    plan.roots = vec![RelationId(9)];
    let json = plan_to_json(&plan).unwrap();
    assert!(matches!(
        plan_from_json(&json),
        Err(PlanForgeError::InvalidPlan(_))
    ));
}
