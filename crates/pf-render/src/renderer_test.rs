use super::*;
use crate::error::RenderError;
use pf_core::Plan;

fn plan_from_text(text: &str) -> Plan {
    pf_parser::resolve(pf_parser::parse(text).unwrap()).unwrap()
}

const LEGACY_FORM: &str = r#"
schema s {
  a i32;
}

source NAMED_TABLE t {
  NAMES = ["t1"]
}

read RELATION r {
  SOURCE t;
  BASE_SCHEMA s;
}

filter RELATION f {
  INPUT r;
  FILTER gt(a, 10);
}

ROOT {
  NAMES = [f]
}
"#;

const PIPELINE_FORM: &str = r#"
pipelines {
  r -> f;
  f -> root;
}

schema s {
  a i32;
}

source named_table t {
  names = ["t1"]
}

read relation r {
  base_schema s;
  source t;
}

filter relation f {
  filter gt(a, 10);
}
"#;

const CANONICAL: &str = "\
pipelines {
  f -> root;
}

schema s {
  a i32;
}

source named_table t {
  names = [\"t1\"]
}

read relation r {
  base_schema s;
  source t;
}

filter relation f {
  input r;
  filter gt(a, 10);
}
";

#[test]
fn test_render_canonical_layout() {
    let plan = plan_from_text(LEGACY_FORM);
    assert_eq!(render_plan(&plan).unwrap(), CANONICAL);
}

#[test]
fn test_both_surfaces_render_identically() {
    let legacy = plan_from_text(LEGACY_FORM);
    let pipeline = plan_from_text(PIPELINE_FORM);
    assert_eq!(legacy, pipeline);
    assert_eq!(
        render_plan(&legacy).unwrap(),
        render_plan(&pipeline).unwrap()
    );
}

#[test]
fn test_rendered_text_reparses_to_equal_plan() {
    let plan = plan_from_text(LEGACY_FORM);
    let text = render_plan(&plan).unwrap();
    assert_eq!(plan_from_text(&text), plan);
}

#[test]
fn test_render_is_a_fixed_point() {
    let plan = plan_from_text(LEGACY_FORM);
    let once = render_plan(&plan).unwrap();
    let twice = render_plan(&plan_from_text(&once)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_render_local_files_and_literals() {
    let plan = plan_from_text(
        r#"
pipelines {
  rows -> root;
}

schema wide {
  label string;
  weight fp64?;
  tags list<string>;
}

source local_files files {
  items = [
    { uri_path_glob: "part-*.parquet" partition_index: 3 parquet: {} }
  ]
}

read relation rows {
  base_schema wide;
  source files;
}
"#,
    );
    let text = render_plan(&plan).unwrap();
    assert!(text.contains("weight fp64?;"));
    assert!(text.contains("tags list<string>;"));
    assert!(text.contains(
        "{ uri_path_glob: \"part-*.parquet\" partition_index: 3 parquet: {} }"
    ));
    assert_eq!(plan_from_text(&text), plan);
}

#[test]
fn test_render_join_and_sort_details() {
    let plan = plan_from_text(
        r#"
pipelines {
  people -> matched;
  pets -> matched;
  matched -> ranked;
  ranked -> root;
}

schema ps {
  name string;
  age i32;
}

source named_table people_table {
  names = ["people"]
}

source named_table pets_table {
  names = ["pets"]
}

read relation people {
  base_schema ps;
  source people_table;
}

read relation pets {
  base_schema ps;
  source pets_table;
}

join relation matched {
  left people;
  right pets;
  type outer;
  expression eq(people.name, pets.name);
}

sort relation ranked {
  sort age by desc_nulls_last;
}
"#,
    );
    let text = render_plan(&plan).unwrap();
    assert!(text.contains("  left people;\n  right pets;\n  type outer;\n"));
    assert!(text.contains("  expression eq(people.name, pets.name);\n"));
    assert!(text.contains("  sort age by desc_nulls_last;\n"));
    assert_eq!(plan_from_text(&text), plan);
}

#[test]
fn test_render_rejects_invalid_plan() {
    let plan = Plan::default();
    assert!(matches!(
        render_plan(&plan),
        Err(RenderError::InvalidPlan(_))
    ));
}
