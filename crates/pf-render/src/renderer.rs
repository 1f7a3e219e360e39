//! Canonical text renderer: IR in, plan text out.
//!
//! Output uses the lowercase pipeline surface exclusively. The layout is
//! fixed: a pipelines block naming the roots, then schemas and sources in
//! declaration order, then relations in topological order with their inputs
//! spelled out as explicit details. Equal plans render to identical text,
//! and the output always re-parses and re-resolves to an equal plan.

use crate::error::RenderResult;
use pf_core::{
    escape_string, Literal, Measure, NamedExpr, Plan, Relation, RelationGraph, RelationKind,
    Schema, SortField, Source, SourceKind,
};

/// Render a plan to its canonical textual form.
pub fn render_plan(plan: &Plan) -> RenderResult<String> {
    plan.validate()?;
    let order = RelationGraph::from_plan(plan).topological_order()?;

    let mut out = String::new();

    out.push_str("pipelines {\n");
    for root in &plan.roots {
        let relation = &plan.relations[root.index()];
        out.push_str(&format!("  {} -> root;\n", relation.name));
    }
    out.push_str("}\n");

    for schema in &plan.schemas {
        out.push('\n');
        render_schema(&mut out, schema);
    }

    for source in &plan.sources {
        out.push('\n');
        render_source(&mut out, source);
    }

    for id in order {
        out.push('\n');
        render_relation(&mut out, plan, &plan.relations[id.index()]);
    }

    log::debug!(
        "rendered plan: {} relations, {} bytes",
        plan.relations.len(),
        out.len()
    );
    Ok(out)
}

fn render_schema(out: &mut String, schema: &Schema) {
    out.push_str(&format!("schema {} {{\n", schema.name));
    for field in &schema.fields {
        out.push_str(&format!("  {} {};\n", field.name, field.ty));
    }
    out.push_str("}\n");
}

fn render_source(out: &mut String, source: &Source) {
    out.push_str(&format!(
        "source {} {} {{\n",
        source.kind.kind_name(),
        source.name
    ));
    match &source.kind {
        SourceKind::LocalFiles { items } => {
            if !items.is_empty() {
                out.push_str("  items = [\n");
                for item in items {
                    out.push_str("    { ");
                    out.push_str(&format!(
                        "{}: \"{}\"",
                        item.location.key(),
                        escape_string(item.location.value())
                    ));
                    if let Some(index) = item.partition_index {
                        out.push_str(&format!(" partition_index: {}", index));
                    }
                    if let Some(start) = item.start {
                        out.push_str(&format!(" start: {}", start));
                    }
                    if let Some(length) = item.length {
                        out.push_str(&format!(" length: {}", length));
                    }
                    if let Some(format) = item.format {
                        out.push_str(&format!(" {}: {{}}", format.key()));
                    }
                    out.push_str(" },\n");
                }
                out.push_str("  ]\n");
            }
        }
        SourceKind::NamedTable { names } => {
            if !names.is_empty() {
                let rendered: Vec<String> = names
                    .iter()
                    .map(|n| format!("\"{}\"", escape_string(n)))
                    .collect();
                out.push_str(&format!("  names = [{}]\n", rendered.join(", ")));
            }
        }
        SourceKind::VirtualTable { rows } => {
            if !rows.is_empty() {
                out.push_str("  rows = [\n");
                for row in rows {
                    let cells: Vec<String> = row.iter().map(Literal::to_string).collect();
                    out.push_str(&format!("    {{ {} }},\n", cells.join(", ")));
                }
                out.push_str("  ]\n");
            }
        }
        SourceKind::Extension => {}
    }
    out.push_str("}\n");
}

fn render_relation(out: &mut String, plan: &Plan, relation: &Relation) {
    out.push_str(&format!(
        "{} relation {} {{\n",
        relation.kind_name(),
        relation.name
    ));
    match &relation.kind {
        RelationKind::Read { schema, source } => {
            out.push_str(&format!(
                "  base_schema {};\n",
                plan.schemas[schema.index()].name
            ));
            out.push_str(&format!(
                "  source {};\n",
                plan.sources[source.index()].name
            ));
        }
        RelationKind::Filter { input, condition } => {
            out.push_str(&format!(
                "  input {};\n",
                plan.relations[input.index()].name
            ));
            out.push_str(&format!("  filter {};\n", condition));
        }
        RelationKind::Project {
            input,
            expressions,
            emits,
        } => {
            out.push_str(&format!(
                "  input {};\n",
                plan.relations[input.index()].name
            ));
            for NamedExpr { expr, name } in expressions {
                match name {
                    Some(name) => {
                        out.push_str(&format!("  expression {} named {};\n", expr, name))
                    }
                    None => out.push_str(&format!("  expression {};\n", expr)),
                }
            }
            for emit in emits {
                out.push_str(&format!("  emit {};\n", emit));
            }
        }
        RelationKind::Join {
            left,
            right,
            join_type,
            condition,
        } => {
            out.push_str(&format!("  left {};\n", plan.relations[left.index()].name));
            out.push_str(&format!(
                "  right {};\n",
                plan.relations[right.index()].name
            ));
            out.push_str(&format!("  type {};\n", join_type.name()));
            if let Some(condition) = condition {
                out.push_str(&format!("  expression {};\n", condition));
            }
        }
        RelationKind::Aggregate {
            input,
            groupings,
            measures,
        } => {
            out.push_str(&format!(
                "  input {};\n",
                plan.relations[input.index()].name
            ));
            for grouping in groupings {
                out.push_str(&format!("  grouping {};\n", grouping));
            }
            if !measures.is_empty() {
                out.push_str("  measure {\n");
                for Measure {
                    expr,
                    output_type,
                    name,
                } in measures
                {
                    out.push_str(&format!("    measure {}", expr));
                    if let Some(ty) = output_type {
                        out.push_str(&format!(" -> {}", ty));
                    }
                    if let Some(name) = name {
                        out.push_str(&format!(" named {}", name));
                    }
                    out.push_str(";\n");
                }
                out.push_str("  }\n");
            }
        }
        RelationKind::Sort { input, fields } => {
            out.push_str(&format!(
                "  input {};\n",
                plan.relations[input.index()].name
            ));
            for SortField { expr, direction } in fields {
                match direction {
                    Some(direction) => {
                        out.push_str(&format!("  sort {} by {};\n", expr, direction.name()))
                    }
                    None => out.push_str(&format!("  sort {};\n", expr)),
                }
            }
        }
    }
    out.push_str("}\n");
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;
