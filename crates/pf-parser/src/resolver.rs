//! Resolver: binds names in the CST and builds the plan IR.
//!
//! Two passes: declare every name first (so forward references work), then
//! resolve every reference to an arena index. The resolver never hands back
//! a partially resolved plan; the first error wins.

use crate::ast::{Decl, NameRef, RelationDecl, RelationKindName};
use crate::error::{ResolveError, ResolveResult};
use crate::token::Span;
use pf_core::{
    JoinType, NamedExpr, Plan, PlanError, Relation, RelationGraph, RelationId, RelationKind,
    Schema, SchemaId, Source, SourceId,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// The reserved pipeline sentinel; edges into it designate roots.
const ROOT_SENTINEL: &str = "root";

/// Resolve parsed declarations into a validated [`Plan`].
pub fn resolve(decls: Vec<Decl>) -> ResolveResult<Plan> {
    Resolver::default().run(decls)
}

#[derive(Default)]
struct Resolver {
    schemas: Vec<Schema>,
    schema_ids: HashMap<String, SchemaId>,
    sources: Vec<Source>,
    source_ids: HashMap<String, SourceId>,
    relation_ids: HashMap<String, RelationId>,
    /// Input bindings contributed by pipeline edges, keyed by target name.
    edge_inputs: HashMap<String, Vec<NameRef>>,
    /// Every non-root edge target, kept so each can be checked against the
    /// declared relations once pass 1 is done.
    edge_targets: Vec<NameRef>,
    /// Roots from pipeline edges, in edge order, de-duplicated.
    pipeline_roots: Vec<NameRef>,
    /// Roots from explicit `root { names = [...] }` declarations, verbatim.
    explicit_roots: Vec<NameRef>,
}

impl Resolver {
    fn run(mut self, decls: Vec<Decl>) -> ResolveResult<Plan> {
        let mut relation_decls = Vec::new();

        // Pass 1: declare names and collect edges.
        for decl in decls {
            match decl {
                Decl::Schema(schema) => {
                    self.declare_schema(schema.name.clone(), schema.span)?;
                    self.add_schema(schema.name, schema.fields)?;
                }
                Decl::Source(source) => {
                    let id = SourceId::from(self.sources.len());
                    Self::declare(
                        &mut self.source_ids,
                        source.name.clone(),
                        id,
                        "source",
                        source.span,
                    )?;
                    self.sources.push(Source {
                        name: source.name,
                        kind: source.kind,
                    });
                }
                Decl::Relation(relation) => {
                    if relation.name == ROOT_SENTINEL {
                        return Err(ResolveError::ReservedName {
                            span: relation.span,
                        });
                    }
                    let id = RelationId::from(relation_decls.len());
                    Self::declare(
                        &mut self.relation_ids,
                        relation.name.clone(),
                        id,
                        "relation",
                        relation.span,
                    )?;
                    relation_decls.push(relation);
                }
                Decl::Root(root) => {
                    self.explicit_roots.extend(root.names);
                }
                Decl::Pipelines(pipelines) => {
                    for edge in pipelines.edges {
                        if edge.to.name == ROOT_SENTINEL {
                            if !self.pipeline_roots.iter().any(|r| r.name == edge.from.name) {
                                self.pipeline_roots.push(edge.from);
                            }
                        } else {
                            self.edge_inputs
                                .entry(edge.to.name.clone())
                                .or_default()
                                .push(edge.from);
                            self.edge_targets.push(edge.to);
                        }
                    }
                }
            }
        }

        // Edge targets are never looked up on their own; a target naming no
        // declared relation would otherwise vanish without a trace.
        for target in &self.edge_targets {
            if !self.relation_ids.contains_key(&target.name) {
                return Err(ResolveError::UndefinedSymbol {
                    kind: "relation",
                    name: target.name.clone(),
                    span: target.span,
                });
            }
        }

        // Pass 2: resolve references.
        let mut relations = Vec::with_capacity(relation_decls.len());
        for decl in relation_decls {
            relations.push(self.resolve_relation(decl)?);
        }

        let roots = self.resolve_roots()?;

        let plan = Plan {
            schemas: self.schemas,
            sources: self.sources,
            relations,
            roots,
        };

        match RelationGraph::from_plan(&plan).validate() {
            Ok(()) => {}
            Err(PlanError::CircularReference { cycle }) => {
                return Err(ResolveError::CyclicReference { cycle })
            }
            Err(other) => {
                // Index errors cannot happen: every id came from our maps.
                return Err(ResolveError::CyclicReference {
                    cycle: other.to_string(),
                });
            }
        }

        log::debug!(
            "resolved plan: {} schemas, {} sources, {} relations, {} roots",
            plan.schemas.len(),
            plan.sources.len(),
            plan.relations.len(),
            plan.roots.len()
        );
        Ok(plan)
    }

    fn declare_schema(&mut self, name: String, span: Span) -> ResolveResult<()> {
        let id = SchemaId::from(self.schemas.len());
        Self::declare(&mut self.schema_ids, name, id, "schema", span)
    }

    fn add_schema(&mut self, name: String, fields: Vec<pf_core::Field>) -> ResolveResult<()> {
        let mut seen = HashMap::new();
        for field in &fields {
            if seen.insert(field.name.clone(), ()).is_some() {
                return Err(ResolveError::DuplicateField {
                    schema: name,
                    field: field.name.clone(),
                });
            }
        }
        self.schemas.push(Schema { name, fields });
        Ok(())
    }

    fn declare<T: Copy>(
        ids: &mut HashMap<String, T>,
        name: String,
        id: T,
        kind: &'static str,
        span: Span,
    ) -> ResolveResult<()> {
        match ids.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
            Entry::Occupied(slot) => Err(ResolveError::DuplicateSymbol {
                kind,
                name: slot.key().clone(),
                span,
            }),
        }
    }

    fn lookup_schema(&self, reference: &NameRef) -> ResolveResult<SchemaId> {
        self.schema_ids
            .get(&reference.name)
            .copied()
            .ok_or_else(|| ResolveError::UndefinedSymbol {
                kind: "schema",
                name: reference.name.clone(),
                span: reference.span,
            })
    }

    fn lookup_source(&self, reference: &NameRef) -> ResolveResult<SourceId> {
        self.source_ids
            .get(&reference.name)
            .copied()
            .ok_or_else(|| ResolveError::UndefinedSymbol {
                kind: "source",
                name: reference.name.clone(),
                span: reference.span,
            })
    }

    fn lookup_relation(&self, reference: &NameRef) -> ResolveResult<RelationId> {
        self.relation_ids
            .get(&reference.name)
            .copied()
            .ok_or_else(|| ResolveError::UndefinedSymbol {
                kind: "relation",
                name: reference.name.clone(),
                span: reference.span,
            })
    }

    /// The single input of a non-join relation: an explicit `input` detail,
    /// a pipeline edge, or both when they agree.
    fn single_input(&self, decl: &RelationDecl) -> ResolveResult<RelationId> {
        let edges = self.edge_inputs.get(&decl.name);
        let explicit = decl.input.as_ref();

        if let Some(edges) = edges {
            for edge in edges {
                if let Some(explicit) = explicit {
                    if explicit.name != edge.name {
                        return Err(ResolveError::ConflictingInput {
                            relation: decl.name.clone(),
                            first: explicit.name.clone(),
                            second: edge.name.clone(),
                        });
                    }
                }
            }
            if explicit.is_none() {
                if let Some(conflicting) = edges.iter().find(|e| e.name != edges[0].name) {
                    return Err(ResolveError::ConflictingInput {
                        relation: decl.name.clone(),
                        first: edges[0].name.clone(),
                        second: conflicting.name.clone(),
                    });
                }
            }
        }

        let reference = explicit
            .or_else(|| edges.and_then(|e| e.first()))
            .ok_or(ResolveError::MissingDetail {
                relation: decl.name.clone(),
                detail: "input",
            })?;
        self.lookup_relation(reference)
    }

    fn resolve_relation(&self, decl: RelationDecl) -> ResolveResult<Relation> {
        let name = decl.name.clone();
        let kind = match decl.kind {
            RelationKindName::Read => {
                if let Some(edge) = self
                    .edge_inputs
                    .get(&name)
                    .and_then(|edges| edges.first())
                    .or(decl.input.as_ref())
                {
                    return Err(ResolveError::UnexpectedInput {
                        relation: name,
                        input: edge.name.clone(),
                    });
                }
                let schema_ref = decl.base_schema.as_ref().ok_or(ResolveError::MissingDetail {
                    relation: name.clone(),
                    detail: "base_schema",
                })?;
                let source_ref = decl.source.as_ref().ok_or(ResolveError::MissingDetail {
                    relation: name.clone(),
                    detail: "source",
                })?;
                RelationKind::Read {
                    schema: self.lookup_schema(schema_ref)?,
                    source: self.lookup_source(source_ref)?,
                }
            }
            RelationKindName::Filter => {
                let input = self.single_input(&decl)?;
                let condition = decl.filter.ok_or(ResolveError::MissingDetail {
                    relation: name.clone(),
                    detail: "filter",
                })?;
                RelationKind::Filter { input, condition }
            }
            RelationKindName::Project => {
                let input = self.single_input(&decl)?;
                RelationKind::Project {
                    input,
                    expressions: decl
                        .expressions
                        .into_iter()
                        .map(|(expr, name)| NamedExpr { expr, name })
                        .collect(),
                    emits: decl.emits,
                }
            }
            RelationKindName::Join => self.resolve_join(&name, &decl)?,
            RelationKindName::Aggregate => {
                let input = self.single_input(&decl)?;
                RelationKind::Aggregate {
                    input,
                    groupings: decl.groupings,
                    measures: decl.measures,
                }
            }
            RelationKindName::Sort => {
                let input = self.single_input(&decl)?;
                if decl.sorts.is_empty() {
                    return Err(ResolveError::MissingDetail {
                        relation: name,
                        detail: "sort",
                    });
                }
                RelationKind::Sort {
                    input,
                    fields: decl.sorts,
                }
            }
        };
        Ok(Relation { name, kind })
    }

    fn resolve_join(&self, name: &str, decl: &RelationDecl) -> ResolveResult<RelationKind> {
        let left_ref = decl.left.as_ref().ok_or(ResolveError::MissingDetail {
            relation: name.to_string(),
            detail: "left",
        })?;
        let right_ref = decl.right.as_ref().ok_or(ResolveError::MissingDetail {
            relation: name.to_string(),
            detail: "right",
        })?;

        // Pipeline edges into a join must name one of its declared sides.
        if let Some(edges) = self.edge_inputs.get(name) {
            for edge in edges {
                if edge.name != left_ref.name && edge.name != right_ref.name {
                    return Err(ResolveError::ConflictingInput {
                        relation: name.to_string(),
                        first: left_ref.name.clone(),
                        second: edge.name.clone(),
                    });
                }
            }
        }

        let join_type = match &decl.join_type {
            Some(reference) => JoinType::from_name(&reference.name).ok_or_else(|| {
                ResolveError::UnknownJoinType {
                    name: reference.name.clone(),
                    span: reference.span,
                }
            })?,
            None => JoinType::Inner,
        };

        let condition = decl
            .expressions
            .first()
            .map(|(expr, _)| expr.clone())
            .or_else(|| decl.filter.clone());

        Ok(RelationKind::Join {
            left: self.lookup_relation(left_ref)?,
            right: self.lookup_relation(right_ref)?,
            join_type,
            condition,
        })
    }

    fn resolve_roots(&self) -> ResolveResult<Vec<RelationId>> {
        let mut roots = Vec::new();
        let mut seen = HashMap::new();

        // Explicit root lists are taken verbatim; repeating a name there is
        // an authoring mistake, not a request for duplicate outputs.
        for reference in &self.explicit_roots {
            let id = self.lookup_relation(reference)?;
            if seen.insert(id, ()).is_some() {
                return Err(ResolveError::DuplicateRoot {
                    name: reference.name.clone(),
                });
            }
            roots.push(id);
        }

        // Pipeline roots were de-duplicated at collection time; one that
        // also appears in an explicit list is simply already covered.
        for reference in &self.pipeline_roots {
            let id = self.lookup_relation(reference)?;
            if seen.insert(id, ()).is_none() {
                roots.push(id);
            }
        }

        if roots.is_empty() {
            return Err(ResolveError::NoRoots);
        }
        Ok(roots)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
