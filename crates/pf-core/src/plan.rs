//! The plan IR: the canonical, syntax-independent model every stage works on.

use crate::error::{PlanError, PlanResult};
use crate::graph::RelationGraph;
use crate::relation::{Relation, RelationKind};
use crate::source::Source;
use crate::types::Type;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $Name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $Name(pub u32);

        impl $Name {
            /// The arena index this id denotes.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $Name {
            fn from(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

define_id! {
    /// Arena index of a schema within a plan.
    SchemaId
}

define_id! {
    /// Arena index of a source within a plan.
    SourceId
}

define_id! {
    /// Arena index of a relation within a plan.
    RelationId
}

/// One `(name, type)` pair in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// An ordered, named field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// A fully resolved plan.
///
/// Owns every schema, source, and relation, plus the ordered list of root
/// relations (plan outputs). All cross-references are arena indices; a plan
/// that passes [`validate`](Plan::validate) contains no dangling reference
/// and no relation cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub schemas: Vec<Schema>,
    pub sources: Vec<Source>,
    pub relations: Vec<Relation>,
    pub roots: Vec<RelationId>,
}

impl Plan {
    pub fn schema(&self, id: SchemaId) -> Option<&Schema> {
        self.schemas.get(id.index())
    }

    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.index())
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(id.index())
    }

    /// Check the structural invariants: every index in bounds, the relation
    /// graph acyclic, and at least one root.
    pub fn validate(&self) -> PlanResult<()> {
        for relation in &self.relations {
            match &relation.kind {
                RelationKind::Read { schema, source } => {
                    if self.schema(*schema).is_none() {
                        return Err(PlanError::DanglingSchema {
                            relation: relation.name.clone(),
                            index: schema.0,
                        });
                    }
                    if self.source(*source).is_none() {
                        return Err(PlanError::DanglingSource {
                            relation: relation.name.clone(),
                            index: source.0,
                        });
                    }
                }
                _ => {
                    for input in relation.inputs() {
                        if self.relation(input).is_none() {
                            return Err(PlanError::DanglingInput {
                                relation: relation.name.clone(),
                                index: input.0,
                            });
                        }
                    }
                }
            }
        }

        for root in &self.roots {
            if self.relation(*root).is_none() {
                return Err(PlanError::DanglingRoot { index: root.0 });
            }
        }
        if self.roots.is_empty() {
            return Err(PlanError::NoRoots);
        }

        RelationGraph::from_plan(self).validate()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
