//! Relation graph validation and topological ordering

use crate::error::{PlanError, PlanResult};
use crate::plan::{Plan, RelationId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// A directed graph over a plan's relations.
///
/// Edges run from an input relation to the relation consuming it, so a
/// topological sort yields inputs before the relations that reference them,
/// which is exactly the order the text renderer needs.
#[derive(Debug)]
pub struct RelationGraph {
    graph: DiGraph<String, ()>,
}

impl RelationGraph {
    /// Build the graph for a plan. Out-of-bounds input indices are skipped
    /// here; [`Plan::validate`] reports them separately.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = plan
            .relations
            .iter()
            .map(|rel| graph.add_node(rel.name.clone()))
            .collect();

        for (index, relation) in plan.relations.iter().enumerate() {
            for input in relation.inputs() {
                if let Some(&from) = nodes.get(input.index()) {
                    graph.add_edge(from, nodes[index], ());
                }
            }
        }

        Self { graph }
    }

    /// Validate the graph has no cycles
    pub fn validate(&self) -> PlanResult<()> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(PlanError::CircularReference {
                cycle: self.find_cycle_path(cycle.node_id()),
            }),
        }
    }

    /// Get relation ids in topological order (inputs first).
    ///
    /// Kahn's algorithm with an index-ordered frontier: among relations
    /// whose inputs are all placed, the lowest arena index goes first.
    /// Nodes are added in arena order, so the petgraph index and the
    /// relation id coincide, and a plan already declared inputs-first
    /// keeps its declaration order.
    pub fn topological_order(&self) -> PlanResult<Vec<RelationId>> {
        let mut indegree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|node| {
                self.graph
                    .edges_directed(node, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = indegree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(index, _)| Reverse(index))
            .collect();

        let mut order = Vec::with_capacity(indegree.len());
        while let Some(Reverse(index)) = ready.pop() {
            order.push(RelationId::from(index));
            for edge in self
                .graph
                .edges_directed(NodeIndex::new(index), Direction::Outgoing)
            {
                let next = edge.target().index();
                indegree[next] -= 1;
                if indegree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < self.graph.node_count() {
            let stuck = indegree.iter().position(|&degree| degree > 0).unwrap_or(0);
            return Err(PlanError::CircularReference {
                cycle: self.find_cycle_path(NodeIndex::new(stuck)),
            });
        }
        Ok(order)
    }

    /// Find a cycle path starting from a node for error reporting
    fn find_cycle_path(&self, start: NodeIndex) -> String {
        let mut path: Vec<String> = vec![self.graph[start].clone()];
        let mut current = start;
        let mut visited = HashSet::new();
        visited.insert(current);

        while let Some(edge) = self.graph.edges(current).next() {
            let target = edge.target();
            path.push(self.graph[target].clone());

            if target == start || visited.contains(&target) {
                break;
            }

            visited.insert(target);
            current = target;
        }

        path.join(" -> ")
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
