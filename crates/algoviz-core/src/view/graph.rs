use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{bounded, foreign};
use crate::error::ReducerError;
use crate::graph::{Edge, GraphSpec, NodeId};
use crate::step::{Step, StepKind};

pub(super) const NAME: &str = "graph";

/// Node-link view for traversal and shortest-path traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub labels: Vec<String>,
    pub edges: Vec<Edge>,
    pub directed: bool,
    pub start: usize,
    pub end: Option<NodeId>,
    /// Nodes in first-visit order.
    pub visit_order: Vec<NodeId>,
    pub visited: BTreeSet<NodeId>,
    pub processed: Vec<NodeId>,
    pub current: Option<NodeId>,
    /// Latest discovering node for each node.
    pub parent: Vec<Option<NodeId>>,
    pub path: Option<Vec<NodeId>>,
    pub complete: bool,
    pub note: Option<String>,
}

impl GraphView {
    #[must_use]
    pub fn new(graph: &GraphSpec, start: NodeId, end: Option<NodeId>) -> Self {
        Self {
            labels: graph.labels().to_vec(),
            edges: graph.edges().to_vec(),
            directed: graph.is_directed(),
            start,
            end,
            visit_order: Vec::new(),
            visited: BTreeSet::new(),
            processed: Vec::new(),
            current: None,
            parent: vec![None; graph.node_count()],
            path: None,
            complete: false,
            note: None,
        }
    }

    /// Edges along which nodes were discovered, as `(parent, child)`.
    #[must_use]
    pub fn tree_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(child, p)| p.map(|p| (p, child)))
            .collect()
    }

    pub(super) fn apply(&mut self, step: &Step) -> Result<(), ReducerError> {
        let n = self.labels.len();
        match &step.kind {
            StepKind::Visit { node, from } => {
                bounded(step, *node, n)?;
                if let Some(from) = from {
                    bounded(step, *from, n)?;
                    self.parent[*node] = Some(*from);
                }
                if self.visited.insert(*node) {
                    self.visit_order.push(*node);
                }
                self.current = Some(*node);
            }
            StepKind::Process { node } => {
                bounded(step, *node, n)?;
                if !self.processed.contains(node) {
                    self.processed.push(*node);
                }
                self.current = Some(*node);
            }
            StepKind::Path { nodes } => {
                for node in nodes {
                    bounded(step, *node, n)?;
                }
                self.path = Some(nodes.clone());
            }
            StepKind::Complete { .. } => {
                self.current = None;
                self.complete = true;
            }
            _ => return Err(foreign(step, NAME)),
        }
        self.note = Some(self.narrate(step));
        Ok(())
    }

    /// Step narration using node labels instead of ids.
    fn narrate(&self, step: &Step) -> String {
        let label = |id: &NodeId| self.labels.get(*id).map_or("?", String::as_str);
        match &step.kind {
            StepKind::Visit { node, from: None } => format!("Visiting {}", label(node)),
            StepKind::Visit {
                node,
                from: Some(from),
            } => format!("Visiting {} from {}", label(node), label(from)),
            StepKind::Process { node } => format!("Processing {}", label(node)),
            StepKind::Path { nodes } => {
                let names: Vec<&str> = nodes.iter().map(label).collect();
                format!("Path: {}", names.join(" -> "))
            }
            other => other.describe(),
        }
    }
}
