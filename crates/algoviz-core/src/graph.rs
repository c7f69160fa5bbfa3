//! Weighted graph description consumed by the graph generators.
//!
//! Nodes are dense indices `0..node_count()` with display labels. Neighbor
//! order is edge-list order; an undirected edge contributes to both
//! endpoints at the position it was added.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::input::limits;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    labels: Vec<String>,
    edges: Vec<Edge>,
    directed: bool,
}

impl GraphSpec {
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            labels: Vec::new(),
            edges: Vec::new(),
            directed,
        }
    }

    /// Graph with nodes labelled `A`, `B`, ... and no edges.
    #[must_use]
    pub fn lettered(nodes: usize, directed: bool) -> Self {
        let mut graph = Self::new(directed);
        for i in 0..nodes {
            graph.labels.push(letter_label(i));
        }
        graph
    }

    /// Return the id for `label`, adding the node if it is new.
    pub fn intern(&mut self, label: &str) -> NodeId {
        if let Some(id) = self.node_id(label) {
            return id;
        }
        self.labels.push(label.to_string());
        self.labels.len() - 1
    }

    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: u32,
    ) -> Result<(), ValidationError> {
        let n = self.labels.len();
        for id in [from, to] {
            if id >= n {
                return Err(ValidationError::out_of_range(
                    "node id",
                    id as i64,
                    0,
                    n as i64 - 1,
                ));
            }
        }
        ValidationError::check_range(
            "edge weight",
            i64::from(weight),
            limits::MIN_EDGE_WEIGHT,
            limits::MAX_EDGE_WEIGHT,
        )?;
        self.edges.push(Edge { from, to, weight });
        Ok(())
    }

    #[must_use]
    pub fn with_edge(mut self, from: &str, to: &str, weight: u32) -> Self {
        let from = self.intern(from);
        let to = self.intern(to);
        self.edges.push(Edge { from, to, weight });
        self
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.labels.iter().position(|l| l == label)
    }

    /// Resolve a label, reporting unknown labels as validation errors.
    pub fn require_node(&self, label: &str) -> Result<NodeId, ValidationError> {
        self.node_id(label.trim())
            .ok_or_else(|| ValidationError::UnknownNode {
                label: label.to_string(),
            })
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Weight of the edge `from -> to` (either direction when undirected).
    #[must_use]
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.edges
            .iter()
            .filter(|e| {
                (e.from == from && e.to == to) || (!self.directed && e.from == to && e.to == from)
            })
            .map(|e| e.weight)
            .min()
    }

    /// Neighbor lists in edge-list order.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(NodeId, u32)>> {
        let mut adj = vec![Vec::new(); self.labels.len()];
        for edge in &self.edges {
            adj[edge.from].push((edge.to, edge.weight));
            if !self.directed && edge.from != edge.to {
                adj[edge.to].push((edge.from, edge.weight));
            }
        }
        adj
    }

    /// Check node count, edge endpoints, and weights against engine limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let n = self.labels.len();
        if n == 0 {
            return Err(ValidationError::empty("graph"));
        }
        ValidationError::check_range(
            "graph node count",
            n as i64,
            1,
            limits::MAX_GRAPH_NODES as i64,
        )?;
        for edge in &self.edges {
            if edge.from >= n || edge.to >= n {
                return Err(ValidationError::invalid(
                    "graph",
                    format!("edge {}->{} references a missing node", edge.from, edge.to),
                ));
            }
            ValidationError::check_range(
                "edge weight",
                i64::from(edge.weight),
                limits::MIN_EDGE_WEIGHT,
                limits::MAX_EDGE_WEIGHT,
            )?;
        }
        Ok(())
    }
}

/// `0 -> "A"`, `25 -> "Z"`, `26 -> "AA"`.
#[must_use]
pub fn letter_label(mut index: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
