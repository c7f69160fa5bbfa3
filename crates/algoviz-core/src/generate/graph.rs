//! Graph traversal and shortest path.
//!
//! # Invariants
//!
//! 1. BFS marks a node visited when it is enqueued, so each node gets
//!    exactly one `Visit`.
//! 2. Dijkstra emits a `Visit` for every successful relaxation; a node may be
//!    visited more than once but is processed at most once.
//! 3. Frontier ties in Dijkstra go to the lowest node id.
//! 4. A `Path` step is emitted only when an end node was requested and
//!    reached.

use std::collections::VecDeque;

use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::graph::{GraphSpec, NodeId};
use crate::step::StepKind;
use crate::trace::{Baseline, Trace, TraceBuilder, TraceResult};

fn check_endpoints(
    graph: &GraphSpec,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<NodeId, ValidationError> {
    graph.validate()?;
    let start = start.ok_or_else(|| ValidationError::missing("start node"))?;
    let last = graph.node_count() as i64 - 1;
    for (what, id) in [("start node", Some(start)), ("end node", end)] {
        if let Some(id) = id {
            ValidationError::check_range(what, id as i64, 0, last)?;
        }
    }
    Ok(start)
}

/// Follow predecessor links back from `end`.
fn walk_back(prev: &[Option<NodeId>], start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        match prev[cur] {
            Some(p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

fn label_path(graph: &GraphSpec, path: &[NodeId]) -> String {
    path.iter()
        .map(|&id| graph.label(id).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Breadth-first search from `start`, stopping when `end` is dequeued.
pub fn bfs(
    graph: &GraphSpec,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<Trace, ValidationError> {
    let start = check_endpoints(graph, start, end)?;
    let adj = graph.adjacency();
    let n = graph.node_count();
    let mut steps = TraceBuilder::new();
    let mut visited = vec![false; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut visit_order = vec![start];
    let mut queue = VecDeque::from([start]);
    let mut reached = false;

    visited[start] = true;
    steps.push(StepKind::Visit {
        node: start,
        from: None,
    });

    while let Some(u) = queue.pop_front() {
        steps.push(StepKind::Process { node: u });
        if end == Some(u) {
            reached = true;
            break;
        }
        for &(v, _) in &adj[u] {
            if !visited[v] {
                visited[v] = true;
                prev[v] = Some(u);
                visit_order.push(v);
                queue.push_back(v);
                steps.push(StepKind::Visit {
                    node: v,
                    from: Some(u),
                });
            }
        }
    }

    let path = match end {
        Some(end) if reached => {
            let path = walk_back(&prev, start, end);
            steps.push(StepKind::Path {
                nodes: path.clone(),
            });
            let note = format!(
                "Reached {} via {}",
                label_of(graph, end),
                label_path(graph, &path)
            );
            steps.complete(None, note);
            Some(path)
        }
        Some(end) => {
            steps.complete(None, format!("{} is unreachable", label_of(graph, end)));
            None
        }
        None => {
            steps.complete(None, format!("Visited {} nodes", visit_order.len()));
            None
        }
    };

    Ok(steps.finish(
        Algorithm::Bfs,
        Baseline::Graph {
            graph: graph.clone(),
            start,
            end,
        },
        TraceResult::Traversal {
            visit_order,
            path,
            distance: None,
        },
    ))
}

/// Dijkstra with a linear frontier scan. Stops once `end` is settled.
pub fn dijkstra(
    graph: &GraphSpec,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<Trace, ValidationError> {
    let start = check_endpoints(graph, start, end)?;
    let end = end.ok_or_else(|| ValidationError::missing("end node"))?;
    let adj = graph.adjacency();
    let n = graph.node_count();
    let mut steps = TraceBuilder::new();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut visit_order = vec![start];

    dist[start] = Some(0);
    steps.push(StepKind::Visit {
        node: start,
        from: None,
    });

    loop {
        let mut next: Option<(NodeId, u64)> = None;
        for (id, d) in dist.iter().enumerate() {
            if let (Some(d), false) = (*d, settled[id]) {
                if next.is_none_or(|(_, best)| d < best) {
                    next = Some((id, d));
                }
            }
        }
        let Some((u, du)) = next else { break };

        settled[u] = true;
        steps.push(StepKind::Process { node: u });
        if u == end {
            break;
        }
        for &(v, w) in &adj[u] {
            if settled[v] {
                continue;
            }
            let candidate = du + u64::from(w);
            if dist[v].is_none_or(|d| candidate < d) {
                if dist[v].is_none() {
                    visit_order.push(v);
                }
                dist[v] = Some(candidate);
                prev[v] = Some(u);
                steps.push(StepKind::Visit {
                    node: v,
                    from: Some(u),
                });
            }
        }
    }

    let (path, distance) = if settled[end] {
        let path = walk_back(&prev, start, end);
        let distance = dist[end];
        steps.push(StepKind::Path {
            nodes: path.clone(),
        });
        steps.complete(
            None,
            format!(
                "Shortest path {} has total weight {}",
                label_path(graph, &path),
                distance.unwrap_or(0)
            ),
        );
        (Some(path), distance)
    } else {
        steps.complete(None, format!("{} is unreachable", label_of(graph, end)));
        (None, None)
    };

    Ok(steps.finish(
        Algorithm::Dijkstra,
        Baseline::Graph {
            graph: graph.clone(),
            start,
            end: Some(end),
        },
        TraceResult::Traversal {
            visit_order,
            path,
            distance,
        },
    ))
}

fn label_of(graph: &GraphSpec, id: NodeId) -> &str {
    graph.label(id).unwrap_or("?")
}
