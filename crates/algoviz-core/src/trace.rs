//! Immutable traces and the builder generators use to produce them.
//!
//! # Invariants
//!
//! 1. `steps()[i].ordinal == i` for every step (assigned by [`TraceBuilder`]).
//! 2. A trace is never mutated after [`TraceBuilder::finish`].
//! 3. Folding all steps over `ViewState::initial(trace)` reproduces
//!    [`Trace::result`]; [`Trace::validate_bounds`] checks this fold
//!    succeeds.

use serde::{Deserialize, Serialize};

use crate::call_tree::CallTree;
use crate::error::ReducerError;
use crate::family::Algorithm;
use crate::graph::{GraphSpec, NodeId};
use crate::step::{Step, StepKind};

/// Visual input the trace starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Baseline {
    Array {
        values: Vec<i64>,
    },
    Graph {
        graph: GraphSpec,
        start: NodeId,
        end: Option<NodeId>,
    },
    Table {
        rows: usize,
        cols: usize,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    },
    Recursion {
        tree: CallTree,
    },
}

/// What the algorithm computed, known before playback begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TraceResult {
    Sorted {
        values: Vec<i64>,
    },
    Search {
        index: Option<usize>,
    },
    Traversal {
        visit_order: Vec<NodeId>,
        path: Option<Vec<NodeId>>,
        distance: Option<u64>,
    },
    Value {
        value: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    algorithm: Algorithm,
    baseline: Baseline,
    steps: Vec<Step>,
    result: TraceResult,
}

impl Trace {
    #[inline]
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn result(&self) -> &TraceResult {
        &self.result
    }

    /// Count steps of the given kind tag (see [`StepKind::name`]).
    #[must_use]
    pub fn count(&self, kind: &str) -> usize {
        self.steps.iter().filter(|s| s.kind.name() == kind).count()
    }

    /// Replay the full trace, failing on any step that references a position
    /// outside the baseline or a kind foreign to it.
    pub fn validate_bounds(&self) -> Result<(), ReducerError> {
        crate::view::replay(self, self.len()).map(|_| ())
    }
}

/// Accumulates steps, assigning ordinals in emission order.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    steps: Vec<Step>,
}

impl TraceBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: StepKind) {
        let ordinal = self.steps.len() as u64;
        self.steps.push(Step { ordinal, kind });
    }

    pub fn complete(&mut self, index: Option<usize>, note: impl Into<String>) {
        self.push(StepKind::Complete {
            index,
            note: Some(note.into()),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn finish(self, algorithm: Algorithm, baseline: Baseline, result: TraceResult) -> Trace {
        tracing::debug!(
            algorithm = algorithm.key(),
            steps = self.steps.len(),
            "trace generated"
        );
        Trace {
            algorithm,
            baseline,
            steps: self.steps,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assigns_sequential_ordinals() {
        let mut b = TraceBuilder::new();
        b.push(StepKind::Compare { i: 0, j: 1 });
        b.push(StepKind::Swap { i: 0, j: 1 });
        b.complete(None, "done");
        let trace = b.finish(
            Algorithm::BubbleSort,
            Baseline::Array { values: vec![2, 1] },
            TraceResult::Sorted { values: vec![1, 2] },
        );
        let ordinals: Vec<_> = trace.steps().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert_eq!(trace.count("swap"), 1);
        assert!(trace.validate_bounds().is_ok());
    }

    #[test]
    fn validate_bounds_catches_out_of_range_steps() {
        let mut b = TraceBuilder::new();
        b.push(StepKind::Swap { i: 0, j: 5 });
        let trace = b.finish(
            Algorithm::BubbleSort,
            Baseline::Array { values: vec![2, 1] },
            TraceResult::Sorted { values: vec![1, 2] },
        );
        assert!(matches!(
            trace.validate_bounds(),
            Err(ReducerError::OutOfBounds { position: 5, .. })
        ));
    }
}
