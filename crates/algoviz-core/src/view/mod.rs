//! View state and the reducer that folds trace steps into it.
//!
//! [`ViewState::apply`] is the single place that interprets step kinds. The
//! state holds nothing but what the applied steps imply, so the view after
//! step `k` is always [`replay`]`(trace, k)`.
//!
//! # Failure Modes
//!
//! - A step kind foreign to the view's family, or a step referencing a
//!   position outside the baseline, yields a [`ReducerError`]. The view is
//!   left as it was before the offending step.

mod array;
mod graph;
mod recursion;
mod table;

pub use array::ArrayView;
pub use graph::GraphView;
pub use recursion::RecursionView;
pub use table::TableView;

use serde::{Deserialize, Serialize};

use crate::error::ReducerError;
use crate::step::Step;
use crate::trace::{Baseline, Trace, TraceResult};

/// Renderer-facing state, one shape per family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    Array(ArrayView),
    Graph(GraphView),
    Table(TableView),
    Recursion(RecursionView),
}

impl ViewState {
    /// The pre-run view for a trace's baseline.
    #[must_use]
    pub fn initial(trace: &Trace) -> Self {
        Self::from_baseline(trace.baseline())
    }

    #[must_use]
    pub fn from_baseline(baseline: &Baseline) -> Self {
        match baseline {
            Baseline::Array { values } => Self::Array(ArrayView::new(values.clone())),
            Baseline::Graph { graph, start, end } => {
                Self::Graph(GraphView::new(graph, *start, *end))
            }
            Baseline::Table {
                rows,
                cols,
                row_labels,
                col_labels,
            } => Self::Table(TableView::new(
                *rows,
                *cols,
                row_labels.clone(),
                col_labels.clone(),
            )),
            Baseline::Recursion { tree } => Self::Recursion(RecursionView::new(tree.clone())),
        }
    }

    /// Apply one step in place.
    pub fn apply(&mut self, step: &Step) -> Result<(), ReducerError> {
        match self {
            Self::Array(v) => v.apply(step),
            Self::Graph(v) => v.apply(step),
            Self::Table(v) => v.apply(step),
            Self::Recursion(v) => v.apply(step),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Array(_) => array::NAME,
            Self::Graph(_) => graph::NAME,
            Self::Table(_) => table::NAME,
            Self::Recursion(_) => recursion::NAME,
        }
    }

    /// Narration of the last applied step, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Array(v) => v.note.as_deref(),
            Self::Graph(v) => v.note.as_deref(),
            Self::Table(v) => v.note.as_deref(),
            Self::Recursion(v) => v.note.as_deref(),
        }
    }

    /// Whether the folded view agrees with a precomputed result.
    #[must_use]
    pub fn result_matches(&self, result: &TraceResult) -> bool {
        match (self, result) {
            (Self::Array(v), TraceResult::Sorted { values }) => &v.values == values,
            (Self::Array(v), TraceResult::Search { index }) => &v.found == index,
            (
                Self::Graph(v),
                TraceResult::Traversal {
                    visit_order, path, ..
                },
            ) => &v.visit_order == visit_order && &v.path == path,
            (Self::Table(v), TraceResult::Value { value }) => v.bottom_right() == Some(*value),
            (Self::Recursion(v), TraceResult::Value { value }) => v.root_result() == Some(*value),
            _ => false,
        }
    }
}

/// Pure wrapper over [`ViewState::apply`].
pub fn reduce(view: &ViewState, step: &Step) -> Result<ViewState, ReducerError> {
    let mut next = view.clone();
    next.apply(step)?;
    Ok(next)
}

/// Fold the first `k` steps of `trace` over its initial view.
pub fn replay(trace: &Trace, k: usize) -> Result<ViewState, ReducerError> {
    let mut view = ViewState::initial(trace);
    for step in trace.steps().iter().take(k) {
        view.apply(step)?;
    }
    Ok(view)
}

pub(crate) fn foreign(step: &Step, view: &'static str) -> ReducerError {
    ReducerError::ForeignStep {
        ordinal: step.ordinal,
        kind: step.kind.name(),
        view,
    }
}

pub(crate) fn bounded(step: &Step, position: usize, bound: usize) -> Result<(), ReducerError> {
    if position < bound {
        Ok(())
    } else {
        Err(ReducerError::OutOfBounds {
            ordinal: step.ordinal,
            kind: step.kind.name(),
            position,
            bound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{dp, graph as graph_gen, recursion as rec_gen, search, sort};
    use crate::graph::GraphSpec;
    use crate::step::StepKind;

    fn all_traces() -> Vec<Trace> {
        let g = GraphSpec::new(false)
            .with_edge("A", "B", 4)
            .with_edge("B", "C", 1)
            .with_edge("A", "C", 7)
            .with_edge("C", "D", 2);
        vec![
            sort::heap_sort(&[4, 1, 3, 9, 7]).unwrap(),
            search::jump_search(&[4, 1, 3, 9, 7], 9).unwrap(),
            graph_gen::bfs(&g, Some(0), Some(3)).unwrap(),
            graph_gen::dijkstra(&g, Some(0), Some(3)).unwrap(),
            rec_gen::fibonacci(5).unwrap(),
            dp::lcs(&["ABCB".into(), "BCB".into()]).unwrap(),
        ]
    }

    #[test]
    fn full_replay_reproduces_result() {
        for trace in all_traces() {
            let view = replay(&trace, trace.len()).unwrap();
            assert!(view.result_matches(trace.result()), "{:?}", trace.algorithm());
        }
    }

    #[test]
    fn reduce_does_not_touch_input_view() {
        let trace = sort::bubble_sort(&[2, 1]).unwrap();
        let before = ViewState::initial(&trace);
        let snapshot = before.clone();
        let after = reduce(&before, &trace.steps()[1]).unwrap();
        assert_eq!(before, snapshot);
        assert_ne!(before, after);
    }

    #[test]
    fn foreign_step_is_an_internal_error() {
        let trace = sort::bubble_sort(&[2, 1]).unwrap();
        let view = ViewState::initial(&trace);
        let stray = Step {
            ordinal: 9,
            kind: StepKind::Process { node: 0 },
        };
        assert_eq!(
            reduce(&view, &stray).unwrap_err(),
            ReducerError::ForeignStep {
                ordinal: 9,
                kind: "process",
                view: "array"
            }
        );
    }

    #[test]
    fn replay_zero_is_initial() {
        for trace in all_traces() {
            assert_eq!(replay(&trace, 0).unwrap(), ViewState::initial(&trace));
        }
    }

    #[test]
    fn view_serializes_with_tag() {
        let trace = sort::bubble_sort(&[2, 1]).unwrap();
        let json = serde_json::to_value(ViewState::initial(&trace)).unwrap();
        assert_eq!(json["view"], "array");
        assert_eq!(json["values"], serde_json::json!([2, 1]));
    }
}
