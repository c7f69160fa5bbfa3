//! The step vocabulary shared by every trace generator.
//!
//! A [`Step`] is one atomic, replayable state transition. Generators emit
//! them; the reducer in [`crate::view`] is the only place that interprets
//! them.

use serde::{Deserialize, Serialize};

use crate::call_tree::FrameId;
use crate::graph::NodeId;

/// Cell coordinate in a DP table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One entry of a trace. `ordinal` is its zero-based position in the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub ordinal: u64,
    pub kind: StepKind,
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Two array positions are compared.
    Compare { i: usize, j: usize },
    /// Two array positions exchange values.
    Swap { i: usize, j: usize },
    /// An array position is overwritten.
    SetValue { index: usize, value: i64 },
    /// An array position holds its final value.
    MarkSorted { index: usize },
    /// A single array position is probed.
    MarkCurrent { index: usize },
    /// The active window narrows to `lo..=hi`.
    MarkRange { lo: usize, hi: usize },
    MarkPivot { index: usize },
    /// A node is discovered, optionally through an edge from `from`.
    Visit { node: NodeId, from: Option<NodeId> },
    /// A node is dequeued or settled.
    Process { node: NodeId },
    Path { nodes: Vec<NodeId> },
    /// A base-case cell is revealed.
    TableVisit { cell: Cell, value: i64 },
    /// A cell is computed from earlier cells.
    TableFill {
        cell: Cell,
        value: i64,
        note: Option<String>,
    },
    CallPush { frame: FrameId },
    CallReturn { frame: FrameId, result: i64 },
    Found { index: usize },
    /// Terminal step. `index` is set for successful searches.
    Complete {
        index: Option<usize>,
        note: Option<String>,
    },
}

impl StepKind {
    /// Stable tag used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compare { .. } => "compare",
            Self::Swap { .. } => "swap",
            Self::SetValue { .. } => "set_value",
            Self::MarkSorted { .. } => "mark_sorted",
            Self::MarkCurrent { .. } => "mark_current",
            Self::MarkRange { .. } => "mark_range",
            Self::MarkPivot { .. } => "mark_pivot",
            Self::Visit { .. } => "visit",
            Self::Process { .. } => "process",
            Self::Path { .. } => "path",
            Self::TableVisit { .. } => "table_visit",
            Self::TableFill { .. } => "table_fill",
            Self::CallPush { .. } => "call_push",
            Self::CallReturn { .. } => "call_return",
            Self::Found { .. } => "found",
            Self::Complete { .. } => "complete",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Human-readable narration for the status line.
    ///
    /// Generator-supplied notes win over the generic text.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Compare { i, j } => format!("Comparing positions {i} and {j}"),
            Self::Swap { i, j } => format!("Swapping positions {i} and {j}"),
            Self::SetValue { index, value } => format!("Writing {value} to position {index}"),
            Self::MarkSorted { index } => format!("Position {index} is in its final place"),
            Self::MarkCurrent { index } => format!("Checking position {index}"),
            Self::MarkRange { lo, hi } => format!("Searching range [{lo}, {hi}]"),
            Self::MarkPivot { index } => format!("Pivot at position {index}"),
            Self::Visit { node, from: None } => format!("Visiting node {node}"),
            Self::Visit {
                node,
                from: Some(from),
            } => format!("Visiting node {node} from {from}"),
            Self::Process { node } => format!("Processing node {node}"),
            Self::Path { nodes } => format!("Path found through {} nodes", nodes.len()),
            Self::TableVisit { cell, value } => {
                format!("Base case ({}, {}) = {value}", cell.row, cell.col)
            }
            Self::TableFill {
                note: Some(note), ..
            } => note.clone(),
            Self::TableFill { cell, value, .. } => {
                format!("Cell ({}, {}) = {value}", cell.row, cell.col)
            }
            Self::CallPush { frame } => format!("Calling frame {frame}"),
            Self::CallReturn { frame, result } => format!("Frame {frame} returns {result}"),
            Self::Found { index } => format!("Found at position {index}"),
            Self::Complete {
                note: Some(note), ..
            } => note.clone(),
            Self::Complete { index: Some(i), .. } => format!("Finished at position {i}"),
            Self::Complete { .. } => "Finished".to_string(),
        }
    }
}

impl Step {
    #[must_use]
    pub fn describe(&self) -> String {
        self.kind.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_serialize_with_kind_tag() {
        let step = Step {
            ordinal: 3,
            kind: StepKind::Compare { i: 0, j: 1 },
        };
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"ordinal":3,"kind":{"kind":"compare","i":0,"j":1}}"#);
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn describe_prefers_generator_notes() {
        let fill = StepKind::TableFill {
            cell: Cell::new(1, 2),
            value: 6,
            note: Some("Taking item 1".into()),
        };
        assert_eq!(fill.describe(), "Taking item 1");
        let bare = StepKind::TableFill {
            cell: Cell::new(1, 2),
            value: 6,
            note: None,
        };
        assert_eq!(bare.describe(), "Cell (1, 2) = 6");
    }

    #[test]
    fn only_complete_is_terminal() {
        assert!(
            StepKind::Complete {
                index: None,
                note: None
            }
            .is_terminal()
        );
        assert!(!StepKind::Found { index: 0 }.is_terminal());
    }
}
